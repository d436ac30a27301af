//! The simulation engine: owns the bodies, runs the per-tick pipeline and
//! answers craft commands between ticks.
//!
//! One tick is, in this order:
//! 1. collision pass: separate touching pairs, then bounce or merge them
//! 2. force pass: gravity for every pair, plus craft thrust
//! 3. integration pass: semi-implicit Euler for every remaining body
//!
//! Collisions go first so that near-coincident bodies are pushed apart
//! before gravity sees them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::collisions::{elastic_collision, outcome, CollisionOutcome};
use super::constants::TURN_STEP;
use super::controls::{Controls, ProjectileSpec, Turn};
use super::craft::CraftState;
use super::forces::ForceSet;
use super::integrator::euler_step;
use super::params::Parameters;
use super::scenario::Scenario;
use super::snapshot::{format_elapsed, Snapshot};
use super::states::{Body, BodyKind, NVec3, System};
use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Paused,
    Running,
    /// `t_end` was reached. Nothing integrates until a reset.
    Frozen,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bounces: usize,
    pub merges: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub t: f64, // elapsed time after the tick
    pub collisions: CollisionReport,
    pub thrust: NVec3,
    pub fuel_burnt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Paused,
    Frozen,
    Advanced(TickReport),
}

/// Resolve every touching pair once.
///
/// Pairs are visited as (i, j) with i < j. A merge removes `j` in place, so
/// the body that slides into slot `j` is examined next and removed bodies are
/// never seen again.
pub fn collision_pass<R: Rng + ?Sized>(sys: &mut System, rng: &mut R) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut i = 0;
    while i < sys.bodies.len() {
        let mut j = i + 1;
        while j < sys.bodies.len() {
            let (head, tail) = sys.bodies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            if !a.is_touching(b) {
                j += 1;
                continue;
            }

            a.separate(b, rng);
            match outcome(a.collision_type(), b.collision_type()) {
                CollisionOutcome::Bounce => {
                    elastic_collision(a, b, rng);
                    debug!(a = %a.name, b = %b.name, "bodies bounced");
                    report.bounces += 1;
                    j += 1;
                }
                CollisionOutcome::Merge => {
                    a.merge(b);
                    let absorbed = sys.bodies.remove(j);
                    debug!(
                        survivor = %sys.bodies[i].name,
                        absorbed = %absorbed.name,
                        mass = sys.bodies[i].mass(),
                        "bodies merged"
                    );
                    report.merges += 1;
                }
            }
        }
        i += 1;
    }

    report
}

pub struct Engine {
    parameters: Parameters,
    system: System,
    initial: System, // re-seeded on reset
    forces: ForceSet,
    rng: ChaCha8Rng,
    state: RunState,
    net: Vec<NVec3>, // per-body force buffer, reused between ticks
}

impl Engine {
    /// Build an engine in the `Paused` state.
    pub fn new(scenario: Scenario) -> Self {
        let Scenario {
            parameters,
            system,
            forces,
        } = scenario;

        Self {
            rng: ChaCha8Rng::seed_from_u64(parameters.seed),
            initial: system.clone(),
            system,
            parameters,
            forces,
            state: RunState::Paused,
            net: Vec::new(),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn t(&self) -> f64 {
        self.system.t
    }

    pub fn craft(&self) -> Option<&Body> {
        self.system.craft()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.system, self.state)
    }

    /// Insert a body between ticks and return its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.system.bodies.push(body);
        self.system.bodies.len() - 1
    }

    /// Paused <-> Running. A frozen engine stays frozen.
    pub fn toggle_pause(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
            RunState::Frozen => RunState::Frozen,
        };
        self.state
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// A requested exhaust speed is applied even while paused; everything
    /// else only happens when running.
    pub fn step(&mut self, dt: f64, controls: &Controls) -> Result<StepOutcome, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::invalid("dt", dt));
        }

        if let Some(speed) = controls.exhaust_speed {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(SimError::invalid("exhaust_speed", speed));
            }
            let speed = speed.min(self.parameters.max_exhaust_speed);
            if let Some(craft) = self.craft_state_mut() {
                craft.set_exhaust_speed(speed)?;
            }
        }

        match self.state {
            RunState::Paused => return Ok(StepOutcome::Paused),
            RunState::Frozen => return Ok(StepOutcome::Frozen),
            RunState::Running => {}
        }

        // 1. collisions
        let collisions = collision_pass(&mut self.system, &mut self.rng);

        // 2. forces
        let mut net = std::mem::take(&mut self.net);
        net.clear();
        net.resize(self.system.bodies.len(), NVec3::zeros());
        self.forces.accumulate_forces(&mut self.system, &mut self.rng, &mut net);

        let burn_rate = if controls.burn_rate.is_finite() {
            controls.burn_rate.clamp(0.0, self.parameters.max_burn_rate)
        } else {
            0.0
        };
        let mut thrust = NVec3::zeros();
        let mut fuel_burnt = 0.0;
        if let Some(i) = self.system.craft_index() {
            if let Some(craft) = self.system.bodies[i].craft_state_mut() {
                if craft.fuel() > 0.0 && burn_rate > 0.0 {
                    let before = craft.fuel();
                    thrust = craft.apply_thrust(burn_rate, dt);
                    fuel_burnt = before - craft.fuel();
                    net[i] += thrust;
                }
            }
        }

        // 3. integration
        euler_step(&mut self.system, &net, dt);
        self.net = net;

        if self.system.t >= self.parameters.t_end {
            self.state = RunState::Frozen;
            info!(t = %format_elapsed(self.system.t), bodies = self.system.bodies.len(), "end time reached, freezing");
        }

        Ok(StepOutcome::Advanced(TickReport {
            t: self.system.t,
            collisions,
            thrust,
            fuel_burnt,
        }))
    }

    fn craft_state_mut(&mut self) -> Option<&mut CraftState> {
        self.system.craft_mut()?.craft_state_mut()
    }

    fn require_craft(&mut self) -> Result<&mut CraftState, SimError> {
        self.craft_state_mut().ok_or(SimError::NoCraft)
    }

    /// Fire a projectile from the craft and return its index.
    pub fn fire(&mut self, spec: &ProjectileSpec) -> Result<usize, SimError> {
        let craft = self.system.craft_mut().ok_or(SimError::NoCraft)?;
        let projectile = craft.fire(spec)?;
        debug!(ammo_left = craft.craft_state().map_or(0, |c| c.ammo()), "projectile fired");
        Ok(self.add_body(projectile))
    }

    /// Add `rounds` of ammunition; returns the new count.
    pub fn reload(&mut self, rounds: u32) -> Result<u32, SimError> {
        let craft = self.require_craft()?;
        craft.reload(rounds);
        Ok(craft.ammo())
    }

    /// Reload by the configured amount.
    pub fn reload_default(&mut self) -> Result<u32, SimError> {
        self.reload(self.parameters.reload_amount)
    }

    /// Add `amount` kg of fuel; returns the new fuel mass.
    pub fn refuel(&mut self, amount: f64) -> Result<f64, SimError> {
        let craft = self.require_craft()?;
        craft.refuel(amount)?;
        Ok(craft.fuel())
    }

    /// Refuel by the configured amount.
    pub fn refuel_default(&mut self) -> Result<f64, SimError> {
        self.refuel(self.parameters.refuel_amount)
    }

    /// Put the craft back at the origin, at rest.
    pub fn recentre(&mut self) -> Result<(), SimError> {
        let craft = self.system.craft_mut().ok_or(SimError::NoCraft)?;
        craft.x = NVec3::zeros();
        craft.v = NVec3::zeros();
        Ok(())
    }

    pub fn turn_left(&mut self, angle: f64) -> Result<(), SimError> {
        self.require_craft()?.turn_left(angle);
        Ok(())
    }

    pub fn turn_up(&mut self, angle: f64) -> Result<(), SimError> {
        self.require_craft()?.turn_up(angle);
        Ok(())
    }

    /// Turn by one `TURN_STEP` in the given direction.
    pub fn steer(&mut self, turn: Turn) -> Result<(), SimError> {
        match turn {
            Turn::Left => self.turn_left(TURN_STEP),
            Turn::Right => self.turn_left(-TURN_STEP),
            Turn::Up => self.turn_up(TURN_STEP),
            Turn::Down => self.turn_up(-TURN_STEP),
        }
    }

    /// Remove every projectile; returns how many went.
    pub fn clear_projectiles(&mut self) -> usize {
        let before = self.system.bodies.len();
        self.system.bodies.retain(|b| b.kind() != BodyKind::Projectile);
        let removed = before - self.system.bodies.len();
        if removed > 0 {
            debug!(removed, "projectiles cleared");
        }
        removed
    }

    /// Discard all bodies and restart from the initial system at t = 0.
    ///
    /// The random source is re-seeded too, so a reset run replays exactly.
    /// A frozen engine comes back paused.
    pub fn reset(&mut self) {
        self.system = self.initial.clone();
        self.rng = ChaCha8Rng::seed_from_u64(self.parameters.seed);
        if self.state == RunState::Frozen {
            self.state = RunState::Paused;
        }
        info!(bodies = self.system.bodies.len(), "simulation reset");
    }
}
