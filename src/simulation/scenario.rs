//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with the craft first, then the other bodies, at t = 0)
//! - active force set (`ForceSet`)
//!
//! A `Scenario` is consumed by [`crate::simulation::engine::Engine::new`].

use crate::configuration::config::{BodyConfig, CraftConfig, ParametersConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::craft::CraftState;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyKind, NVec3, System};

pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
}

fn vec3(a: [f64; 3]) -> NVec3 {
    NVec3::new(a[0], a[1], a[2])
}

fn build_parameters(p_cfg: &ParametersConfig) -> Result<Parameters, SimError> {
    let positive = |name: &'static str, value: f64| {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(SimError::invalid(name, value))
        }
    };

    Ok(Parameters {
        t_end: positive("t_end", p_cfg.t_end)?,
        h0: positive("h0", p_cfg.h0)?,
        seed: p_cfg.seed,
        G: p_cfg.G,
        max_burn_rate: positive("max_burn_rate", p_cfg.max_burn_rate)?,
        max_exhaust_speed: positive("max_exhaust_speed", p_cfg.max_exhaust_speed)?,
        refuel_amount: positive("refuel_amount", p_cfg.refuel_amount)?,
        reload_amount: p_cfg.reload_amount,
    })
}

fn build_craft(c_cfg: &CraftConfig) -> Result<Body, SimError> {
    let state = CraftState::new(vec3(c_cfg.forward), c_cfg.fuel, c_cfg.ammo, c_cfg.exhaust_speed)?;
    let mut body = Body::new_craft(vec3(c_cfg.x), vec3(c_cfg.v), c_cfg.m, c_cfg.radius, state)?.named(c_cfg.name.clone());
    body.colour = c_cfg.colour;
    Ok(body)
}

fn build_body(bc: &BodyConfig) -> Result<Body, SimError> {
    let mut body = Body::new(BodyKind::Planet, vec3(bc.x), vec3(bc.v), bc.m, bc.radius, bc.collision)?.named(bc.name.clone());
    body.colour = bc.colour;
    Ok(body)
}

impl Scenario {
    /// Validate `cfg` and build the runtime bundle. Masses must be positive
    /// and radii non-negative.
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        let parameters = build_parameters(&cfg.parameters)?;

        // craft goes first so it is always the survivor of its merges
        let mut bodies = Vec::with_capacity(cfg.bodies.len() + 1);
        if let Some(c_cfg) = &cfg.craft {
            bodies.push(build_craft(c_cfg)?);
        }
        for bc in &cfg.bodies {
            bodies.push(build_body(bc)?);
        }

        // Forces: construct a ForceSet and register Newtonian gravity
        let forces = ForceSet::new().with(NewtonianGravity { G: parameters.G });

        Ok(Self {
            parameters,
            system: System::new(bodies),
            forces,
        })
    }
}
