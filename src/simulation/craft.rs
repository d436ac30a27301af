//! The player craft: fuel, ammunition, exhaust speed and an orthonormal
//! forward/left/up basis.
//!
//! Craft state rides on a [`Body`] as `Some(CraftState)`. Only `forward` and
//! `left` are stored; `up` is always `forward x left`.

use super::body::check_radius;
use super::controls::ProjectileSpec;
use super::states::{Body, BodyKind, CollisionType, NVec3};
use super::vector::{normalize, rotate};
use crate::error::SimError;

#[derive(Debug, Clone)]
pub struct CraftState {
    pub(crate) fuel: f64,          // kg, counted in the body's effective mass
    pub(crate) ammo: u32,          // projectiles left
    pub(crate) exhaust_speed: f64, // m/s
    pub(crate) forward: NVec3,
    pub(crate) left: NVec3,
}

/// Left vector for a freshly built craft: horizontal and perpendicular to
/// `forward`, falling back to -x when `forward` points along the y axis.
fn initial_left(forward: &NVec3) -> NVec3 {
    NVec3::y()
        .cross(forward)
        .try_normalize(1.0e-12)
        .unwrap_or_else(|| -NVec3::x())
}

impl CraftState {
    pub fn new(forward: NVec3, fuel: f64, ammo: u32, exhaust_speed: f64) -> Result<Self, SimError> {
        let forward = normalize(&forward)?;
        let mut state = Self {
            fuel: 0.0,
            ammo,
            exhaust_speed: 1.0,
            left: initial_left(&forward),
            forward,
        };
        state.set_fuel(fuel)?;
        state.set_exhaust_speed(exhaust_speed)?;
        Ok(state)
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn exhaust_speed(&self) -> f64 {
        self.exhaust_speed
    }

    pub fn forward(&self) -> NVec3 {
        self.forward
    }

    pub fn left(&self) -> NVec3 {
        self.left
    }

    pub fn up(&self) -> NVec3 {
        self.forward.cross(&self.left)
    }

    pub fn set_fuel(&mut self, fuel: f64) -> Result<(), SimError> {
        if !(fuel.is_finite() && fuel >= 0.0) {
            return Err(SimError::invalid("fuel", fuel));
        }
        self.fuel = fuel;
        Ok(())
    }

    pub fn set_ammo(&mut self, ammo: u32) {
        self.ammo = ammo;
    }

    pub fn set_exhaust_speed(&mut self, speed: f64) -> Result<(), SimError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SimError::invalid("exhaust_speed", speed));
        }
        self.exhaust_speed = speed;
        Ok(())
    }

    /// Add `amount` kg of fuel. Negative amounts are rejected.
    pub fn refuel(&mut self, amount: f64) -> Result<(), SimError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(SimError::invalid("refuel amount", amount));
        }
        self.fuel += amount;
        Ok(())
    }

    pub fn reload(&mut self, rounds: u32) {
        self.ammo = self.ammo.saturating_add(rounds);
    }

    /// Rotate the basis by `angle` radians about `axis`, then re-orthonormalize
    /// so rounding never lets forward and left drift apart.
    pub fn rotate(&mut self, angle: f64, axis: &NVec3) {
        let forward = rotate(&self.forward, angle, axis);
        let left = rotate(&self.left, angle, axis);

        let Ok(forward) = normalize(&forward) else {
            return;
        };
        let left = left - forward * forward.dot(&left);
        if let Ok(left) = normalize(&left) {
            self.forward = forward;
            self.left = left;
        }
    }

    /// Yaw about `up`; positive turns towards `left`.
    pub fn turn_left(&mut self, angle: f64) {
        let up = self.up();
        self.rotate(angle, &up);
    }

    /// Pitch about `-left`; positive raises the nose towards `up`.
    pub fn turn_up(&mut self, angle: f64) {
        let left = self.left;
        self.rotate(-angle, &left);
    }

    /// Burn fuel at `burn_rate` kg/s for `dt` seconds and return the thrust.
    ///
    /// Fuel never drops below zero. The force is `forward * burn_rate * exhaust_speed`
    /// for the whole tick, even when the tank runs dry part way through.
    pub fn apply_thrust(&mut self, burn_rate: f64, dt: f64) -> NVec3 {
        let burn_rate = burn_rate.max(0.0);
        let burnt = (burn_rate * dt).min(self.fuel);
        self.fuel = (self.fuel - burnt).max(0.0);
        self.forward * (burn_rate * self.exhaust_speed)
    }
}

impl Body {
    /// A craft body. Crafts always collide elastically.
    pub fn new_craft(x: NVec3, v: NVec3, dry_mass: f64, radius: f64, state: CraftState) -> Result<Self, SimError> {
        let mut body = Body::new(BodyKind::Craft, x, v, dry_mass, radius, CollisionType::Elastic)?;
        body.craft = Some(state);
        Ok(body)
    }

    pub fn craft_state(&self) -> Option<&CraftState> {
        self.craft.as_ref()
    }

    pub fn craft_state_mut(&mut self) -> Option<&mut CraftState> {
        self.craft.as_mut()
    }

    /// Launch a projectile along `forward`.
    ///
    /// The projectile starts clear of both collision radii, moves at
    /// `spec.speed` relative to the craft, and the craft recoils. With an
    /// empty magazine this returns `OutOfAmmo` and changes nothing.
    pub fn fire(&mut self, spec: &ProjectileSpec) -> Result<Body, SimError> {
        let craft = self.craft.as_ref().ok_or(SimError::NoCraft)?;
        if craft.ammo == 0 {
            return Err(SimError::OutOfAmmo);
        }
        if !(spec.speed.is_finite() && spec.speed >= 0.0) {
            return Err(SimError::invalid("launch speed", spec.speed));
        }
        if spec.radius <= 0.0 {
            return Err(SimError::invalid("projectile radius", spec.radius));
        }
        let radius = check_radius(spec.radius)?;

        let forward = craft.forward;
        let x = self.x + forward * (2.0 * radius + 2.0 * self.radius);
        let v = forward * spec.speed + self.v;
        let mut projectile = Body::new(BodyKind::Projectile, x, v, spec.m, radius, spec.collision)?;
        projectile.colour = spec.colour;

        // recoil
        let m = self.mass();
        self.v = (self.v * m - projectile.v * projectile.m) / m;

        if let Some(craft) = self.craft.as_mut() {
            craft.ammo -= 1;
        }
        Ok(projectile)
    }
}
