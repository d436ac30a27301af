//! Per-body physics: construction, touch tests, gravity, separation,
//! merging and the semi-implicit Euler step.

use rand::Rng;

use super::collisions::inelastic_velocity;
use super::states::{Body, BodyKind, CollisionType, NVec3};
use super::vector::{normalize_or_random, random_unit};
use crate::error::SimError;

/// Bodies are pushed this fraction past the touching distance so the strict
/// `is_touching` test is false after rounding.
pub const SEPARATION_SLACK: f64 = 1.0e-9;

pub(crate) fn check_mass(m: f64) -> Result<f64, SimError> {
    if m.is_finite() && m > 0.0 {
        Ok(m)
    } else {
        Err(SimError::invalid("mass", m))
    }
}

pub(crate) fn check_radius(r: f64) -> Result<f64, SimError> {
    if r.is_finite() && r >= 0.0 {
        Ok(r)
    } else {
        Err(SimError::invalid("radius", r))
    }
}

impl Body {
    pub fn new(
        kind: BodyKind,
        x: NVec3,
        v: NVec3,
        m: f64,
        radius: f64,
        collision: CollisionType,
    ) -> Result<Self, SimError> {
        let name = match kind {
            BodyKind::Planet => "planet",
            BodyKind::Craft => "craft",
            BodyKind::Projectile => "projectile",
        };
        Ok(Self {
            name: name.to_owned(),
            x,
            v,
            colour: None,
            kind,
            m: check_mass(m)?,
            radius: check_radius(radius)?,
            collision,
            craft: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn collision_type(&self) -> CollisionType {
        self.collision
    }

    /// Mass used for every dynamics and gravity calculation.
    /// For a craft this is dry mass plus remaining fuel.
    pub fn mass(&self) -> f64 {
        match &self.craft {
            Some(c) => self.m + c.fuel(),
            None => self.m,
        }
    }

    /// Structural mass without fuel.
    pub fn dry_mass(&self) -> f64 {
        self.m
    }

    pub fn set_mass(&mut self, m: f64) -> Result<(), SimError> {
        self.m = check_mass(m)?;
        Ok(())
    }

    pub fn set_radius(&mut self, r: f64) -> Result<(), SimError> {
        self.radius = check_radius(r)?;
        Ok(())
    }

    pub fn set_collision_type(&mut self, collision: CollisionType) {
        self.collision = collision;
    }

    /// `other.x - self.x`, or a random unit vector when the two coincide.
    pub fn separation_vector<R: Rng + ?Sized>(&self, other: &Body, rng: &mut R) -> NVec3 {
        let sep = other.x - self.x;
        if sep == NVec3::zeros() {
            random_unit(rng)
        } else {
            sep
        }
    }

    pub fn is_touching(&self, other: &Body) -> bool {
        (other.x - self.x).norm() < self.radius + other.radius
    }

    /// Newtonian pull of `other` on `self`, pointing from `self` towards `other`.
    ///
    /// Exactly coincident bodies get `other` nudged by a random unit offset,
    /// then the force is computed once more. If the nudge is lost to
    /// floating point the result is zero.
    pub fn gravitational_force<R: Rng + ?Sized>(&self, other: &mut Body, g: f64, rng: &mut R) -> NVec3 {
        let mut sep = other.x - self.x;
        if sep == NVec3::zeros() {
            other.x += random_unit(rng);
            sep = other.x - self.x;
        }

        let r2 = sep.norm_squared();
        match sep.try_normalize(0.0) {
            Some(dir) if r2 > 0.0 => dir * (g * self.mass() * other.mass() / r2),
            _ => NVec3::zeros(),
        }
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn integrate(&mut self, net_force: &NVec3, dt: f64) {
        let a = *net_force / self.mass();
        self.v += a * dt;
        self.x += self.v * dt;
    }

    /// Push two touching bodies apart along their line of centres until their
    /// surfaces no longer overlap. The heavier body moves less.
    pub fn separate<R: Rng + ?Sized>(&mut self, other: &mut Body, rng: &mut R) {
        if !self.is_touching(other) {
            return;
        }

        let sep = other.x - self.x;
        let dist = sep.norm();
        let dir = normalize_or_random(&sep, rng);

        // distance still to be closed, shared inversely by mass
        let overlap = (self.radius + other.radius) * (1.0 + SEPARATION_SLACK) - dist;
        let (ma, mb) = (self.mass(), other.mass());
        let total = ma + mb;

        self.x -= dir * (overlap * mb / total);
        other.x += dir * (overlap * ma / total);
    }

    /// Absorb `other`: momentum-weighted velocity, summed mass.
    /// The caller removes `other` from the system.
    pub fn merge(&mut self, other: &Body) {
        self.v = inelastic_velocity(self, other);
        // for a craft `m` is the dry mass, so fuel is not counted twice
        self.m += other.mass();
    }
}
