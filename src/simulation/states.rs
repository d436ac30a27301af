//! Core state types for the simulation.
//!
//! - `Body`: one simulated sphere (planet, craft or projectile)
//! - `System`: the ordered body collection plus elapsed time `t`
//!
//! A craft is a plain `Body` carrying `Some(CraftState)`; there is no
//! separate craft type in the collection.

use serde::{Deserialize, Serialize};

use super::craft::CraftState;
pub use super::vector::NVec3;

/// Display colour, passed through untouched.
pub type Colour = [f32; 3];

/// How a body behaves when it touches another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionType {
    Elastic,
    Inelastic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Planet,
    Craft,
    Projectile,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub colour: Option<Colour>,
    pub(crate) kind: BodyKind,
    pub(crate) m: f64, // mass (dry mass for a craft)
    pub(crate) radius: f64, // touch radius, not used by gravity
    pub(crate) collision: CollisionType,
    pub(crate) craft: Option<CraftState>,
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>,
    pub t: f64, // elapsed time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Index of the player craft: the first body carrying craft state.
    pub fn craft_index(&self) -> Option<usize> {
        self.bodies.iter().position(|b| b.craft.is_some())
    }

    pub fn craft(&self) -> Option<&Body> {
        self.craft_index().map(|i| &self.bodies[i])
    }

    pub fn craft_mut(&mut self) -> Option<&mut Body> {
        let i = self.craft_index()?;
        Some(&mut self.bodies[i])
    }

    /// Total linear momentum, using effective masses.
    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().fold(NVec3::zeros(), |p, b| p + b.v * b.mass())
    }
}
