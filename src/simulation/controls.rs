//! Inbound values from whatever drives the engine (GUI, CLI, tests).

use serde::{Deserialize, Serialize};

use super::constants::EARTH_RADIUS;
use super::states::{CollisionType, Colour};

/// Per-tick craft controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    pub burn_rate: f64,             // kg/s, clamped to [0, max_burn_rate]
    pub exhaust_speed: Option<f64>, // m/s, `None` keeps the craft's current value
}

impl Controls {
    pub fn coasting() -> Self {
        Self::default()
    }

    pub fn burning(burn_rate: f64) -> Self {
        Self {
            burn_rate,
            exhaust_speed: None,
        }
    }
}

/// One-step steering command, sized by `TURN_STEP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Up,
    Down,
}

/// Shape of the next projectile the craft fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    pub radius: f64,
    pub m: f64,
    pub speed: f64, // launch speed relative to the craft
    pub collision: CollisionType,
    pub colour: Option<Colour>,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            radius: 0.05 * EARTH_RADIUS,
            m: 10.0,
            speed: 15_000.0,
            collision: CollisionType::Elastic,
            colour: Some([1.0, 1.0, 0.0]),
        }
    }
}
