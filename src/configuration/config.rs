//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – time limits, physical constants and craft limits
//! - [`CraftConfig`]      – the player craft (optional, `craft: null` for none)
//! - [`BodyConfig`]       – initial state for every other body
//! - [`ProjectileSpec`]   – what the craft fires by default
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section is optional and falls back to the stock scenario: a craft
//! above two Earth-like planets.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   t_end: 2419200.0        # freeze after 28 days
//!   h0: 60.0                # default step size, s
//!   seed: 42                # degeneracy-breaking RNG seed
//!   G: 6.674e-11
//!   max_burn_rate: 0.5      # kg/s
//!   max_exhaust_speed: 200000.0
//!   refuel_amount: 10000.0
//!   reload_amount: 10
//!
//! craft:
//!   x: [0.0, 0.0, 6.0e7]
//!   v: [0.0, 0.0, 0.0]
//!   forward: [0.0, 0.0, -1.0]
//!   m: 30000.0              # dry mass
//!   radius: 50.0
//!   fuel: 10000.0
//!   ammo: 10
//!   exhaust_speed: 60000.0
//!
//! bodies:
//!   - name: earth1
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 5.3748e24
//!     radius: 6.371e6
//!     collision: elastic    # or "inelastic"
//!
//! projectile:
//!   radius: 318550.0
//!   m: 10.0
//!   speed: 15000.0
//!   collision: elastic
//!   colour: [1.0, 1.0, 0.0]
//! ```

use serde::{Deserialize, Serialize};

use crate::simulation::constants::{
    CRAFT_AMMO, CRAFT_DRY_MASS, CRAFT_FUEL, CRAFT_RADIUS, DEFAULT_DT, EARTH_MASS, EARTH_RADIUS,
    GRAVITATIONAL_CONSTANT, MAX_BURN_RATE, MAX_EXHAUST_SPEED, MAX_SIMULATION_TIME,
};
use crate::simulation::controls::ProjectileSpec;
use crate::simulation::states::{CollisionType, Colour};

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64, // default time step size
    pub seed: u64, // deterministic seed to make runs reproducible
    pub G: f64, // gravitational constant
    pub max_burn_rate: f64, // cap on the commanded burn rate
    pub max_exhaust_speed: f64, // cap on the commanded exhaust speed
    pub refuel_amount: f64, // fuel added by a plain refuel
    pub reload_amount: u32, // rounds added by a plain reload
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: MAX_SIMULATION_TIME,
            h0: DEFAULT_DT,
            seed: 42,
            G: GRAVITATIONAL_CONSTANT,
            max_burn_rate: MAX_BURN_RATE,
            max_exhaust_speed: MAX_EXHAUST_SPEED,
            refuel_amount: CRAFT_FUEL,
            reload_amount: CRAFT_AMMO,
        }
    }
}

/// Initial state of the player craft
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CraftConfig {
    pub name: String,
    pub x: [f64; 3], // initial position
    pub v: [f64; 3], // initial velocity
    pub forward: [f64; 3], // nose direction, need not be normalized
    pub m: f64, // dry mass
    pub radius: f64, // collision radius
    pub fuel: f64, // fuel mass
    pub ammo: u32, // projectiles on board
    pub exhaust_speed: f64,
    pub colour: Option<Colour>,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            name: "craft".to_owned(),
            x: [0.0, 0.0, 6.0e7],
            v: [0.0, 0.0, 0.0],
            forward: [0.0, 0.0, -1.0],
            m: CRAFT_DRY_MASS,
            radius: CRAFT_RADIUS,
            fuel: CRAFT_FUEL,
            ammo: CRAFT_AMMO,
            exhaust_speed: 0.3 * MAX_EXHAUST_SPEED,
            colour: Some([0.0, 1.0, 0.0]),
        }
    }
}

fn default_body_name() -> String {
    "planet".to_owned()
}

fn default_collision() -> CollisionType {
    CollisionType::Elastic
}

/// Configuration for a single body's initial state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    #[serde(default = "default_body_name")]
    pub name: String,
    pub x: [f64; 3], // initial position
    #[serde(default)]
    pub v: [f64; 3], // initial velocity
    pub m: f64, // mass, must be positive
    pub radius: f64, // collision radius, must not be negative
    #[serde(default = "default_collision")]
    pub collision: CollisionType,
    #[serde(default)]
    pub colour: Option<Colour>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub craft: Option<CraftConfig>, // Player craft, inserted as the first body
    pub bodies: Vec<BodyConfig>, // Every other body in the initial state
    pub projectile: ProjectileSpec, // Default projectile for `fire`
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            craft: Some(CraftConfig::default()),
            bodies: vec![
                BodyConfig {
                    name: "earth1".to_owned(),
                    x: [0.0, 0.0, 0.0],
                    v: [0.0, 0.0, 0.0],
                    m: 0.9 * EARTH_MASS,
                    radius: EARTH_RADIUS,
                    collision: CollisionType::Elastic,
                    colour: None,
                },
                BodyConfig {
                    name: "earth2".to_owned(),
                    x: [2.0e7, 5.0e7, 0.0],
                    v: [0.0, 0.0, 3.0e3],
                    m: EARTH_MASS,
                    radius: EARTH_RADIUS,
                    collision: CollisionType::Elastic,
                    colour: None,
                },
            ],
            projectile: ProjectileSpec::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
