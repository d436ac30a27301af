//! Physical constants and the stock values the default scenario is built from.

use std::f64::consts::PI;

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // m^3 kg^-1 s^-2
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6.371e6; // m

pub const CRAFT_DRY_MASS: f64 = 30.0e3; // kg
pub const CRAFT_FUEL: f64 = 1.0e4; // kg
pub const CRAFT_AMMO: u32 = 10;
pub const CRAFT_RADIUS: f64 = 50.0; // m
pub const MAX_BURN_RATE: f64 = 0.5; // kg/s
pub const MAX_EXHAUST_SPEED: f64 = 200_000.0; // m/s

/// 28 days, in seconds
pub const MAX_SIMULATION_TIME: f64 = 28.0 * 24.0 * 60.0 * 60.0;
pub const DEFAULT_DT: f64 = 60.0; // s

/// Button-sized steering increment.
pub const TURN_STEP: f64 = PI / 12.0;
