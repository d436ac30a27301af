//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - default step size and the end time after which the engine freezes,
//! - gravitational constant `G` and the seed for degeneracy breaking,
//! - craft limits (burn rate, exhaust speed) and refuel/reload amounts

use super::constants::{
    CRAFT_AMMO, CRAFT_FUEL, DEFAULT_DT, GRAVITATIONAL_CONSTANT, MAX_BURN_RATE, MAX_EXHAUST_SPEED,
    MAX_SIMULATION_TIME,
};

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // default step size
    pub seed: u64, // deterministic seed
    pub G: f64, // gravitational constant
    pub max_burn_rate: f64, // kg/s
    pub max_exhaust_speed: f64, // m/s
    pub refuel_amount: f64, // kg added by a plain refuel
    pub reload_amount: u32, // rounds added by a plain reload
}

impl Default for Parameters {
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
