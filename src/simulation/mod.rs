pub mod vector;
pub mod constants;
pub mod states;
pub mod body;
pub mod craft;
pub mod collisions;
pub mod controls;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod snapshot;
pub mod engine;
