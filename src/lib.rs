pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{Body, BodyKind, CollisionType, Colour, System, NVec3};
pub use simulation::craft::CraftState;
pub use simulation::controls::{Controls, ProjectileSpec, Turn};
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::euler_step;
pub use simulation::constants::TURN_STEP;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::engine::{collision_pass, CollisionReport, Engine, RunState, StepOutcome, TickReport};
pub use simulation::snapshot::{format_elapsed, BodyView, CraftView, Snapshot};

pub use configuration::config::{BodyConfig, CraftConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_step;
