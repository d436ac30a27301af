use std::time::Instant;

use tracing::info;

use crate::error::SimError;
use crate::simulation::controls::Controls;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, BodyKind, CollisionType, NVec3, System};

/// Helper to build a manual System of size `n`
/// Bodies sit on a deterministic curve and never touch, so only gravity costs time.
fn make_system(n: usize) -> Result<System, SimError> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0e3 + i_f,
            (i_f * 0.13).cos() * 5.0e3,
            (i_f * 0.07).sin() * 5.0e3,
        );
        bodies.push(Body::new(BodyKind::Planet, x, NVec3::zeros(), 1.0, 0.0, CollisionType::Elastic)?);
    }

    Ok(System::new(bodies))
}

fn make_engine(n: usize) -> Result<Engine, SimError> {
    let parameters = Parameters {
        t_end: f64::MAX,
        h0: 0.001,
        G: 0.1,
        ..Parameters::default()
    };
    let forces = ForceSet::new().with(NewtonianGravity { G: parameters.G });

    let mut engine = Engine::new(Scenario {
        parameters,
        system: make_system(n)?,
        forces,
    });
    engine.toggle_pause();
    Ok(engine)
}

/// Time full engine ticks (collision, force and integration passes) for a
/// range of body counts and log the mean time per tick.
pub fn bench_step(ns: &[usize], steps: usize) -> Result<(), SimError> {
    let steps = steps.max(1);

    for &n in ns {
        let mut engine = make_engine(n)?;
        let dt = engine.parameters().h0;
        let controls = Controls::coasting();

        // Warm up
        engine.step(dt, &controls)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.step(dt, &controls)?;
        }
        let ms_per_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        info!(n, steps, ms_per_step = %format!("{:.6}", ms_per_step), "bench_step");
    }

    Ok(())
}
