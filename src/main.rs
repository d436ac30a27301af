use shipsim::{bench_step, format_elapsed, Controls, Engine, Scenario, ScenarioConfig, SimError, StepOutcome};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Headless driver: runs a scenario until its end time and reports on the craft.
#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML, as a path or a name under `scenarios/`. Built-in scenario when omitted.
    #[arg(short, long)]
    file_name: Option<String>,

    /// Step size in seconds; defaults to the scenario's `h0`
    #[arg(long)]
    dt: Option<f64>,

    /// Fuel burn rate in kg/s, capped by the scenario's `max_burn_rate`
    #[arg(long, default_value_t = 0.0)]
    burn_rate: f64,

    /// Exhaust speed in m/s
    #[arg(long)]
    exhaust_speed: Option<f64>,

    /// Fire the scenario's projectile every N ticks
    #[arg(long)]
    fire_every: Option<u64>,

    /// Stop after this many ticks even if the end time is not reached
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Log craft stats every N ticks
    #[arg(long, default_value_t = 1000)]
    report_every: u64,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final snapshot as YAML on stdout
    #[arg(long)]
    dump: bool,

    /// Run the step benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(file_name: Option<&str>) -> Result<ScenarioConfig> {
    let Some(file_name) = file_name else {
        return Ok(ScenarioConfig::default());
    };

    let mut config_path = PathBuf::from(file_name);
    if !config_path.exists() {
        config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    }
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn report(engine: &Engine) {
    let Some(craft) = engine.snapshot().craft else {
        info!(t = %format_elapsed(engine.t()), bodies = engine.system().bodies.len(), "no craft");
        return;
    };
    info!(
        t = %format_elapsed(engine.t()),
        bodies = engine.system().bodies.len(),
        speed = craft.speed,
        distance = craft.distance_from_origin,
        fuel = craft.fuel,
        ammo = craft.ammo,
        mass = craft.mass,
        "craft"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_step(&[100, 200, 400, 800, 1600], 5)?;
        return Ok(());
    }

    let mut scenario_cfg = load_scenario(args.file_name.as_deref())?;
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = seed;
    }
    let projectile = scenario_cfg.projectile.clone();
    let scenario = Scenario::build_scenario(&scenario_cfg).context("invalid scenario")?;

    let mut engine = Engine::new(scenario);
    let dt = args.dt.unwrap_or(engine.parameters().h0);
    let controls = Controls {
        burn_rate: args.burn_rate,
        exhaust_speed: args.exhaust_speed,
    };

    info!(bodies = engine.system().bodies.len(), dt, t_end = engine.parameters().t_end, "starting");
    engine.toggle_pause();

    let mut ticks = 0u64;
    let mut out_of_ammo = false;
    while args.max_ticks.map_or(true, |max| ticks < max) {
        if let Some(every) = args.fire_every.filter(|&n| n > 0) {
            if ticks % every == 0 && !out_of_ammo {
                match engine.fire(&projectile) {
                    Ok(_) => {}
                    Err(SimError::OutOfAmmo) => {
                        warn!(t = %format_elapsed(engine.t()), "out of ammunition");
                        out_of_ammo = true;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        match engine.step(dt, &controls)? {
            StepOutcome::Advanced(tick) => {
                ticks += 1;
                if tick.collisions.merges > 0 {
                    info!(t = %format_elapsed(tick.t), merges = tick.collisions.merges, "merge");
                }
                if args.report_every > 0 && ticks % args.report_every == 0 {
                    report(&engine);
                }
            }
            StepOutcome::Frozen | StepOutcome::Paused => break,
        }
    }

    info!(ticks, "finished");
    report(&engine);

    if args.dump {
        println!("{}", serde_yaml::to_string(&engine.snapshot())?);
    }

    Ok(())
}
