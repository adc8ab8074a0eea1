use mechsim::{bench_simulate, bench_step_cap_curve, Engine, Playback, Scenario, ScenarioConfig, Simulation};
use mechsim::variants;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::path::PathBuf;

/// Headless driver: runs a scenario and plays it back as text
#[derive(Parser, Debug)]
#[command(name = "mechsim")]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is a path
    #[arg(short, default_value = "damped_oscillator.yaml")]
    file_name: String,

    /// Print readings every N frames during playback
    #[arg(long, default_value_t = 250)]
    every: usize,

    /// List registered simulations and their fields
    #[arg(long)]
    list: bool,

    /// Time a full run of every simulation
    #[arg(long)]
    bench: bool,

    /// With --bench, sweep the step cap and print CSV
    #[arg(long)]
    curve: bool,
}

// resolve here to keep main clean
fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn load_scenario(file_name: &str) -> Result<Scenario> {
    let path = scenario_path(file_name);
    let cfg = ScenarioConfig::from_path(&path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    let scenario = Scenario::build_scenario(cfg).context("failed to build scenario")?;
    Ok(scenario)
}

fn list_simulations() -> Result<()> {
    for (key, sim) in variants::build_all(Engine::default()) {
        println!("{} ({})", key, sim.name());
        let fields = serde_yaml::to_string(&sim.get_fields())?;
        for line in fields.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

fn run_benchmarks(curve: bool) {
    if curve {
        bench_step_cap_curve();
        return;
    }
    for r in bench_simulate(Engine::default(), 5) {
        let stop = r.termination.map(|t| t.to_string()).unwrap_or_default();
        println!("{:20} rows = {:6}  {:10.3} ms  ({})", r.key, r.rows, r.ms_per_run, stop);
    }
}

fn print_readings(sim: &dyn Simulation) {
    let readings = sim.get_readings();
    let line: Vec<String> = readings
        .iter()
        .map(|r| format!("{} = {}", r.name, r.value))
        .collect();
    println!("frame {:6}: {}", sim.offset(), line.join(", "));
}

fn play(mut scenario: Scenario, every: usize) {
    let sim = scenario.simulation.as_mut();
    let figure = sim.get_figure();

    info!(
        simulation = sim.name(),
        frames = figure.frame_count,
        termination = %sim.termination().map(|t| t.to_string()).unwrap_or_default(),
        "playing back"
    );

    let every = every.max(1);
    let mut playback = Playback::new(&figure);
    while let Some(_shapes) = playback.tick(sim) {
        if sim.offset() % every == 0 {
            print_readings(sim);
        }
    }
    print_readings(sim);
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mechsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if args.list {
        return list_simulations();
    }
    if args.bench {
        run_benchmarks(args.curve);
        return Ok(());
    }

    let scenario = load_scenario(&args.file_name)?;
    play(scenario, args.every);

    Ok(())
}
