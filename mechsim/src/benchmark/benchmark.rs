//! Wall-clock timing of full runs
//!
//! Times `initial_conditions()` + `simulate()` for every registered
//! variant, the blocking cost a presentation layer pays on each redraw.

use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::integrator::Termination;
use crate::variants;

/// One variant's measurement
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub key: &'static str,
    pub rows: usize,
    pub termination: Option<Termination>,
    pub ms_per_run: f64,
}

/// Average over `runs` full simulations of every variant
pub fn bench_simulate(engine: Engine, runs: usize) -> Vec<BenchResult> {
    let runs = runs.max(1);
    let mut results = Vec::new();

    for (key, mut sim) in variants::build_all(engine) {
        // Warm-up
        let initial = sim.initial_conditions();
        sim.simulate(&initial);

        let t0 = Instant::now();
        for _ in 0..runs {
            let initial = sim.initial_conditions();
            sim.simulate(&initial);
        }
        let ms_per_run = t0.elapsed().as_secs_f64() * 1000.0 / runs as f64;

        results.push(BenchResult {
            key,
            rows: sim.trajectory().len(),
            termination: sim.termination(),
            ms_per_run,
        });
    }

    results
}

/// Time a forced full-length run for a range of step caps.
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_cap_curve() {
    println!("max_steps,simulation,ms");

    for max_steps in (5_000..=50_000).step_by(5_000) {
        let engine = Engine { max_steps, ..Engine::default() };
        for result in bench_simulate(engine, 3) {
            println!("{},{},{:.6}", max_steps, result.key, result.ms_per_run);
        }
    }
}
