//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`:
//! - engine settings (`Engine`)
//! - the simulation registered under the configured key, with the
//!   configured parameter edits already applied
//!
//! Building does not simulate; the first `get_figure()` does

use tracing::info;

use crate::configuration::config::ScenarioConfig;
use crate::error::{Result, ScenarioError};
use crate::simulation::base::Simulation;
use crate::simulation::engine::Engine;
use crate::variants;

/// A simulation ready to be driven by a presentation layer
pub struct Scenario {
    pub key: String,
    pub engine: Engine,
    pub simulation: Box<dyn Simulation>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Engine (runtime) from EngineConfig
        let engine = cfg.engine.to_engine()?;

        // Simulation from the registry
        let mut simulation = variants::build(&cfg.simulation, engine)
            .ok_or_else(|| ScenarioError::UnknownSimulation(cfg.simulation.clone()))?;

        // Parameters go through the same protocol as UI edits
        if !cfg.parameters.is_empty() {
            simulation.update_variables(&cfg.parameters)?;
        }

        info!(
            simulation = simulation.name(),
            parameters = cfg.parameters.len(),
            "scenario built"
        );

        Ok(Self {
            key: cfg.simulation,
            engine,
            simulation,
        })
    }
}
