//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario names one registered simulation and optionally overrides the
//! engine settings and the simulation's parameters:
//!
//! - [`EngineConfig`]   – length, resolution, rounding, step cap, bounds policy
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! simulation: object_off_slope   # key in variants::REGISTRY
//!
//! engine:                        # every key optional
//!   sim_length: 10000            # logical seconds
//!   steps_per_second: 25         # dt = 1 / steps_per_second
//!   round: 5                     # decimal places of readings
//!   max_steps: 50000             # hard step cap
//!   bounds: advisory             # or `enforce`
//!
//! parameters:                    # partial, names as in get_fields()
//!   slope_angle: 80
//!   air_resistance: true
//! ```
//!
//! The scenario builder maps this onto a runtime [`Engine`] and pushes
//! `parameters` through the normal update protocol.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScenarioError};
use crate::simulation::engine::{BoundsPolicy, Engine};
use crate::simulation::params::ParameterChanges;

/// Engine overrides, unset keys keep the defaults
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub sim_length: Option<u32>, // logical seconds
    pub steps_per_second: Option<u32>, // must be > 0
    pub round: Option<u32>, // decimal places
    pub max_steps: Option<usize>, // hard cap on integration steps
    pub bounds: Option<BoundsPolicy>, // advisory or enforce
}

impl EngineConfig {
    /// Apply the overrides on top of `Engine::default()`
    pub fn to_engine(&self) -> Result<Engine> {
        let defaults = Engine::default();
        let engine = Engine {
            sim_length: self.sim_length.unwrap_or(defaults.sim_length),
            steps_per_second: self.steps_per_second.unwrap_or(defaults.steps_per_second),
            round: self.round.unwrap_or(defaults.round),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            bounds: self.bounds.unwrap_or(defaults.bounds),
        };

        if engine.steps_per_second == 0 {
            return Err(ScenarioError::InvalidEngine("steps_per_second must be positive".to_string()));
        }
        if engine.round > 15 {
            return Err(ScenarioError::InvalidEngine(format!(
                "round = {} exceeds f64 precision",
                engine.round
            )));
        }

        Ok(engine)
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: String, // registry key of the simulation to run
    #[serde(default)]
    pub engine: EngineConfig, // engine overrides
    #[serde(default)]
    pub parameters: ParameterChanges, // initial parameter edits
}

impl ScenarioConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
