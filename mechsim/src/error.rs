//! Error types for mechsim.

use thiserror::Error;

/// Rejections from the parameter update protocol
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("parameter `{name}` expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("parameter `{name}` = {value} is outside {bounds}")]
    OutOfRange {
        name: String,
        value: f64,
        bounds: String,
    },
}

/// Failures while loading or assembling a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown simulation `{0}`")]
    UnknownSimulation(String),

    #[error("invalid engine settings: {0}")]
    InvalidEngine(String),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
