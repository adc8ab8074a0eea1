pub mod simulation;
pub mod variants;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{StateVector, Trajectory, NVec2};
pub use simulation::engine::{Engine, BoundsPolicy};
pub use simulation::params::{ParamValue, ParameterChanges, changes};
pub use simulation::fields::{Field, FieldKind, Fields, Reading, Readings};
pub use simulation::base::{Simulation, SimulationCore};
pub use simulation::integrator::{integrate, EulerModel, Integration, Termination};
pub use simulation::forces::{Acceleration, AccelSet, UniformGravity, QuadraticDrag};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ScenarioConfig};

pub use variants::{DampedOscillator, ObjectOffSlope, ParticleOffSlope, Scattering, TwoSprings, REGISTRY};

pub use visualization::{figure::{Figure, Shape}, playback::Playback};

pub use benchmark::benchmark::{bench_simulate, bench_step_cap_curve};

pub use error::{ParameterError, ScenarioError};
