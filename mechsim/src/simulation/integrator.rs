//! Fixed-step time integrator shared by every variant
//!
//! Each variant describes one explicit Euler step and its stopping rule
//! through `EulerModel`; `integrate` drives that step at `dt = 1 / steps_per_second`
//! from the initial condition until the model terminates, the configured
//! length runs out or the hard step cap is reached

use std::fmt;

use super::engine::Engine;
use super::states::{StateVector, Trajectory};

/// One variant's physics: a single fixed-size step and a termination test.
///
/// `step` decides the update order (velocity before position or the other
/// way round), the driver only calls it.
pub trait EulerModel {
    /// Advance `state` in place by `dt` seconds
    fn step(&self, state: &mut StateVector, dt: f64);

    /// Physical stopping rule, checked after every step
    fn terminated(&self, state: &StateVector) -> bool;
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model's stopping rule fired on step `step` (0-based).
    /// The state that fired it is not part of the trajectory
    Condition { step: usize },
    /// The hard step cap was hit first
    StepCap,
    /// `sim_length * steps_per_second` steps ran without either
    Duration,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Condition { step } => write!(f, "stopping condition at step {}", step),
            Termination::StepCap => write!(f, "hard step cap"),
            Termination::Duration => write!(f, "end of simulated time"),
        }
    }
}

/// A finished run
#[derive(Debug, Clone)]
pub struct Integration {
    pub trajectory: Trajectory,
    pub termination: Termination,
}

/// Integrate `model` from `initial` with the engine's step size and limits.
///
/// The returned trajectory starts with an exact copy of `initial` and holds
/// at most `engine.max_steps + 1` rows.
pub fn integrate<M: EulerModel + ?Sized>(model: &M, initial: &StateVector, engine: &Engine) -> Integration {
    let dt = engine.dt();
    let requested = engine.requested_steps();

    let mut state = initial.clone();
    let mut trajectory = Trajectory::from_initial(initial.clone());

    for i in 0..requested {
        if i >= engine.max_steps {
            return Integration { trajectory, termination: Termination::StepCap };
        }

        model.step(&mut state, dt);

        if model.terminated(&state) {
            return Integration {
                trajectory,
                termination: Termination::Condition { step: i },
            };
        }

        trajectory.push(state.clone());
    }

    Integration { trajectory, termination: Termination::Duration }
}
