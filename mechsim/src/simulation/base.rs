//! The contract every simulation variant implements
//!
//! `SimulationCore` holds what all variants share (name, state length,
//! frame offset, engine settings, current trajectory and why the last run
//! stopped). `Simulation` is the capability set the presentation layer
//! calls into: initial conditions, simulate, figure, parameter updates,
//! field metadata and readings.

use tracing::{debug, warn};

use crate::error::ParameterError;
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Fields, Readings};
use crate::simulation::integrator::{Integration, Termination};
use crate::simulation::params::{ParamValue, ParameterChanges};
use crate::simulation::states::{StateVector, Trajectory};
use crate::visualization::figure::{Figure, Shape};

/// State shared by every variant
#[derive(Debug, Clone)]
pub struct SimulationCore {
    pub name: &'static str, // human-readable name
    pub state_length: usize, // fixed state vector length
    pub offset: usize, // frame offset, written by the rendering driver
    pub engine: Engine, // settings, fixed at construction
    trajectory: Trajectory,
    termination: Option<Termination>, // None until the first run
}

impl SimulationCore {
    pub fn new(name: &'static str, state_length: usize, engine: Engine) -> Self {
        Self {
            name,
            state_length,
            offset: 0,
            engine,
            trajectory: Trajectory::reset(state_length),
            termination: None,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Drop the current run, leaving one zero row
    pub fn reset(&mut self) {
        self.trajectory = Trajectory::reset(self.state_length);
        self.termination = None;
    }

    /// Restart the trajectory from `initial`
    pub fn seed(&mut self, initial: &StateVector) {
        self.trajectory = Trajectory::from_initial(initial.clone());
        self.termination = None;
    }

    /// Replace the trajectory with a finished run
    pub fn store(&mut self, run: Integration) -> &Trajectory {
        debug!(
            simulation = self.name,
            rows = run.trajectory.len(),
            termination = %run.termination,
            "simulation finished"
        );
        self.termination = Some(run.termination);
        self.trajectory = run.trajectory;
        &self.trajectory
    }

    /// State at the frame offset, clamped to the last row
    pub fn current_state(&self) -> &StateVector {
        self.trajectory.frame(self.offset)
    }

    /// State of frame `index`, clamped to the last row
    pub fn frame(&self, index: usize) -> &StateVector {
        self.trajectory.frame(index)
    }

    /// Start a figure sized to the current trajectory
    pub fn figure(&self) -> Figure {
        Figure::new(self.name, self.trajectory.len(), self.engine.frame_interval())
    }

    /// Start readings rounded to the engine precision
    pub fn readings(&self) -> crate::simulation::fields::ReadingsBuilder {
        Readings::builder(self.engine.round)
    }
}

/// Polymorphic interface over the simulation variants.
///
/// Variants implement the physics (`initial_conditions`, `simulate`), the
/// drawing (`figure`, `render_frame`), their parameter table (`get_fields`,
/// `apply_parameter`) and `get_readings`. The update protocol and
/// `get_figure` are shared.
pub trait Simulation {
    fn core(&self) -> &SimulationCore;

    fn core_mut(&mut self) -> &mut SimulationCore;

    /// State vector at t = 0 from the current parameters.
    /// Also resets the trajectory to hold only this state.
    fn initial_conditions(&mut self) -> StateVector;

    /// Integrate from `initial` until termination or the step cap.
    /// The run replaces the stored trajectory, which is returned.
    fn simulate(&mut self, initial: &StateVector) -> &Trajectory;

    /// Limits and backdrop for the stored trajectory
    fn figure(&self) -> Figure;

    /// Moving shapes of frame `index` (clamped to the last frame)
    fn render_frame(&self, index: usize) -> Vec<Shape>;

    /// Current parameter metadata
    fn get_fields(&self) -> Fields;

    /// Readings at the frame offset
    fn get_readings(&self) -> Readings;

    /// Assign one already validated and coerced value
    fn apply_parameter(&mut self, name: &str, value: ParamValue);

    fn name(&self) -> &'static str {
        self.core().name
    }

    fn state_length(&self) -> usize {
        self.core().state_length
    }

    fn engine(&self) -> &Engine {
        &self.core().engine
    }

    fn trajectory(&self) -> &Trajectory {
        self.core().trajectory()
    }

    fn termination(&self) -> Option<Termination> {
        self.core().termination()
    }

    fn offset(&self) -> usize {
        self.core().offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.core_mut().offset = offset;
    }

    /// Run the full simulation from fresh initial conditions and describe
    /// how to draw it
    fn get_figure(&mut self) -> Figure {
        let initial = self.initial_conditions();
        self.simulate(&initial);
        self.figure()
    }

    /// Apply a partial parameter update.
    ///
    /// Every key is checked against `get_fields()` before anything is
    /// assigned, so a rejected update leaves the simulation untouched.
    /// Unknown keys are ignored. On success the trajectory is reset to a
    /// single zero row; re-simulating is up to the caller (`get_figure`).
    fn update_variables(&mut self, changes: &ParameterChanges) -> Result<(), ParameterError> {
        let fields = self.get_fields();
        let policy = self.core().engine.bounds;

        let mut accepted = Vec::with_capacity(changes.len());
        for (name, value) in changes {
            match fields.get(name) {
                Some(field) => accepted.push((field.name, field.coerce(*value, policy)?)),
                None => warn!(simulation = self.name(), parameter = %name, "ignoring unknown parameter"),
            }
        }

        for (name, value) in accepted {
            debug!(simulation = self.name(), parameter = name, value = %value, "parameter updated");
            self.apply_parameter(name, value);
        }

        self.core_mut().reset();
        Ok(())
    }
}
