//! Launching a point particle off a slope
//!
//! The drag-free version of `object_off_slope`: no mass, no air, gravity
//! only. State: `[x, y, vx, vy]`.

use crate::simulation::base::{Simulation, SimulationCore};
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Field, Fields, Readings};
use crate::simulation::forces::{AccelSet, UniformGravity};
use crate::simulation::integrator::integrate;
use crate::simulation::params::ParamValue;
use crate::simulation::states::{StateVector, Trajectory};
use crate::variants::slope::{self, SlopeFlight};
use crate::variants::G_EARTH;
use crate::visualization::figure::{Figure, Shape};

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleParams {
    pub slope_angle: i64,
    pub launch_angle: i64,
    pub speed: f64,
    pub gravity: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            slope_angle: 30,
            launch_angle: 45,
            speed: 10.0,
            gravity: G_EARTH,
        }
    }
}

pub struct ParticleOffSlope {
    core: SimulationCore,
    pub params: ParticleParams,
}

impl ParticleOffSlope {
    pub fn new(engine: Engine) -> Self {
        Self {
            core: SimulationCore::new("Launching a Particle Off of a Slope", slope::STATE_LENGTH, engine),
            params: ParticleParams::default(),
        }
    }

    fn flight(&self) -> SlopeFlight {
        SlopeFlight {
            forces: AccelSet::new().with(UniformGravity { g: self.params.gravity }),
            slope_angle: self.params.slope_angle,
        }
    }
}

impl Default for ParticleOffSlope {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Simulation for ParticleOffSlope {
    fn core(&self) -> &SimulationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SimulationCore {
        &mut self.core
    }

    fn initial_conditions(&mut self) -> StateVector {
        let state = slope::launch_state(self.params.speed, self.params.launch_angle);
        self.core.seed(&state);
        state
    }

    fn simulate(&mut self, initial: &StateVector) -> &Trajectory {
        let run = integrate(&self.flight(), initial, &self.core.engine);
        self.core.store(run)
    }

    fn figure(&self) -> Figure {
        slope::slope_figure(self.core.figure(), self.core.trajectory(), self.params.slope_angle)
    }

    fn render_frame(&self, index: usize) -> Vec<Shape> {
        vec![slope::body_marker(self.core.frame(index))]
    }

    fn get_fields(&self) -> Fields {
        let p = &self.params;
        Fields(vec![
            Field::slider("slope_angle", "Slope Angle", 0, 89, p.slope_angle),
            Field::slider("launch_angle", "Launch Angle", 0, 89, p.launch_angle),
            Field::float("speed", "Launch Speed", p.speed).min(1.0),
            Field::float("gravity", "Acceleration due to Gravity", p.gravity).min(1.0),
        ])
    }

    fn get_readings(&self) -> Readings {
        let state = self.core.current_state();
        self.core
            .readings()
            .with("x", "X Position", state[0])
            .with("y", "Y Position", state[1])
            .with("vx", "X Velocity", state[2])
            .with("vy", "Y Velocity", state[3])
            .with("speed", "Speed", state[2].hypot(state[3]))
            .build()
    }

    fn apply_parameter(&mut self, name: &str, value: ParamValue) {
        let p = &mut self.params;
        match name {
            "slope_angle" => p.slope_angle = value.int(),
            "launch_angle" => p.launch_angle = value.int(),
            "speed" => p.speed = value.float(),
            "gravity" => p.gravity = value.float(),
            _ => {}
        }
    }
}
