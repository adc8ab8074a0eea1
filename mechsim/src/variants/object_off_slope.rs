//! Launching an object off a slope, with optional air resistance
//!
//! State: `[x, y, vx, vy]`. Gravity always acts; with `air_resistance`
//! on, a quadratic drag term scaled by the object's mass is added.

use crate::simulation::base::{Simulation, SimulationCore};
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Field, Fields, Readings};
use crate::simulation::forces::{AccelSet, QuadraticDrag, UniformGravity};
use crate::simulation::integrator::integrate;
use crate::simulation::params::ParamValue;
use crate::simulation::states::{StateVector, Trajectory};
use crate::variants::slope::{self, SlopeFlight};
use crate::variants::G_EARTH;
use crate::visualization::figure::{Figure, Shape};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectParams {
    pub slope_angle: i64, // degrees
    pub launch_angle: i64, // degrees
    pub speed: f64, // m/s
    pub gravity: f64, // m/s^2
    pub mass: f64, // kg
    pub air_resistance: bool,
    pub air_density: f64, // kg/m^3
    pub drag_coefficient: f64, // sphere by default
}

impl Default for ObjectParams {
    fn default() -> Self {
        Self {
            slope_angle: 30,
            launch_angle: 45,
            speed: 10.0,
            gravity: G_EARTH,
            mass: 10.0,
            air_resistance: false,
            air_density: 1.225,
            drag_coefficient: 0.47,
        }
    }
}

impl ObjectParams {
    /// Flight model for the current parameters
    pub fn flight(&self) -> SlopeFlight {
        let mut forces = AccelSet::new().with(UniformGravity { g: self.gravity });
        if self.air_resistance {
            forces = forces.with(QuadraticDrag {
                air_density: self.air_density,
                drag_coefficient: self.drag_coefficient,
                mass: self.mass,
            });
        }
        SlopeFlight {
            forces,
            slope_angle: self.slope_angle,
        }
    }
}

pub struct ObjectOffSlope {
    core: SimulationCore,
    pub params: ObjectParams,
}

impl ObjectOffSlope {
    pub fn new(engine: Engine) -> Self {
        Self {
            core: SimulationCore::new("Launching an Object Off of a Slope", slope::STATE_LENGTH, engine),
            params: ObjectParams::default(),
        }
    }
}

impl Default for ObjectOffSlope {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Simulation for ObjectOffSlope {
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
        let run = integrate(&self.params.flight(), initial, &self.core.engine);
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
            Field::float("mass", "Particle Mass", p.mass).min(1.0),
            Field::checkbox("air_resistance", "Air Resistance", p.air_resistance),
            Field::float("drag_coefficient", "Drag Coefficient", p.drag_coefficient)
                .min(0.0)
                .max(1.0),
            Field::float("air_density", "Air Density", p.air_density).min(0.001),
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
            .build()
    }

    fn apply_parameter(&mut self, name: &str, value: ParamValue) {
        let p = &mut self.params;
        match name {
            "slope_angle" => p.slope_angle = value.int(),
            "launch_angle" => p.launch_angle = value.int(),
            "speed" => p.speed = value.float(),
            "gravity" => p.gravity = value.float(),
            "mass" => p.mass = value.float(),
            "air_resistance" => p.air_resistance = value.flag(),
            "drag_coefficient" => p.drag_coefficient = value.float(),
            "air_density" => p.air_density = value.float(),
            _ => {}
        }
    }
}
