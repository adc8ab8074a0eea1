//! Damped pendulum
//!
//! State: `[theta, omega]` (rad, rad/s). Integrated with semi-implicit
//! Euler (omega first, then theta with the new omega) and stopped once the
//! bob has settled.

use crate::simulation::base::{Simulation, SimulationCore};
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Field, Fields, Readings};
use crate::simulation::integrator::{integrate, EulerModel};
use crate::simulation::params::ParamValue;
use crate::simulation::states::{NVec2, StateVector, Trajectory};
use crate::variants::G_EARTH;
use crate::visualization::figure::{Figure, Shape};

/// Both |theta| and |omega| must drop below this to count as settled
pub const SETTLE_THRESHOLD: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct PendulumParams {
    pub start_angle: i64, // degrees
    pub damping: f64, // N s/m
    pub length: f64, // m
    pub gravity: f64, // m/s^2
    pub mass: f64, // kg
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            start_angle: 85,
            damping: 0.2,
            length: 1.0,
            gravity: G_EARTH,
            mass: 10.0,
        }
    }
}

impl PendulumParams {
    /// omega' = -c*omega/(m*L^2) - g*sin(theta)/L
    pub fn angular_acceleration(&self, theta: f64, omega: f64) -> f64 {
        -self.damping * omega / (self.mass * self.length * self.length)
            - self.gravity * theta.sin() / self.length
    }

    /// Bob position for angle `theta`, pivot at the origin
    pub fn bob(&self, theta: f64) -> NVec2 {
        NVec2::new(self.length * theta.sin(), -self.length * theta.cos())
    }
}

impl EulerModel for PendulumParams {
    fn step(&self, state: &mut StateVector, dt: f64) {
        state[1] += self.angular_acceleration(state[0], state[1]) * dt;
        state[0] += state[1] * dt;
    }

    fn terminated(&self, state: &StateVector) -> bool {
        state[0].abs() < SETTLE_THRESHOLD && state[1].abs() < SETTLE_THRESHOLD
    }
}

pub struct DampedOscillator {
    core: SimulationCore,
    pub params: PendulumParams,
}

impl DampedOscillator {
    pub fn new(engine: Engine) -> Self {
        Self {
            core: SimulationCore::new("Damped Oscillator", 2, engine),
            params: PendulumParams::default(),
        }
    }
}

impl Default for DampedOscillator {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Simulation for DampedOscillator {
    fn core(&self) -> &SimulationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SimulationCore {
        &mut self.core
    }

    fn initial_conditions(&mut self) -> StateVector {
        let state = StateVector::from_vec(vec![(self.params.start_angle as f64).to_radians(), 0.0]);
        self.core.seed(&state);
        state
    }

    fn simulate(&mut self, initial: &StateVector) -> &Trajectory {
        let run = integrate(&self.params, initial, &self.core.engine);
        self.core.store(run)
    }

    fn figure(&self) -> Figure {
        let l = self.params.length;
        self.core
            .figure()
            .limits((-l * 1.25, l * 1.25), (-l * 1.25, l * 0.5))
            .equal_aspect()
    }

    fn render_frame(&self, index: usize) -> Vec<Shape> {
        let bob = self.params.bob(self.core.frame(index)[0]);
        vec![Shape::line([NVec2::zeros(), bob]), Shape::marker(bob, 36.0)]
    }

    fn get_fields(&self) -> Fields {
        let p = &self.params;
        Fields(vec![
            Field::slider("start_angle", "Starting Angle", 0, 89, p.start_angle),
            Field::float("damping", "Damping Constant", p.damping).min(0.0001),
            Field::float("length", "String length", p.length).min(0.0001),
            Field::float("gravity", "Acceleration due to Gravity", p.gravity).min(1.0),
            Field::float("mass", "Bob Mass", p.mass).min(0.0001),
        ])
    }

    fn get_readings(&self) -> Readings {
        let state = self.core.current_state();
        self.core
            .readings()
            .with("theta", "Angular Position", state[0].to_degrees())
            .with("omega", "Angular Velocity", state[1])
            .build()
    }

    fn apply_parameter(&mut self, name: &str, value: ParamValue) {
        let p = &mut self.params;
        match name {
            "start_angle" => p.start_angle = value.int(),
            "damping" => p.damping = value.float(),
            "length" => p.length = value.float(),
            "gravity" => p.gravity = value.float(),
            "mass" => p.mass = value.float(),
            _ => {}
        }
    }
}
