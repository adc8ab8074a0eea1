//! Scattering of a moving particle off a particle at rest
//!
//! State: `[x1, y1, x2, y2, vx1, vy1, vx2, vy2]`, particle 1 is launched
//! along +x with impact parameter `b`, particle 2 starts at the origin.
//!
//! Between contacts both particles drift freely. Whenever they are closer
//! than `r1 + r2` after a step, the contact impulse redirects them:
//!
//! ```text
//! theta = atan2(b, r1 + r2)
//! v1    = speed * (cos theta, sin theta)
//! v2    = (m1 / m2) * (v1x, -v1y)
//! ```
//!
//! The impulse depends only on the parameters, so it is applied again on
//! every step the particles are still overlapping and gives the same
//! velocities each time. Multiple distinct collisions are not modelled.

use crate::simulation::base::{Simulation, SimulationCore};
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Field, Fields, Readings};
use crate::simulation::integrator::{integrate, EulerModel};
use crate::simulation::params::ParamValue;
use crate::simulation::states::{NVec2, StateVector, Trajectory};
use crate::visualization::figure::{Figure, Shape};

const X1: usize = 0;
const Y1: usize = 1;
const X2: usize = 2;
const Y2: usize = 3;
const VX1: usize = 4;
const VY1: usize = 5;
const VX2: usize = 6;
const VY2: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringParams {
    pub r1: f64, // moving particle radius, m
    pub r2: f64, // static particle radius, m
    pub speed: f64, // launch speed, m/s
    pub b: f64, // impact parameter, m
    pub mass1: f64, // kg
    pub mass2: f64, // kg
}

impl Default for ScatteringParams {
    fn default() -> Self {
        Self {
            r1: 3.0,
            r2: 4.0,
            speed: 10.0,
            b: 5.0,
            mass1: 1.0,
            mass2: 2.0,
        }
    }
}

impl ScatteringParams {
    /// Half-width of the square the particles must stay inside
    pub fn axis_size(&self) -> f64 {
        (self.speed * 4.0).max(self.b * 1.25)
    }

    pub fn contact_distance(&self) -> f64 {
        self.r1 + self.r2
    }

    /// Velocities of both particles right after contact
    pub fn contact_impulse(&self) -> (NVec2, NVec2) {
        let theta = self.b.atan2(self.contact_distance());
        let v1 = NVec2::new(theta.cos(), theta.sin()) * self.speed;
        let ratio = self.mass1 / self.mass2;
        let v2 = NVec2::new(ratio * v1.x, -ratio * v1.y);
        (v1, v2)
    }
}

impl EulerModel for ScatteringParams {
    fn step(&self, state: &mut StateVector, dt: f64) {
        state[X1] += state[VX1] * dt;
        state[Y1] += state[VY1] * dt;
        state[X2] += state[VX2] * dt;
        state[Y2] += state[VY2] * dt;

        let separation = separation(state);
        if separation < self.contact_distance() {
            let (v1, v2) = self.contact_impulse();
            state[VX1] = v1.x;
            state[VY1] = v1.y;
            state[VX2] = v2.x;
            state[VY2] = v2.y;
        }
    }

    fn terminated(&self, state: &StateVector) -> bool {
        let bound = self.axis_size();
        [X1, Y1, X2, Y2].iter().any(|&i| state[i].abs() > bound)
    }
}

/// Centre-to-centre distance of the two particles
pub fn separation(state: &StateVector) -> f64 {
    (state[X1] - state[X2]).hypot(state[Y1] - state[Y2])
}

pub struct Scattering {
    core: SimulationCore,
    pub params: ScatteringParams,
}

impl Scattering {
    pub fn new(engine: Engine) -> Self {
        Self {
            core: SimulationCore::new("Scattering", 8, engine),
            params: ScatteringParams::default(),
        }
    }
}

impl Default for Scattering {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Simulation for Scattering {
    fn core(&self) -> &SimulationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SimulationCore {
        &mut self.core
    }

    fn initial_conditions(&mut self) -> StateVector {
        let p = &self.params;
        let mut state = StateVector::zeros(8);
        state[X1] = -p.speed * 3.0;
        state[Y1] = p.b;
        state[VX1] = p.speed;
        self.core.seed(&state);
        state
    }

    fn simulate(&mut self, initial: &StateVector) -> &Trajectory {
        let run = integrate(&self.params, initial, &self.core.engine);
        self.core.store(run)
    }

    fn figure(&self) -> Figure {
        let s = self.params.axis_size();
        self.core.figure().limits((-s, s), (-s, s)).equal_aspect()
    }

    fn render_frame(&self, index: usize) -> Vec<Shape> {
        let row = self.core.frame(index);
        vec![
            Shape::circle(NVec2::new(row[X1], row[Y1]), self.params.r1),
            Shape::circle(NVec2::new(row[X2], row[Y2]), self.params.r2),
        ]
    }

    fn get_fields(&self) -> Fields {
        let p = &self.params;
        Fields(vec![
            Field::float("r1", "Moving Particle Radius", p.r1).min(0.001),
            Field::float("r2", "Static Particle Radius", p.r2).min(0.001),
            Field::float("b", "Impact Parameter", p.b).min(0.0),
            Field::float("speed", "Launch Speed", p.speed).min(1.0),
            Field::float("mass1", "Moving Particle Mass", p.mass1).min(0.001),
            Field::float("mass2", "Static Particle Mass", p.mass2).min(0.001),
        ])
    }

    fn get_readings(&self) -> Readings {
        let s = self.core.current_state();
        self.core
            .readings()
            .with("x1", "X Position of Moving Particle", s[X1])
            .with("y1", "Y Position of Moving Particle", s[Y1])
            .with("vx1", "X Velocity of Moving Particle", s[VX1])
            .with("vy1", "Y Velocity of Moving Particle", s[VY1])
            .with("theta", "Angle of Scattering", s[VY1].atan2(s[VX1]).to_degrees())
            .with("x2", "X Position of Static Particle", s[X2])
            .with("y2", "Y Position of Static Particle", s[Y2])
            .with("vx2", "X Velocity of Static Particle", s[VX2])
            .with("vy2", "Y Velocity of Static Particle", s[VY2])
            .build()
    }

    fn apply_parameter(&mut self, name: &str, value: ParamValue) {
        let p = &mut self.params;
        match name {
            "r1" => p.r1 = value.float(),
            "r2" => p.r2 = value.float(),
            "b" => p.b = value.float(),
            "speed" => p.speed = value.float(),
            "mass1" => p.mass1 = value.float(),
            "mass2" => p.mass2 = value.float(),
            _ => {}
        }
    }
}
