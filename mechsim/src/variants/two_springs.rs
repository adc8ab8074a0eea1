//! Two bobs hanging in series from two springs
//!
//! State: `[y1, vy1, y2, vy2]`, y measured downwards from the ceiling.
//! Each bob is stepped position first, then velocity, top bob before the
//! bottom one; the bottom bob sees the top bob's new position. The run
//! stops once either bob is further than ten spring lengths away.

use crate::simulation::base::{Simulation, SimulationCore};
use crate::simulation::engine::Engine;
use crate::simulation::fields::{Field, Fields, Readings};
use crate::simulation::integrator::{integrate, EulerModel};
use crate::simulation::params::ParamValue;
use crate::simulation::states::{NVec2, StateVector, Trajectory};
use crate::variants::G_EARTH;
use crate::visualization::figure::{linspace, Figure, Shape};

/// Points along each drawn spring
const SPRING_POINTS: usize = 100;
/// Zigzag turns per drawn spring
const SPRING_TURNS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpringParams {
    pub gravity: f64, // m/s^2
    pub spring_length: f64, // natural length, m
    pub bob_mass: f64, // kg, both bobs
    pub spring_constant: f64, // N/m, both springs
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            gravity: G_EARTH,
            spring_length: 10.0,
            bob_mass: 1.0,
            spring_constant: 1.0,
        }
    }
}

impl SpringParams {
    /// Displacement past which a run counts as runaway
    pub fn runaway_bound(&self) -> f64 {
        self.spring_length * 10.0
    }

    /// Resting positions of (top, bottom) bob
    pub fn equilibrium(&self) -> (f64, f64) {
        let stretch = self.gravity * self.bob_mass / self.spring_constant;
        let y1 = self.spring_length + 2.0 * stretch;
        (y1, y1 + self.spring_length + stretch)
    }
}

impl EulerModel for SpringParams {
    fn step(&self, s: &mut StateVector, dt: f64) {
        let g = self.gravity;
        let w = self.spring_constant / self.bob_mass;
        let l = self.spring_length;

        s[0] += s[1] * dt;
        s[1] -= (-g + w * (2.0 * s[0] - s[2])) * dt;
        s[2] += s[3] * dt;
        s[3] -= (-g - w * (s[0] - s[2] + l)) * dt;
    }

    fn terminated(&self, s: &StateVector) -> bool {
        let bound = self.runaway_bound();
        s[0].abs() > bound || s[2].abs() > bound
    }
}

/// Zigzag from depth `start` to depth `end` on x = 0
fn spring_shape(start: f64, end: f64) -> Shape {
    let turns = linspace(0.0, 2.0 * std::f64::consts::PI * SPRING_TURNS, SPRING_POINTS);
    let depths = linspace(start, end, SPRING_POINTS);
    Shape::line(turns.zip(depths).map(|(phase, y)| NVec2::new(phase.sin(), y)))
}

pub struct TwoSprings {
    core: SimulationCore,
    pub params: SpringParams,
}

impl TwoSprings {
    pub fn new(engine: Engine) -> Self {
        Self {
            core: SimulationCore::new("Two Springs", 4, engine),
            params: SpringParams::default(),
        }
    }
}

impl Default for TwoSprings {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Simulation for TwoSprings {
    fn core(&self) -> &SimulationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SimulationCore {
        &mut self.core
    }

    fn initial_conditions(&mut self) -> StateVector {
        let l = self.params.spring_length;
        let state = StateVector::from_vec(vec![l, 0.0, l * 2.0, 0.0]);
        self.core.seed(&state);
        state
    }

    fn simulate(&mut self, initial: &StateVector) -> &Trajectory {
        let run = integrate(&self.params, initial, &self.core.engine);
        self.core.store(run)
    }

    fn figure(&self) -> Figure {
        let trajectory = self.core.trajectory();
        let deepest = trajectory.column_range(0).1.max(trajectory.column_range(2).1);
        let half_width = self.params.runaway_bound();
        // y axis runs downwards: bottom limit is the deepest point
        self.core.figure().limits((-half_width, half_width), (deepest, 0.0))
    }

    fn render_frame(&self, index: usize) -> Vec<Shape> {
        let row = self.core.frame(index);
        vec![
            spring_shape(0.0, row[0]),
            spring_shape(row[0], row[2]),
            Shape::marker(NVec2::new(0.0, row[0]), 100.0),
            Shape::marker(NVec2::new(0.0, row[2]), 100.0),
        ]
    }

    fn get_fields(&self) -> Fields {
        let p = &self.params;
        Fields(vec![
            Field::float("gravity", "Acceleration due to Gravity", p.gravity).min(1.0),
            Field::float("spring_length", "Length of String", p.spring_length).min(1.0),
            Field::float("bob_mass", "Mass of Bob", p.bob_mass).min(0.001),
            Field::float("spring_constant", "Spring Constant of String", p.spring_constant).min(0.001),
        ])
    }

    fn get_readings(&self) -> Readings {
        let s = self.core.current_state();
        self.core
            .readings()
            .with("y1", "Y Position of Top Bob", s[0])
            .with("vy1", "Y Velocity of Top Bob", s[1])
            .with("y2", "Y Position of Bottom Bob", s[2])
            .with("vy2", "Y Velocity of Bottom Bob", s[3])
            .build()
    }

    fn apply_parameter(&mut self, name: &str, value: ParamValue) {
        let p = &mut self.params;
        match name {
            "gravity" => p.gravity = value.float(),
            "spring_length" => p.spring_length = value.float(),
            "bob_mass" => p.bob_mass = value.float(),
            "spring_constant" => p.spring_constant = value.float(),
            _ => {}
        }
    }
}
