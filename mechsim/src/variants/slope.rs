//! Shared pieces of the two "launch off a slope" variants
//!
//! A body leaves the origin at `launch_angle` above the horizontal and
//! flies until it drops below the slope line `y = -tan(slope_angle) * x`.
//! Position is integrated from the previous velocity first, then the
//! velocity is updated (explicit Euler).

use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::EulerModel;
use crate::simulation::states::{NVec2, StateVector, Trajectory};
use crate::visualization::figure::{linspace, padded_range, Figure, Shape};

/// State slots: `[x, y, vx, vy]`
pub const STATE_LENGTH: usize = 4;

/// Projectile over a slope, driven by an acceleration set
pub struct SlopeFlight {
    pub forces: AccelSet,
    pub slope_angle: i64, // degrees below the horizontal
}

impl SlopeFlight {
    pub fn gradient(&self) -> f64 {
        slope_gradient(self.slope_angle)
    }
}

impl EulerModel for SlopeFlight {
    fn step(&self, state: &mut StateVector, dt: f64) {
        let x = NVec2::new(state[0], state[1]);
        let v = NVec2::new(state[2], state[3]);
        let a = self.forces.accumulate(&x, &v);

        let x = x + v * dt;
        let v = v + a * dt;

        state[0] = x.x;
        state[1] = x.y;
        state[2] = v.x;
        state[3] = v.y;
    }

    fn terminated(&self, state: &StateVector) -> bool {
        below_slope(self.gradient(), state[0], state[1])
    }
}

/// tan of the slope angle, the slope line is `y = -gradient * x`
pub fn slope_gradient(slope_angle: i64) -> f64 {
    (slope_angle as f64).to_radians().tan()
}

pub fn below_slope(gradient: f64, x: f64, y: f64) -> bool {
    y < -gradient * x
}

/// `[0, 0, speed*cos(launch), speed*sin(launch)]`
pub fn launch_state(speed: f64, launch_angle: i64) -> StateVector {
    let a = (launch_angle as f64).to_radians();
    StateVector::from_vec(vec![0.0, 0.0, speed * a.cos(), speed * a.sin()])
}

/// Slope line across the flight and limits covering it and the path
pub fn slope_figure(base: Figure, trajectory: &Trajectory, slope_angle: i64) -> Figure {
    let gradient = slope_gradient(slope_angle);
    let x_end = trajectory.last()[0];
    let slope: Vec<NVec2> = linspace(x_end * -0.1, x_end * 1.1, 100)
        .map(|x| NVec2::new(x, -gradient * x))
        .collect();

    let xs = trajectory.column(0).into_iter().chain(slope.iter().map(|p| p.x));
    let ys = trajectory.column(1).into_iter().chain(slope.iter().map(|p| p.y));
    let x_limits = padded_range(xs, 0.05);
    let y_limits = padded_range(ys, 0.05);

    base.limits(x_limits, y_limits)
        .equal_aspect()
        .with_backdrop(Shape::line(slope))
}

/// Marker at the body's position in `row`
pub fn body_marker(row: &StateVector) -> Shape {
    Shape::marker(NVec2::new(row[0], row[1]), 100.0)
}
