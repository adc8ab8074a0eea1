//! Acceleration contributors for planar point bodies
//!
//! Defines the `Acceleration` trait, the `AccelSet` that sums terms, and
//! the terms the projectile variants use: uniform gravity and quadratic
//! air drag

use crate::simulation::states::NVec2;

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total acceleration of a body at position `x` moving with `v`
    pub fn accumulate(&self, x: &NVec2, v: &NVec2) -> NVec2 {
        self.terms
            .iter()
            .fold(NVec2::zeros(), |acc, term| acc + term.acceleration(x, v))
    }
}

/// Trait for acceleration sources acting on a single planar body
pub trait Acceleration {
    fn acceleration(&self, x: &NVec2, v: &NVec2) -> NVec2;
}

/// Constant downward pull, `g` in m/s^2
pub struct UniformGravity {
    pub g: f64,
}

impl Acceleration for UniformGravity {
    fn acceleration(&self, _x: &NVec2, _v: &NVec2) -> NVec2 {
        NVec2::new(0.0, -self.g)
    }
}

/// Quadratic air drag applied per axis:
/// a_i = -0.5 * rho * Cd * v_i * |v_i| / m
///
/// Each component is damped by its own speed, not by |v|, so horizontal
/// and vertical motion decay independently
pub struct QuadraticDrag {
    pub air_density: f64, // rho, kg/m^3
    pub drag_coefficient: f64, // Cd, dimensionless
    pub mass: f64, // kg
}

impl Acceleration for QuadraticDrag {
    fn acceleration(&self, _x: &NVec2, v: &NVec2) -> NVec2 {
        let k = 0.5 * self.air_density * self.drag_coefficient / self.mass;
        v.map(|c| -k * c * c.abs())
    }
}
