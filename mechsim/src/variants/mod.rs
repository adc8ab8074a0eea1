//! The concrete simulations and the table that registers them
//!
//! A presentation layer discovers what it can show through `REGISTRY`
//! (or `build_all`) instead of scanning for modules at runtime.

pub mod damped_oscillator;
pub mod object_off_slope;
pub mod particle_off_slope;
pub mod scattering;
pub mod slope;
pub mod two_springs;

use crate::simulation::base::Simulation;
use crate::simulation::engine::Engine;

pub use damped_oscillator::DampedOscillator;
pub use object_off_slope::ObjectOffSlope;
pub use particle_off_slope::ParticleOffSlope;
pub use scattering::Scattering;
pub use two_springs::TwoSprings;

/// Acceleration due to gravity on Earth, m/s^2
pub const G_EARTH: f64 = 9.807;

/// One registered simulation: a stable key and a constructor
pub struct VariantEntry {
    pub key: &'static str,
    pub build: fn(Engine) -> Box<dyn Simulation>,
}

pub const REGISTRY: &[VariantEntry] = &[
    VariantEntry { key: "damped_oscillator", build: boxed_damped_oscillator },
    VariantEntry { key: "object_off_slope", build: boxed_object_off_slope },
    VariantEntry { key: "particle_off_slope", build: boxed_particle_off_slope },
    VariantEntry { key: "scattering", build: boxed_scattering },
    VariantEntry { key: "two_springs", build: boxed_two_springs },
];

fn boxed_damped_oscillator(engine: Engine) -> Box<dyn Simulation> {
    Box::new(DampedOscillator::new(engine))
}

fn boxed_object_off_slope(engine: Engine) -> Box<dyn Simulation> {
    Box::new(ObjectOffSlope::new(engine))
}

fn boxed_particle_off_slope(engine: Engine) -> Box<dyn Simulation> {
    Box::new(ParticleOffSlope::new(engine))
}

fn boxed_scattering(engine: Engine) -> Box<dyn Simulation> {
    Box::new(Scattering::new(engine))
}

fn boxed_two_springs(engine: Engine) -> Box<dyn Simulation> {
    Box::new(TwoSprings::new(engine))
}

/// Registered keys, in registration order
pub fn keys() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.key)
}

/// Build the simulation registered under `key`
pub fn build(key: &str, engine: Engine) -> Option<Box<dyn Simulation>> {
    REGISTRY
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| (entry.build)(engine))
}

/// One instance of every registered simulation
pub fn build_all(engine: Engine) -> Vec<(&'static str, Box<dyn Simulation>)> {
    REGISTRY
        .iter()
        .map(|entry| (entry.key, (entry.build)(engine)))
        .collect()
}
