pub mod states;
pub mod params;
pub mod engine;
pub mod fields;
pub mod forces;
pub mod integrator;
pub mod base;
pub mod scenario;
