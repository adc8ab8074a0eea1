//! High-level runtime engine settings
//!
//! Shared by every simulation variant: how long to simulate, how finely,
//! how readings are rounded, the hard step cap, and whether field bounds
//! are enforced when parameters are updated

use serde::Deserialize;
use std::time::Duration;

/// What the update protocol does with values outside a field's bounds
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Bounds are presentation metadata, out-of-range values are accepted
    #[default]
    Advisory,
    /// Out-of-range values are rejected and nothing is applied
    Enforce,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    pub sim_length: u32, // logical seconds to simulate
    pub steps_per_second: u32, // integration resolution, dt = 1 / steps_per_second
    pub round: u32, // decimal places of readings
    pub max_steps: usize, // hard step cap, stops runs that never terminate
    pub bounds: BoundsPolicy, // field bound handling on update
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            sim_length: 10_000,
            steps_per_second: 25,
            round: 5,
            max_steps: 50_000,
            bounds: BoundsPolicy::Advisory,
        }
    }
}

impl Engine {
    /// Fixed time step in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.steps_per_second as f64
    }

    /// Steps the configured length asks for, before the cap
    pub fn requested_steps(&self) -> usize {
        self.sim_length as usize * self.steps_per_second as usize
    }

    /// Steps the integrator may actually take
    pub fn step_budget(&self) -> usize {
        self.requested_steps().min(self.max_steps)
    }

    /// Wall-clock time between animation frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(self.dt())
    }
}
