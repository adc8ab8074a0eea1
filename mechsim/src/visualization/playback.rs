//! Animation driver for a figure
//!
//! `Playback` walks the frames of a `Figure` the way a periodic timer
//! callback would: every `tick` writes the frame offset into the simulation
//! (so `get_readings()` follows the animation) and returns that frame's
//! moving shapes.

use std::time::Duration;

use crate::simulation::base::Simulation;
use crate::visualization::figure::{Figure, Shape};

#[derive(Debug, Clone)]
pub struct Playback {
    frame: usize, // next frame to show
    frame_count: usize,
    interval: Duration,
}

impl Playback {
    pub fn new(figure: &Figure) -> Self {
        Self {
            frame: 0,
            frame_count: figure.frame_count,
            interval: figure.interval,
        }
    }

    /// Show the next frame, `None` once every frame has been shown
    pub fn tick(&mut self, sim: &mut dyn Simulation) -> Option<Vec<Shape>> {
        if self.is_finished() {
            return None;
        }
        let i = self.frame;
        sim.set_offset(i);
        self.frame += 1;
        Some(sim.render_frame(i))
    }

    /// Jump to `frame` without drawing
    pub fn seek(&mut self, frame: usize) {
        self.frame = frame.min(self.frame_count);
    }

    /// Frame the next `tick` shows
    pub fn position(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frame_count
    }
}
