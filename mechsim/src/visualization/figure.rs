//! Backend-free description of what a simulation draws
//!
//! `get_figure()` hands a `Figure` to the presentation layer: axis limits,
//! the static backdrop (a slope, for example) and how many frames there are.
//! The moving part of each frame comes from `render_frame(i)` as a list of
//! `Shape`s, so a plotting backend never needs to know the state layout.

use std::time::Duration;

use serde::Serialize;

use crate::simulation::states::NVec2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Polyline through `points`
    Line { points: Vec<[f64; 2]> },
    /// Point marker, `size` in screen units (backend decides scale)
    Marker { at: [f64; 2], size: f64 },
    /// Circle in data units
    Circle { center: [f64; 2], radius: f64 },
}

impl Shape {
    pub fn line<I: IntoIterator<Item = NVec2>>(points: I) -> Self {
        Shape::Line {
            points: points.into_iter().map(|p| [p.x, p.y]).collect(),
        }
    }

    pub fn marker(at: NVec2, size: f64) -> Self {
        Shape::Marker { at: [at.x, at.y], size }
    }

    pub fn circle(center: NVec2, radius: f64) -> Self {
        Shape::Circle { center: [center.x, center.y], radius }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64), // (bottom, top), may be inverted
    pub equal_aspect: bool,
    pub backdrop: Vec<Shape>,
    pub frame_count: usize,
    #[serde(skip)]
    pub interval: Duration,
}

impl Figure {
    pub fn new(title: &str, frame_count: usize, interval: Duration) -> Self {
        Self {
            title: title.to_string(),
            x_limits: (-1.0, 1.0),
            y_limits: (-1.0, 1.0),
            equal_aspect: false,
            backdrop: Vec::new(),
            frame_count,
            interval,
        }
    }

    pub fn limits(mut self, x: (f64, f64), y: (f64, f64)) -> Self {
        self.x_limits = x;
        self.y_limits = y;
        self
    }

    pub fn equal_aspect(mut self) -> Self {
        self.equal_aspect = true;
        self
    }

    pub fn with_backdrop(mut self, shape: Shape) -> Self {
        self.backdrop.push(shape);
        self
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| start + step * i as f64)
}

/// Smallest (lo, hi) covering every value, padded by `margin` of the span
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I, margin: f64) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * margin).max(1e-9);
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let v: Vec<f64> = linspace(-1.0, 1.0, 5).collect();
        assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn padded_range_of_nothing_is_unit() {
        assert_eq!(padded_range(std::iter::empty(), 0.05), (-1.0, 1.0));
    }
}
