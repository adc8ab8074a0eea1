//! Core state types for the mechanics simulations.
//!
//! Defines the flat state vector and the trajectory built from it:
//! - `StateVector` one snapshot of a variant's dynamical variables
//! - `Trajectory` every snapshot of one run, starting at the initial condition
//!
//! The meaning of each slot is fixed per variant (see `variants`), the
//! length is declared once when the variant is constructed.

use nalgebra::{DVector, Vector2};

pub type NVec2 = Vector2<f64>;
pub type StateVector = DVector<f64>;

/// Ordered sequence of state vectors, one per simulated step.
///
/// Never empty: it always holds at least the initial state. A run replaces
/// the whole trajectory, rows are only ever appended while integrating.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dim: usize, // state vector length
    rows: Vec<StateVector>, // row 0 is t = 0
}

impl Trajectory {
    /// A placeholder trajectory: a single zero row of length `dim`
    pub fn reset(dim: usize) -> Self {
        Self {
            dim,
            rows: vec![StateVector::zeros(dim)],
        }
    }

    /// Start a trajectory from its initial condition
    pub fn from_initial(initial: StateVector) -> Self {
        Self {
            dim: initial.len(),
            rows: vec![initial],
        }
    }

    /// Append the state reached after one more step
    pub fn push(&mut self, state: StateVector) {
        debug_assert_eq!(state.len(), self.dim, "state vector length changed mid-run");
        self.rows.push(state);
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false, kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> &StateVector {
        &self.rows[0]
    }

    pub fn last(&self) -> &StateVector {
        &self.rows[self.rows.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&StateVector> {
        self.rows.get(index)
    }

    /// Row at `offset`, or the last row when `offset` runs past the end.
    ///
    /// The rendering driver may still hold an offset from a longer run after
    /// a parameter change shortened the trajectory.
    pub fn frame(&self, offset: usize) -> &StateVector {
        self.rows.get(offset).unwrap_or_else(|| self.last())
    }

    /// Index `offset` resolves to after clamping
    pub fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.rows.len() - 1)
    }

    pub fn rows(&self) -> &[StateVector] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateVector> {
        self.rows.iter()
    }

    /// Every value of slot `slot` over time
    pub fn column(&self, slot: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[slot]).collect()
    }

    /// (min, max) of slot `slot` over the whole run
    pub fn column_range(&self, slot: usize) -> (f64, f64) {
        self.rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), row| {
            (lo.min(row[slot]), hi.max(row[slot]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_holds_one_zero_row() {
        let t = Trajectory::reset(4);
        assert_eq!(t.len(), 1);
        assert_eq!(t.dim(), 4);
        assert!(t.first().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn frame_clamps_past_the_end() {
        let mut t = Trajectory::from_initial(StateVector::from_vec(vec![0.0, 1.0]));
        t.push(StateVector::from_vec(vec![1.0, 2.0]));
        t.push(StateVector::from_vec(vec![2.0, 3.0]));

        assert_eq!(t.frame(1)[0], 1.0);
        assert_eq!(t.frame(99), t.last());
        assert_eq!(t.clamp_offset(99), 2);
    }

    #[test]
    fn column_range_spans_all_rows() {
        let mut t = Trajectory::from_initial(StateVector::from_vec(vec![0.5]));
        t.push(StateVector::from_vec(vec![-2.0]));
        t.push(StateVector::from_vec(vec![3.0]));

        assert_eq!(t.column(0), vec![0.5, -2.0, 3.0]);
        assert_eq!(t.column_range(0), (-2.0, 3.0));
    }
}
