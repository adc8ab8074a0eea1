//! Field and reading metadata handed to the presentation layer
//!
//! - `Fields`: the editable parameters of a simulation, each with a widget
//!   kind, bounds, label and current value
//! - `Readings`: labeled values derived from the state vector at the
//!   current frame offset, rounded to the engine precision
//!
//! Both are rebuilt on every call from the live simulation, nothing here
//! is cached.

use serde::Serialize;

use crate::error::ParameterError;
use crate::simulation::engine::BoundsPolicy;
use crate::simulation::params::ParamValue;

/// Widget kind of an editable parameter, with its bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Slider { min: i64, max: i64 }, // integer range, always bounded
    Integer { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub value: ParamValue,
}

impl Field {
    pub fn slider(name: &'static str, label: &'static str, min: i64, max: i64, value: i64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Slider { min, max },
            value: ParamValue::Int(value),
        }
    }

    pub fn integer(name: &'static str, label: &'static str, value: i64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Integer { min: None, max: None },
            value: ParamValue::Int(value),
        }
    }

    pub fn float(name: &'static str, label: &'static str, value: f64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Float { min: None, max: None },
            value: ParamValue::Float(value),
        }
    }

    pub fn checkbox(name: &'static str, label: &'static str, value: bool) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Checkbox,
            value: ParamValue::Bool(value),
        }
    }

    /// Lower bound for integer and float fields
    pub fn min(mut self, bound: f64) -> Self {
        match &mut self.kind {
            FieldKind::Integer { min, .. } => *min = Some(bound as i64),
            FieldKind::Float { min, .. } => *min = Some(bound),
            FieldKind::Slider { .. } | FieldKind::Checkbox => {}
        }
        self
    }

    /// Upper bound for integer and float fields
    pub fn max(mut self, bound: f64) -> Self {
        match &mut self.kind {
            FieldKind::Integer { max, .. } => *max = Some(bound as i64),
            FieldKind::Float { max, .. } => *max = Some(bound),
            FieldKind::Slider { .. } | FieldKind::Checkbox => {}
        }
        self
    }

    /// (min, max) as floats, unbounded sides are infinite
    pub fn bounds(&self) -> (f64, f64) {
        let lo = f64::NEG_INFINITY;
        let hi = f64::INFINITY;
        match self.kind {
            FieldKind::Slider { min, max } => (min as f64, max as f64),
            FieldKind::Integer { min, max } => (
                min.map_or(lo, |m| m as f64),
                max.map_or(hi, |m| m as f64),
            ),
            FieldKind::Float { min, max } => (min.unwrap_or(lo), max.unwrap_or(hi)),
            FieldKind::Checkbox => (lo, hi),
        }
    }

    pub fn within_bounds(&self, value: &ParamValue) -> bool {
        match value.as_number() {
            Some(v) => {
                let (lo, hi) = self.bounds();
                v >= lo && v <= hi
            }
            None => true,
        }
    }

    /// Coerce `value` to this field's kind and apply the bounds policy
    pub fn coerce(&self, value: ParamValue, policy: BoundsPolicy) -> Result<ParamValue, ParameterError> {
        let coerced = match self.kind {
            FieldKind::Slider { .. } | FieldKind::Integer { .. } => value.to_int(self.name)?,
            FieldKind::Float { .. } => value.to_float(self.name)?,
            FieldKind::Checkbox => value.to_bool(self.name)?,
        };

        if !self.within_bounds(&coerced) {
            match policy {
                BoundsPolicy::Advisory => {
                    tracing::debug!(field = self.name, value = %coerced, "accepting value outside advisory bounds");
                }
                BoundsPolicy::Enforce => {
                    let (lo, hi) = self.bounds();
                    return Err(ParameterError::OutOfRange {
                        name: self.name.to_string(),
                        value: coerced.float(),
                        bounds: format!("[{}, {}]", lo, hi),
                    });
                }
            }
        }

        Ok(coerced)
    }
}

/// Editable parameters of one simulation, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(pub Vec<Field>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub name: &'static str,
    pub label: &'static str,
    pub value: f64,
}

/// Display values at the current frame offset, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Readings(pub Vec<Reading>);

impl Readings {
    /// Start an empty set rounding every value to `places` decimals
    pub fn builder(places: u32) -> ReadingsBuilder {
        ReadingsBuilder {
            places,
            readings: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|r| r.name == name).map(|r| r.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct ReadingsBuilder {
    places: u32,
    readings: Vec<Reading>,
}

impl ReadingsBuilder {
    pub fn with(mut self, name: &'static str, label: &'static str, value: f64) -> Self {
        self.readings.push(Reading {
            name,
            label,
            value: round_to(value, self.places),
        });
        self
    }

    pub fn build(self) -> Readings {
        Readings(self.readings)
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() { rounded } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_keeps_requested_places() {
        assert_eq!(round_to(1.234_567_89, 5), 1.234_57);
        assert_eq!(round_to(-0.000_004, 5), -0.0);
        assert_eq!(round_to(42.0, 0), 42.0);
    }

    #[test]
    fn slider_coerces_and_enforces() {
        let f = Field::slider("slope_angle", "Slope Angle", 0, 89, 30);
        assert_eq!(f.coerce(ParamValue::Float(80.6), BoundsPolicy::Enforce), Ok(ParamValue::Int(80)));
        assert!(f.coerce(ParamValue::Int(120), BoundsPolicy::Advisory).is_ok());
        assert!(matches!(
            f.coerce(ParamValue::Int(120), BoundsPolicy::Enforce),
            Err(ParameterError::OutOfRange { .. })
        ));
    }

    #[test]
    fn open_ended_float_only_checks_its_min() {
        let f = Field::float("mass", "Bob Mass", 10.0).min(0.0001);
        assert!(f.within_bounds(&ParamValue::Float(1e9)));
        assert!(!f.within_bounds(&ParamValue::Float(-1.0)));
    }

    #[test]
    fn checkbox_only_takes_booleans() {
        let f = Field::checkbox("air_resistance", "Air Resistance", false);
        assert!(f.coerce(ParamValue::Int(1), BoundsPolicy::Advisory).is_err());
        assert_eq!(f.coerce(ParamValue::Bool(true), BoundsPolicy::Enforce), Ok(ParamValue::Bool(true)));
    }
}
