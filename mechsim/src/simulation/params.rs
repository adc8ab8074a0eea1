//! Parameter values and partial parameter changes
//!
//! `ParamValue` is what a presentation layer (or a scenario file) hands to
//! the update protocol: a boolean, an integer or a float. It is coerced to
//! the kind of the field it targets before being applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// Partial mapping parameter-name -> new value
pub type ParameterChanges = BTreeMap<String, ParamValue>;

/// Build a `ParameterChanges` from `(name, value)` pairs
pub fn changes<I, V>(pairs: I) -> ParameterChanges
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.into()))
        .collect()
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
        }
    }

    /// Numeric view, `None` for booleans
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            ParamValue::Bool(_) => None,
            ParamValue::Int(i) => Some(i as f64),
            ParamValue::Float(f) => Some(f),
        }
    }

    /// Coerce to a float field
    pub fn to_float(self, name: &str) -> Result<ParamValue, ParameterError> {
        match self.as_number() {
            Some(f) => Ok(ParamValue::Float(f)),
            None => Err(self.mismatch(name, "a number")),
        }
    }

    /// Coerce to an integer field, floats truncate toward zero
    pub fn to_int(self, name: &str) -> Result<ParamValue, ParameterError> {
        match self {
            ParamValue::Int(i) => Ok(ParamValue::Int(i)),
            ParamValue::Float(f) => Ok(ParamValue::Int(f.trunc() as i64)),
            ParamValue::Bool(_) => Err(self.mismatch(name, "a number")),
        }
    }

    /// Coerce to a checkbox field
    pub fn to_bool(self, name: &str) -> Result<ParamValue, ParameterError> {
        match self {
            ParamValue::Bool(b) => Ok(ParamValue::Bool(b)),
            _ => Err(self.mismatch(name, "a boolean")),
        }
    }

    /// Float payload of an already coerced value
    pub fn float(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Integer payload of an already coerced value
    pub fn int(&self) -> i64 {
        match *self {
            ParamValue::Int(i) => i,
            ParamValue::Float(f) => f.trunc() as i64,
            ParamValue::Bool(b) => b as i64,
        }
    }

    /// Boolean payload of an already coerced value
    pub fn flag(&self) -> bool {
        matches!(self, ParamValue::Bool(true))
    }

    fn mismatch(&self, name: &str, expected: &'static str) -> ParameterError {
        ParameterError::TypeMismatch {
            name: name.to_string(),
            expected,
            found: self.type_name(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_truncate_into_integer_fields() {
        assert_eq!(ParamValue::Float(79.9).to_int("slope_angle"), Ok(ParamValue::Int(79)));
        assert_eq!(ParamValue::Float(-2.5).to_int("x"), Ok(ParamValue::Int(-2)));
    }

    #[test]
    fn booleans_do_not_pass_as_numbers() {
        let err = ParamValue::Bool(true).to_float("mass").unwrap_err();
        assert_eq!(
            err,
            ParameterError::TypeMismatch {
                name: "mass".to_string(),
                expected: "a number",
                found: "bool",
            }
        );
    }

    #[test]
    fn yaml_values_pick_the_narrowest_kind() {
        let parsed: ParameterChanges =
            serde_yaml::from_str("slope_angle: 80\ndamping: 0.2\nair_resistance: true\n").unwrap();
        assert_eq!(parsed["slope_angle"], ParamValue::Int(80));
        assert_eq!(parsed["damping"], ParamValue::Float(0.2));
        assert_eq!(parsed["air_resistance"], ParamValue::Bool(true));
    }
}
