//! Parameter and Input Validation
//!
//! Runs before the filter is constructed. Dynamic front ends hand over
//! untyped [`RawParam`]s; typed callers go through the `check_*` methods.

use crate::error::HampelError;
use num_traits::Float;
use serde::{Deserialize, Serialize};

pub const WINDOW_NOT_INTEGER: &str = "window size must be an integer";
pub const WINDOW_NOT_POSITIVE: &str = "window size must be > 0";
pub const SIGMA_NOT_FLOAT: &str = "n_sigma must be a float";
pub const SIGMA_NEGATIVE: &str = "n_sigma must be >= 0";
pub const VALUES_NOT_NUMERIC: &str = "input must be a flat numeric sequence";

/// Untyped argument as supplied by a dynamic caller (JSON, CLI text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<RawParam>),
}

impl RawParam {
    /// Parse a text token, keeping integers and floats apart
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Ok(i) = token.parse::<i64>() {
            RawParam::Int(i)
        } else if let Ok(f) = token.parse::<f64>() {
            RawParam::Float(f)
        } else {
            RawParam::Text(token.to_string())
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            RawParam::Int(i) => Some(*i as f64),
            RawParam::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<i64> for RawParam {
    fn from(v: i64) -> Self {
        RawParam::Int(v)
    }
}

impl From<f64> for RawParam {
    fn from(v: f64) -> Self {
        RawParam::Float(v)
    }
}

impl From<&str> for RawParam {
    fn from(v: &str) -> Self {
        RawParam::Text(v.to_string())
    }
}

/// Stateless validator for filter arguments
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Validate an untyped window radius
    pub fn window_size(&self, raw: &RawParam) -> Result<usize, HampelError> {
        match raw {
            RawParam::Int(i) if *i <= 0 => {
                Err(HampelError::invalid("window_size", WINDOW_NOT_POSITIVE))
            }
            RawParam::Int(i) => usize::try_from(*i)
                .map_err(|_| HampelError::invalid("window_size", WINDOW_NOT_INTEGER)),
            _ => Err(HampelError::invalid("window_size", WINDOW_NOT_INTEGER)),
        }
    }

    /// Validate an untyped sigma multiplier
    pub fn n_sigma(&self, raw: &RawParam) -> Result<f64, HampelError> {
        let value = raw
            .as_real()
            .ok_or_else(|| HampelError::invalid("n_sigma", SIGMA_NOT_FLOAT))?;
        self.check_n_sigma(value)
    }

    /// Validate an untyped sequence, producing the canonical numeric array
    pub fn values(&self, raw: &[RawParam]) -> Result<Vec<f64>, HampelError> {
        let values = raw
            .iter()
            .map(|r| r.as_real())
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| HampelError::invalid("values", VALUES_NOT_NUMERIC))?;
        self.check_values(&values)?;
        Ok(values)
    }

    /// Validate a typed window radius
    pub fn check_window_size(&self, window_size: usize) -> Result<usize, HampelError> {
        if window_size == 0 {
            Err(HampelError::invalid("window_size", WINDOW_NOT_POSITIVE))
        } else {
            Ok(window_size)
        }
    }

    /// Validate a typed sigma multiplier
    pub fn check_n_sigma<T: Float>(&self, n_sigma: T) -> Result<T, HampelError> {
        if !n_sigma.is_finite() {
            return Err(HampelError::invalid("n_sigma", SIGMA_NOT_FLOAT));
        }
        if n_sigma < T::zero() {
            return Err(HampelError::invalid("n_sigma", SIGMA_NEGATIVE));
        }
        Ok(n_sigma)
    }

    /// Reject NaN and infinite samples
    pub fn check_values<T: Float>(&self, values: &[T]) -> Result<(), HampelError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(HampelError::NonFiniteValue { index }),
            None => Ok(()),
        }
    }
}
