//! Hampel Error Types

use thiserror::Error;

/// Errors raised before any filtering takes place
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HampelError {
    /// Parameter has the wrong type or is out of range
    #[error("Invalid argument `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: &'static str,
    },

    /// Sample is NaN or infinite
    #[error("Invalid argument `values`: sample at index {index} is not finite")]
    NonFiniteValue { index: usize },
}

impl HampelError {
    pub(crate) fn invalid(param: &'static str, reason: &'static str) -> Self {
        HampelError::InvalidArgument { param, reason }
    }

    /// Whether this error belongs to the invalid-argument class
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            HampelError::InvalidArgument { .. } | HampelError::NonFiniteValue { .. }
        )
    }

    /// Human-readable reason without the parameter prefix
    pub fn reason(&self) -> &'static str {
        match self {
            HampelError::InvalidArgument { reason, .. } => reason,
            HampelError::NonFiniteValue { .. } => "input must contain only finite values",
        }
    }
}
