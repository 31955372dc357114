//! Filter Configuration

use crate::error::HampelError;
use crate::validator::Validator;
use crate::window::WindowStrategy;
use serde::{Deserialize, Serialize};

/// Default window radius
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default sigma multiplier
pub const DEFAULT_N_SIGMA: f64 = 3.0;

/// Hampel filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HampelConfig {
    /// Window radius k; each window spans up to 2k + 1 samples
    pub window_size: usize,

    /// Multiplier applied to the scaled MAD
    pub n_sigma: f64,

    /// Window statistics strategy
    pub strategy: WindowStrategy,

    /// Split the index range across threads (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for HampelConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            n_sigma: DEFAULT_N_SIGMA,
            strategy: WindowStrategy::Sorted,
            parallel: false,
        }
    }
}

impl HampelConfig {
    /// Create strict config (flags more points)
    pub fn strict() -> Self {
        Self {
            n_sigma: 2.0,
            ..Default::default()
        }
    }

    /// Create lenient config (flags only gross outliers)
    pub fn lenient() -> Self {
        Self {
            n_sigma: 5.0,
            ..Default::default()
        }
    }

    /// Check window radius and sigma multiplier
    pub fn validate(&self) -> Result<(), HampelError> {
        let validator = Validator;
        validator.check_window_size(self.window_size)?;
        validator.check_n_sigma(self.n_sigma)?;
        Ok(())
    }
}
