//! Hampel Filter for Outlier Detection and Correction

use crate::config::HampelConfig;
use crate::error::HampelError;
use crate::result::HampelResult;
use crate::statistics::MAD_SCALE;
use crate::validator::Validator;
use crate::window::{window_stats, WindowStrategy};
use num_traits::Float;
use tracing::{debug, trace};

const SCALE_NOT_REPRESENTABLE: &str = "sample type cannot represent the MAD scale";

#[cfg(feature = "parallel")]
const MIN_PARALLEL_CHUNK: usize = 4096;

/// Centered sliding-window Hampel identifier
#[derive(Debug, Clone, PartialEq)]
pub struct HampelFilter {
    window_size: usize,
    n_sigma: f64,
    strategy: WindowStrategy,
    parallel: bool,
}

impl HampelFilter {
    /// Create a filter with window radius `window_size` and multiplier `n_sigma`
    pub fn new(window_size: usize, n_sigma: f64) -> Result<Self, HampelError> {
        Self::from_config(&HampelConfig {
            window_size,
            n_sigma,
            ..Default::default()
        })
    }

    /// Create a filter from a validated configuration
    pub fn from_config(config: &HampelConfig) -> Result<Self, HampelError> {
        config.validate()?;
        Ok(Self {
            window_size: config.window_size,
            n_sigma: config.n_sigma,
            strategy: config.strategy,
            parallel: config.parallel,
        })
    }

    /// Use a different window statistics strategy
    pub fn with_strategy(mut self, strategy: WindowStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Split work across threads when the `parallel` feature is enabled
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn n_sigma(&self) -> f64 {
        self.n_sigma
    }

    pub fn strategy(&self) -> WindowStrategy {
        self.strategy
    }

    /// Run the filter over `values`.
    ///
    /// Fails with an invalid-argument error if any sample is NaN or infinite;
    /// an empty slice yields an empty result.
    pub fn filter<T>(&self, values: &[T]) -> Result<HampelResult<T>, HampelError>
    where
        T: Float + Send + Sync,
    {
        Validator.check_values(values)?;
        // n_sigma beyond the range of T saturates; a zero MAD still gives a zero threshold
        let n_sigma = T::from(self.n_sigma)
            .map_or(T::max_value(), |s| s.min(T::max_value()));
        let scale = T::from(MAD_SCALE)
            .ok_or(HampelError::invalid("values", SCALE_NOT_REPRESENTABLE))?;

        let n = values.len();
        if n == 0 {
            return Ok(HampelResult::empty());
        }
        if self.window_size >= n {
            debug!(
                window_size = self.window_size,
                n, "Window covers the whole sequence; using global median/MAD"
            );
        }

        let stats = self.collect_stats(values);

        let mut result = HampelResult {
            filtered_data: Vec::with_capacity(n),
            outlier_indices: Vec::new(),
            medians: Vec::with_capacity(n),
            median_absolute_deviations: Vec::with_capacity(n),
            thresholds: Vec::with_capacity(n),
        };

        for (i, (&value, (median, raw_mad))) in values.iter().zip(stats).enumerate() {
            let mad = raw_mad * scale;
            let threshold = n_sigma * mad;
            let deviation = (value - median).abs();

            if deviation > threshold {
                trace!(index = i, "Sample flagged as outlier");
                result.outlier_indices.push(i);
                result.filtered_data.push(median);
            } else {
                result.filtered_data.push(value);
            }
            result.medians.push(median);
            result.median_absolute_deviations.push(mad);
            result.thresholds.push(threshold);
        }

        debug!(
            n,
            window_size = self.window_size,
            n_sigma = self.n_sigma,
            outliers = result.outlier_count(),
            "Hampel filter complete"
        );
        Ok(result)
    }

    fn collect_stats<T>(&self, values: &[T]) -> Vec<(T, T)>
    where
        T: Float + Send + Sync,
    {
        let n = values.len();
        if self.parallel {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                let chunk = n.div_ceil(rayon::current_num_threads()).max(MIN_PARALLEL_CHUNK);
                let starts: Vec<usize> = (0..n).step_by(chunk).collect();
                return starts
                    .into_par_iter()
                    .map(|start| {
                        let centers = start..(start + chunk).min(n);
                        window_stats(values, self.window_size, centers, self.strategy)
                    })
                    .collect::<Vec<_>>()
                    .into_iter()
                    .flatten()
                    .collect();
            }
            #[cfg(not(feature = "parallel"))]
            tracing::warn!("Parallel filtering requested but the `parallel` feature is disabled");
        }
        window_stats(values, self.window_size, 0..n, self.strategy)
    }
}

impl Default for HampelFilter {
    fn default() -> Self {
        let config = HampelConfig::default();
        Self {
            window_size: config.window_size,
            n_sigma: config.n_sigma,
            strategy: config.strategy,
            parallel: config.parallel,
        }
    }
}

/// Filter `values` with window radius `window_size` and multiplier `n_sigma`
pub fn hampel<T>(
    values: &[T],
    window_size: usize,
    n_sigma: f64,
) -> Result<HampelResult<T>, HampelError>
where
    T: Float + Send + Sync,
{
    HampelFilter::new(window_size, n_sigma)?.filter(values)
}
