//! Hampel Outlier Filter
//!
//! Detects and corrects outliers in a one-dimensional sequence. Each sample
//! is compared with the median of a centered window; if it deviates by more
//! than `n_sigma` scaled MADs it is replaced with that median.
//!
//! ```
//! let result = hampel::hampel(&[1.0, 2.0, 3.0, 100.0, 4.0, 5.0, 6.0], 3, 3.0).unwrap();
//! assert_eq!(result.filtered_data, vec![1.0, 2.0, 3.0, 4.0, 4.0, 5.0, 6.0]);
//! assert_eq!(result.outlier_indices, vec![3]);
//! ```

mod config;
mod error;
mod filter;
mod result;
mod series;
mod statistics;
mod validator;
mod window;

pub use config::{HampelConfig, DEFAULT_N_SIGMA, DEFAULT_WINDOW_SIZE};
pub use error::HampelError;
pub use filter::{hampel, HampelFilter};
pub use result::HampelResult;
pub use series::{
    filter_input, filter_labeled, FilterOutput, LabeledResult, LabeledSeries, SeriesInput,
};
pub use statistics::{mad_naive, mad_sorted, median_sorted, MAD_SCALE};
pub use validator::{RawParam, Validator};
pub use window::{bounds, window_stats, SortedWindow, WindowStrategy};
