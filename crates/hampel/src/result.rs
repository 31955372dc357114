//! Filter Output

use serde::{Deserialize, Serialize};

/// Output of one filter run, aligned index-by-index with the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HampelResult<T> {
    /// Input with outliers replaced by their window median
    pub filtered_data: Vec<T>,
    /// Positions of flagged samples, ascending
    pub outlier_indices: Vec<usize>,
    /// Window median per index
    pub medians: Vec<T>,
    /// Scaled MAD per index
    pub median_absolute_deviations: Vec<T>,
    /// Decision threshold per index
    pub thresholds: Vec<T>,
}

impl<T> HampelResult<T> {
    /// Result for an empty input
    pub fn empty() -> Self {
        Self {
            filtered_data: Vec::new(),
            outlier_indices: Vec::new(),
            medians: Vec::new(),
            median_absolute_deviations: Vec::new(),
            thresholds: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.filtered_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_data.is_empty()
    }

    /// Number of flagged samples
    pub fn outlier_count(&self) -> usize {
        self.outlier_indices.len()
    }

    /// Whether sample `index` was flagged
    pub fn is_outlier(&self, index: usize) -> bool {
        self.outlier_indices.binary_search(&index).is_ok()
    }
}

impl<T> Default for HampelResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
