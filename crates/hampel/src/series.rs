//! Input Adapters
//!
//! Callers may hold plain vectors, `ndarray` arrays or labeled series.
//! Each is reduced to a plain numeric array before filtering; labels are
//! re-attached to the filtered output afterwards.

use crate::error::HampelError;
use crate::filter::HampelFilter;
use crate::result::HampelResult;
use ndarray::Array1;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Series of values tagged with an index label per sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries<L, T> {
    labels: Vec<L>,
    values: Vec<T>,
}

impl<L, T> LabeledSeries<L, T> {
    /// Pair labels with values; both must have the same length
    pub fn new(labels: Vec<L>, values: Vec<T>) -> Result<Self, HampelError> {
        if labels.len() != values.len() {
            return Err(HampelError::invalid(
                "values",
                "labels and values must have the same length",
            ));
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split into labels and values
    pub fn into_parts(self) -> (Vec<L>, Vec<T>) {
        (self.labels, self.values)
    }

    /// Attach this series' labels to `values` of the same length
    pub fn rewrap<U>(&self, values: Vec<U>) -> Result<LabeledSeries<L, U>, HampelError>
    where
        L: Clone,
    {
        LabeledSeries::new(self.labels.clone(), values)
    }
}

impl<L, T> FromIterator<(L, T)> for LabeledSeries<L, T> {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let (labels, values) = iter.into_iter().unzip();
        Self { labels, values }
    }
}

/// Accepted input shapes
#[derive(Debug, Clone)]
pub enum SeriesInput<L, T> {
    Values(Vec<T>),
    Array(Array1<T>),
    Labeled(LabeledSeries<L, T>),
}

impl<L, T: Clone> SeriesInput<L, T> {
    /// Canonical numeric array plus labels when the input carried them
    pub fn into_parts(self) -> (Vec<T>, Option<Vec<L>>) {
        match self {
            SeriesInput::Values(values) => (values, None),
            SeriesInput::Array(array) => (array.to_vec(), None),
            SeriesInput::Labeled(series) => {
                let (labels, values) = series.into_parts();
                (values, Some(labels))
            }
        }
    }
}

impl<L, T> From<Vec<T>> for SeriesInput<L, T> {
    fn from(values: Vec<T>) -> Self {
        SeriesInput::Values(values)
    }
}

impl<L, T> From<Array1<T>> for SeriesInput<L, T> {
    fn from(array: Array1<T>) -> Self {
        SeriesInput::Array(array)
    }
}

impl<L, T> From<LabeledSeries<L, T>> for SeriesInput<L, T> {
    fn from(series: LabeledSeries<L, T>) -> Self {
        SeriesInput::Labeled(series)
    }
}

/// Filter output with the caller's labels restored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledResult<L, T> {
    /// Filtered values under the input labels
    pub filtered: LabeledSeries<L, T>,
    /// Labels of flagged samples, in input order
    pub outlier_labels: Vec<L>,
    /// Positional diagnostics
    pub result: HampelResult<T>,
}

/// Output of [`filter_input`]: labeled when the input was
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterOutput<L, T> {
    Plain(HampelResult<T>),
    Labeled(LabeledResult<L, T>),
}

impl<L, T> FilterOutput<L, T> {
    /// Positional result regardless of labeling
    pub fn result(&self) -> &HampelResult<T> {
        match self {
            FilterOutput::Plain(result) => result,
            FilterOutput::Labeled(labeled) => &labeled.result,
        }
    }
}

/// Filter a labeled series and re-attach its labels
pub fn filter_labeled<L, T>(
    filter: &HampelFilter,
    series: &LabeledSeries<L, T>,
) -> Result<LabeledResult<L, T>, HampelError>
where
    L: Clone,
    T: Float + Send + Sync,
{
    let result = filter.filter(series.values())?;
    let filtered = series.rewrap(result.filtered_data.clone())?;
    let outlier_labels = result
        .outlier_indices
        .iter()
        .map(|&i| series.labels[i].clone())
        .collect();
    Ok(LabeledResult {
        filtered,
        outlier_labels,
        result,
    })
}

/// Filter any accepted input shape
pub fn filter_input<L, T>(
    filter: &HampelFilter,
    input: SeriesInput<L, T>,
) -> Result<FilterOutput<L, T>, HampelError>
where
    L: Clone,
    T: Float + Send + Sync,
{
    match input {
        SeriesInput::Labeled(series) => {
            filter_labeled(filter, &series).map(FilterOutput::Labeled)
        }
        other => {
            let (values, _) = other.into_parts();
            filter.filter(&values).map(FilterOutput::Plain)
        }
    }
}
