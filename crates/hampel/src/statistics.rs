//! Median and MAD over Sorted Data
//!
//! Even-length inputs use the average of the two middle values.

use num_traits::Float;
use std::cmp::Ordering;

/// Consistency constant turning MAD into a standard deviation estimate
/// for normally distributed data
pub const MAD_SCALE: f64 = 1.4826;

/// Comparison used for all ordering; inputs are validated finite
pub(crate) fn cmp<T: Float>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn half<T: Float>() -> T {
    T::one() / (T::one() + T::one())
}

/// Midpoint of two values without overflowing near the type's limits
fn midpoint<T: Float>(a: T, b: T) -> T {
    a * half() + b * half()
}

/// Median of an ascending slice
pub fn median_sorted<T: Float>(sorted: &[T]) -> T {
    median_by(sorted.len(), |k| sorted[k])
}

/// Median of `len` ascending values read through `at`
pub(crate) fn median_by<T: Float>(len: usize, at: impl Fn(usize) -> T) -> T {
    if len == 0 {
        return T::zero();
    }
    if len % 2 == 1 {
        at(len / 2)
    } else {
        midpoint(at(len / 2 - 1), at(len / 2))
    }
}

/// Unscaled MAD of an ascending slice around its own median.
///
/// Deviations below and above the median form two ascending runs; the
/// middle order statistics of their union are found by binary search
/// instead of materialising and sorting the deviations.
pub fn mad_sorted<T: Float>(sorted: &[T], median: T) -> T {
    mad_by(sorted.len(), |k| sorted[k], median)
}

/// Unscaled MAD of `len` ascending values read through `at`.
///
/// Needs O(log len) reads of `at`.
pub(crate) fn mad_by<T: Float>(len: usize, at: impl Fn(usize) -> T, median: T) -> T {
    if len <= 1 {
        return T::zero();
    }

    let split = partition_by(len, |k| at(k) < median);
    let below = |t: usize| median - at(split - 1 - t);
    let above = |t: usize| at(split + t) - median;
    let runs = DeviationRuns {
        below_len: split,
        above_len: len - split,
        below: &below,
        above: &above,
    };

    if len % 2 == 1 {
        runs.kth(len / 2)
    } else {
        midpoint(runs.kth(len / 2 - 1), runs.kth(len / 2))
    }
}

/// Number of leading positions in `0..len` for which `pred` holds
fn partition_by(len: usize, pred: impl Fn(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0, len);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Unscaled MAD computed by sorting the deviations
pub fn mad_naive<T: Float>(values: &[T], median: T) -> T {
    let mut deviations: Vec<T> = values.iter().map(|&v| (v - median).abs()).collect();
    deviations.sort_unstable_by(cmp);
    median_sorted(&deviations)
}

struct DeviationRuns<'a, T> {
    below_len: usize,
    above_len: usize,
    below: &'a dyn Fn(usize) -> T,
    above: &'a dyn Fn(usize) -> T,
}

impl<T: Float> DeviationRuns<'_, T> {
    /// k-th smallest (0-based) element of the union of both runs
    fn kth(&self, k: usize) -> T {
        let take = k + 1;
        let mut lo = take.saturating_sub(self.above_len);
        let mut hi = take.min(self.below_len);

        // Smallest count `i` taken from `below` such that the last element
        // taken from `above` does not exceed below(i).
        while lo < hi {
            let i = lo + (hi - lo) / 2;
            let j = take - i;
            if j > 0 && (self.above)(j - 1) > (self.below)(i) {
                lo = i + 1;
            } else {
                hi = i;
            }
        }

        let i = lo;
        let j = take - i;
        match (i > 0, j > 0) {
            (true, true) => (self.below)(i - 1).max((self.above)(j - 1)),
            (true, false) => (self.below)(i - 1),
            (false, true) => (self.above)(j - 1),
            (false, false) => T::zero(),
        }
    }
}
