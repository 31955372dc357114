//! Sliding Window Order Statistics

use crate::statistics::{cmp, mad_by, mad_naive, median_by, median_sorted};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// How window statistics are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStrategy {
    /// Ranked window updated incrementally as it slides
    #[default]
    Sorted,
    /// Copy and sort every window from scratch
    Naive,
}

/// Clamped window bounds for index `i` with radius `k` over `n` samples
pub fn bounds(i: usize, k: usize, n: usize) -> RangeInclusive<usize> {
    i.saturating_sub(k)..=i.saturating_add(k).min(n.saturating_sub(1))
}

/// Order-statistic window over a fixed span of samples.
///
/// Samples are ranked once when the window is built and addressed by their
/// position in the span afterwards. Membership lives in a Fenwick tree of
/// counts over the ranks, so insert, remove and select each cost O(log m)
/// for a span of m samples.
pub struct SortedWindow<T> {
    ranked: Vec<T>,
    rank_of: Vec<usize>,
    present: Vec<bool>,
    tree: RankTree,
}

impl<T: Float> SortedWindow<T> {
    /// Create an empty window over the samples of `span`
    pub fn new(span: &[T]) -> Self {
        let mut order: Vec<usize> = (0..span.len()).collect();
        order.sort_by(|&a, &b| cmp(&span[a], &span[b]));

        let mut rank_of = vec![0; span.len()];
        for (rank, &pos) in order.iter().enumerate() {
            rank_of[pos] = rank;
        }
        Self {
            ranked: order.iter().map(|&pos| span[pos]).collect(),
            rank_of,
            present: vec![false; span.len()],
            tree: RankTree::new(span.len()),
        }
    }

    /// Create a window holding every sample of `values`
    pub fn from_slice(values: &[T]) -> Self {
        let mut window = Self::new(values);
        for pos in 0..values.len() {
            window.insert(pos);
        }
        window
    }

    /// Add the sample at span position `pos`; returns false if already present
    pub fn insert(&mut self, pos: usize) -> bool {
        if self.present[pos] {
            return false;
        }
        self.present[pos] = true;
        self.tree.add(self.rank_of[pos]);
        true
    }

    /// Drop the sample at span position `pos`; returns false if absent
    pub fn remove(&mut self, pos: usize) -> bool {
        if !self.present[pos] {
            return false;
        }
        self.present[pos] = false;
        self.tree.sub(self.rank_of[pos]);
        true
    }

    pub fn len(&self) -> usize {
        self.tree.total
    }

    pub fn is_empty(&self) -> bool {
        self.tree.total == 0
    }

    /// k-th smallest (0-based) sample in the window; `k` must be below `len()`
    pub fn select(&self, k: usize) -> T {
        self.ranked[self.tree.select(k)]
    }

    /// Current median
    pub fn median(&self) -> T {
        median_by(self.len(), |k| self.select(k))
    }

    /// Current unscaled MAD around `median`
    pub fn mad(&self, median: T) -> T {
        mad_by(self.len(), |k| self.select(k), median)
    }

    /// Window contents in ascending order
    pub fn to_sorted_vec(&self) -> Vec<T> {
        (0..self.len()).map(|k| self.select(k)).collect()
    }
}

/// Fenwick tree of per-rank counts
struct RankTree {
    // 1-based; counts[i] covers ranks (i - lowbit(i), i]
    counts: Vec<usize>,
    total: usize,
}

impl RankTree {
    fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size + 1],
            total: 0,
        }
    }

    fn add(&mut self, rank: usize) {
        let mut i = rank + 1;
        while i < self.counts.len() {
            self.counts[i] += 1;
            i += i & i.wrapping_neg();
        }
        self.total += 1;
    }

    fn sub(&mut self, rank: usize) {
        let mut i = rank + 1;
        while i < self.counts.len() {
            self.counts[i] -= 1;
            i += i & i.wrapping_neg();
        }
        self.total -= 1;
    }

    /// Rank holding the k-th (0-based) counted element
    fn select(&self, k: usize) -> usize {
        let size = self.counts.len() - 1;
        let mut step = size.checked_ilog2().map_or(0, |b| 1usize << b);
        let (mut pos, mut rest) = (0, k);
        while step > 0 {
            let next = pos + step;
            if next <= size && self.counts[next] <= rest {
                pos = next;
                rest -= self.counts[next];
            }
            step >>= 1;
        }
        pos
    }
}

/// Unscaled (median, MAD) of every window whose center lies in `centers`
pub fn window_stats<T: Float>(
    values: &[T],
    k: usize,
    centers: std::ops::Range<usize>,
    strategy: WindowStrategy,
) -> Vec<(T, T)> {
    let n = values.len();
    if centers.is_empty() {
        return Vec::new();
    }
    match strategy {
        WindowStrategy::Naive => centers
            .map(|i| {
                let mut buf = values[bounds(i, k, n)].to_vec();
                buf.sort_unstable_by(cmp);
                let median = median_sorted(&buf);
                (median, mad_naive(&buf, median))
            })
            .collect(),
        WindowStrategy::Sorted => {
            let first = bounds(centers.start, k, n);
            let last = bounds(centers.end - 1, k, n);
            let offset = *first.start();
            let mut window = SortedWindow::new(&values[offset..=*last.end()]);
            let (mut lo, mut hi) = (offset, *first.end());
            for pos in lo..=hi {
                window.insert(pos - offset);
            }

            let mut out = Vec::with_capacity(centers.len());
            for i in centers {
                let next = bounds(i, k, n);
                while hi < *next.end() {
                    hi += 1;
                    let inserted = window.insert(hi - offset);
                    debug_assert!(inserted, "sample {hi} entered the window twice");
                }
                while lo < *next.start() {
                    let removed = window.remove(lo - offset);
                    debug_assert!(removed, "sample {lo} left the window twice");
                    lo += 1;
                }
                let median = window.median();
                out.push((median, window.mad(median)));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp_at_edges() {
        assert_eq!(bounds(0, 3, 7), 0..=3);
        assert_eq!(bounds(3, 3, 7), 0..=6);
        assert_eq!(bounds(6, 3, 7), 3..=6);
        assert_eq!(bounds(2, 10, 5), 0..=4);
        assert_eq!(bounds(0, usize::MAX, 1), 0..=0);
    }

    #[test]
    fn test_insert_remove_keeps_order() {
        let span = [3.0, 1.0, 2.0, 2.0, 5.0];
        let mut w = SortedWindow::new(&span);
        assert!(w.is_empty());
        for pos in 0..span.len() {
            assert!(w.insert(pos));
        }
        assert_eq!(w.to_sorted_vec(), vec![1.0, 2.0, 2.0, 3.0, 5.0]);
        assert_eq!(w.select(0), 1.0);
        assert_eq!(w.select(4), 5.0);

        assert!(w.remove(2));
        assert_eq!(w.to_sorted_vec(), vec![1.0, 2.0, 3.0, 5.0]);
        assert_eq!(w.median(), 2.5);
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn test_repeated_insert_and_remove_are_rejected() {
        let mut w = SortedWindow::new(&[4.0, 4.0, 1.0]);
        assert!(w.insert(0));
        assert!(!w.insert(0));
        assert_eq!(w.len(), 1);

        assert!(w.remove(0));
        assert!(!w.remove(0));
        assert!(!w.remove(1));
        assert!(w.is_empty());

        // the twin sample at position 1 is still tracked on its own
        assert!(w.insert(1));
        assert!(w.insert(2));
        assert_eq!(w.to_sorted_vec(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_from_slice() {
        let w = SortedWindow::from_slice(&[9.0_f32, -1.0, 4.0]);
        assert_eq!(w.to_sorted_vec(), vec![-1.0, 4.0, 9.0]);
        assert_eq!(w.median(), 4.0);
        assert_eq!(w.mad(4.0), 5.0);
    }

    #[test]
    fn test_select_after_sliding() {
        // span positions 0..8, window slides from [0, 4] to [4, 8]
        let span = [8.0, 3.0, 6.0, 1.0, 7.0, 2.0, 9.0, 4.0, 5.0];
        let mut w = SortedWindow::new(&span);
        for pos in 0..=4 {
            w.insert(pos);
        }
        for step in 0..4 {
            w.remove(step);
            w.insert(step + 5);
        }
        assert_eq!(w.to_sorted_vec(), vec![2.0, 4.0, 5.0, 7.0, 9.0]);
        assert_eq!(w.median(), 5.0);
    }

    #[test]
    fn test_strategies_agree() {
        let values = [1.0, 2.0, 3.0, 100.0, 4.0, 5.0, 6.0, 6.0, -2.0, 0.5];
        for k in [1, 2, 3, 20] {
            let sorted = window_stats(&values, k, 0..values.len(), WindowStrategy::Sorted);
            let naive = window_stats(&values, k, 0..values.len(), WindowStrategy::Naive);
            assert_eq!(sorted, naive, "k = {k}");
        }
    }

    #[test]
    fn test_wide_window_agrees_with_naive() {
        let values: Vec<f64> = (0..1_200)
            .map(|i| ((i * 7919) % 1013) as f64 * 0.5 - (i % 17) as f64)
            .collect();
        for k in [400, 1_199, 5_000] {
            let sorted = window_stats(&values, k, 0..values.len(), WindowStrategy::Sorted);
            let naive = window_stats(&values, k, 0..values.len(), WindowStrategy::Naive);
            assert_eq!(sorted, naive, "k = {k}");
        }
    }

    #[test]
    fn test_partial_center_range() {
        let values = [1.0, 2.0, 3.0, 100.0, 4.0, 5.0, 6.0];
        let all = window_stats(&values, 2, 0..7, WindowStrategy::Sorted);
        let tail = window_stats(&values, 2, 4..7, WindowStrategy::Sorted);
        assert_eq!(&all[4..], tail.as_slice());
    }
}
