use crate::histogram::BucketWidth;
use std::collections::BTreeMap;

/// Sparse fixed-width frequency table.
///
/// Buckets are anchored at zero: bucket `i` covers
/// `[i·width, (i+1)·width)`. Any two histograms with the same width share
/// bucket boundaries exactly, which is what lets the collector overlay them.
/// Only occupied buckets are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    width: BucketWidth,
    buckets: BTreeMap<i64, u64>,
}

impl Histogram {
    pub fn new(width: BucketWidth) -> Self {
        Self {
            width,
            buckets: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn bucket_width(&self) -> BucketWidth {
        self.width
    }

    pub fn insert(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        *self.buckets.entry(self.index_of(value)).or_insert(0) += 1;
    }

    /// Lower edge of the bucket `value` falls into.
    pub fn bucket_start(&self, value: f64) -> f64 {
        self.start_of(self.index_of(value))
    }

    /// Count of the bucket starting at `bucket_start`, 0 when unoccupied.
    ///
    /// Positions within rounding error of a bucket edge snap to that edge,
    /// so starts computed elsewhere as `index·width` always hit.
    pub fn count_at(&self, bucket_start: f64) -> u64 {
        if !bucket_start.is_finite() {
            return 0;
        }
        let q = bucket_start / self.width.get();
        let nearest = q.round();
        let index = if (q - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
            nearest as i64
        } else {
            q.floor() as i64
        };
        self.count_at_index(index)
    }

    /// Ascending starts of all occupied buckets.
    pub fn occupied_buckets(&self) -> Vec<f64> {
        self.buckets.keys().map(|&i| self.start_of(i)).collect()
    }

    /// Number of occupied buckets.
    #[inline]
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.buckets.values().sum()
    }

    /// `(bucket_start, count)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.buckets.iter().map(|(&i, &c)| (self.start_of(i), c))
    }

    pub(crate) fn index_of(&self, value: f64) -> i64 {
        (value / self.width.get()).floor() as i64
    }

    pub(crate) fn start_of(&self, index: i64) -> f64 {
        index as f64 * self.width.get()
    }

    pub(crate) fn count_at_index(&self, index: i64) -> u64 {
        self.buckets.get(&index).copied().unwrap_or(0)
    }

    pub(crate) fn occupied_indices(&self) -> impl Iterator<Item = i64> + '_ {
        self.buckets.keys().copied()
    }

    pub(crate) fn first_index(&self) -> Option<i64> {
        self.buckets.keys().next().copied()
    }

    pub(crate) fn last_index(&self) -> Option<i64> {
        self.buckets.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(width: f64, values: &[f64]) -> Histogram {
        let mut h = Histogram::new(BucketWidth::new(width).unwrap());
        for &v in values {
            h.insert(v);
        }
        h
    }

    #[test]
    fn buckets_are_anchored_at_zero() {
        let h = hist(10.0, &[0.0, 9.99, 10.0, 25.0, -0.5, -10.0]);
        assert_eq!(h.occupied_buckets(), vec![-10.0, 0.0, 10.0, 20.0]);
        assert_eq!(h.count_at(-10.0), 2);
        assert_eq!(h.count_at(0.0), 2);
        assert_eq!(h.count_at(10.0), 1);
        assert_eq!(h.count_at(20.0), 1);
        assert_eq!(h.size(), 4);
        assert_eq!(h.total_count(), 6);
    }

    #[test]
    fn absent_bucket_counts_zero() {
        let h = hist(1.0, &[3.2]);
        assert_eq!(h.count_at(3.0), 1);
        assert_eq!(h.count_at(4.0), 0);
        assert_eq!(h.count_at(f64::NAN), 0);
        assert!(Histogram::new(BucketWidth::ONE).is_empty());
    }

    #[test]
    fn equal_widths_share_boundaries() {
        let a = hist(0.1, &[0.05, 0.31, 0.77]);
        let b = hist(0.1, &[0.72, 0.33, 1.01]);
        for start in a.occupied_buckets() {
            let idx = a.index_of(start + 0.05);
            assert_eq!(start, b.start_of(idx));
        }
        assert_eq!(a.bucket_start(0.31), b.bucket_start(0.33));
    }

    #[test]
    fn count_at_snaps_computed_starts() {
        let h = hist(0.1, &[0.35]);
        let start = h.start_of(3);
        assert_eq!(h.count_at(start), 1);
        assert_eq!(h.count_at(3.0 * 0.1), 1);
    }

    #[test]
    fn iter_ascending() {
        let h = hist(2.0, &[5.0, 1.0, 1.5, 9.0]);
        let got: Vec<_> = h.iter().collect();
        assert_eq!(got, vec![(0.0, 2), (4.0, 1), (8.0, 1)]);
        assert_eq!(h.first_index(), Some(0));
        assert_eq!(h.last_index(), Some(4));
    }
}
