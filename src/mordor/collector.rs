use crate::histogram::{BucketWidth, Histogram};
use crate::mordor::{BucketSizing, KeyOrder, Series};
use crate::stats::{OutlierPolicy, StatsAccumulator};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Row count above which a rendered table is reported as suspiciously large.
pub const LARGE_TABLE_ROWS: u64 = 10_000;

/// Keyed set of series that share one bucket width.
///
/// Every value goes into its key's series and into a cumulative
/// accumulator. Histograms are rebuilt lazily by [`rebuild`], always at the
/// width derived from the cumulative data, so all of them line up on one
/// axis.
///
/// The cumulative histogram always keeps outliers: it defines the rows of
/// the rendered table and has to cover every bucket any series occupies.
///
/// [`rebuild`]: MultiSeriesCollector::rebuild
#[derive(Debug, Clone)]
pub struct MultiSeriesCollector {
    series: Vec<Series>,
    index: HashMap<String, usize>,
    cumulative: StatsAccumulator,
    cumulative_histogram: Option<Histogram>,
    bucket_width: Option<BucketWidth>,
    sizing: BucketSizing,
    outliers: OutlierPolicy,
    dirty: bool,
}

impl Default for MultiSeriesCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiSeriesCollector {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            index: HashMap::new(),
            cumulative: StatsAccumulator::new(),
            cumulative_histogram: None,
            bucket_width: None,
            sizing: BucketSizing::Ideal,
            outliers: OutlierPolicy::Keep,
            dirty: true,
        }
    }

    pub fn with_sizing(mut self, sizing: BucketSizing) -> Self {
        self.sizing = sizing;
        self.dirty = true;
        self
    }

    /// Outlier handling for the per-key histograms. Cached histograms built
    /// under another policy are dropped.
    pub fn with_outlier_policy(mut self, policy: OutlierPolicy) -> Self {
        if policy != self.outliers {
            for s in &mut self.series {
                s.invalidate();
            }
        }
        self.outliers = policy;
        self.dirty = true;
        self
    }

    pub fn insert(&mut self, key: &str, value: f64) {
        let slot = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.series.push(Series::new(key.to_string()));
                self.index.insert(key.to_string(), self.series.len() - 1);
                self.series.len() - 1
            }
        };
        self.series[slot].insert(value);
        self.cumulative.insert(value);
        self.dirty = true;
    }

    /// Brings every histogram up to date with the shared bucket width.
    ///
    /// No-op unless something was inserted since the last call. Series whose
    /// cached histogram is still valid at the new width are left alone.
    pub fn rebuild(&mut self) {
        if !self.dirty {
            return;
        }

        let Some(width) = self.sizing.resolve(&mut self.cumulative) else {
            // nothing finite was inserted anywhere, so every series is empty
            for s in &mut self.series {
                s.rebuild(BucketWidth::ONE, self.outliers);
            }
            self.cumulative_histogram = None;
            self.bucket_width = None;
            self.dirty = false;
            return;
        };

        self.bucket_width = Some(width);
        self.cumulative_histogram = self.cumulative.build_histogram(width, OutlierPolicy::Keep);
        if let Some(rows) = self.table_rows().filter(|&r| r > LARGE_TABLE_ROWS) {
            warn!(
                rows,
                bucket_width = width.get(),
                "bucket width is tiny for the value range, gap-filled tables will be very long"
            );
        }

        let mut rebuilt = 0usize;
        for s in &mut self.series {
            if s.needs_rebuild(width) {
                s.rebuild(width, self.outliers);
                rebuilt += 1;
            }
        }
        debug!(
            bucket_width = width.get(),
            series = self.series.len(),
            rebuilt,
            "rebuilt histograms"
        );
        self.dirty = false;
    }

    /// Keys in the requested order.
    pub fn sorted_keys(&self, order: KeyOrder) -> Vec<&str> {
        self.sorted_series(order).into_iter().map(Series::key).collect()
    }

    pub fn sorted_series(&self, order: KeyOrder) -> Vec<&Series> {
        let mut out: Vec<&Series> = self.series.iter().collect();
        match order {
            KeyOrder::Insertion => {}
            KeyOrder::ByMean => {
                out.sort_by(|a, b| a.stats().mean().total_cmp(&b.stats().mean()))
            }
            KeyOrder::Lexicographic => out.sort_by(|a, b| a.key().cmp(b.key())),
        }
        out
    }

    pub fn series(&self, key: &str) -> Option<&Series> {
        self.index.get(key).map(|&i| &self.series[i])
    }

    pub(crate) fn series_mut(&mut self, key: &str) -> Option<&mut Series> {
        self.index.get(key).map(|&i| &mut self.series[i])
    }

    /// Series in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(Series::key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn cumulative(&self) -> &StatsAccumulator {
        &self.cumulative
    }

    pub fn cumulative_histogram(&self) -> Option<&Histogram> {
        self.cumulative_histogram.as_ref()
    }

    /// Shared width from the last [`rebuild`](Self::rebuild); `None` before
    /// that or when no finite value was inserted.
    pub fn bucket_width(&self) -> Option<BucketWidth> {
        self.bucket_width
    }

    /// Rows of a gap-filled table over the cumulative histogram, padding
    /// included. `None` before a rebuild with data.
    pub fn table_rows(&self) -> Option<u64> {
        let h = self.cumulative_histogram.as_ref()?;
        let span = h.last_index()?.abs_diff(h.first_index()?);
        Some(span + 3)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::collector_from;

    #[test]
    fn two_separated_series_align() {
        let mut c = collector_from(&[("A", &[1.0, 2.0, 3.0]), ("B", &[100.0, 101.0, 102.0])]);
        c.rebuild();

        let width = c.bucket_width().unwrap();
        let a = c.series("A").unwrap().histogram().unwrap();
        let b = c.series("B").unwrap().histogram().unwrap();
        assert_eq!(a.bucket_width(), width);
        assert_eq!(b.bucket_width(), width);
        assert_eq!(c.cumulative_histogram().unwrap().bucket_width(), width);

        let a_last = *a.occupied_buckets().last().unwrap();
        let b_first = *b.occupied_buckets().first().unwrap();
        assert!(a_last < b_first);

        let cumulative = c.cumulative_histogram().unwrap().occupied_buckets();
        for start in a.occupied_buckets().into_iter().chain(b.occupied_buckets()) {
            assert!(cumulative.contains(&start));
        }
    }

    #[test]
    fn insert_creates_series_once() {
        let mut c = MultiSeriesCollector::new();
        c.insert("x", 1.0);
        c.insert("y", 2.0);
        c.insert("x", 3.0);
        assert_eq!(c.len(), 2);
        assert_eq!(c.series("x").unwrap().stats().count(), 2);
        assert_eq!(c.cumulative().count(), 3);
        assert_eq!(c.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn rebuild_clears_dirty_and_is_idempotent() {
        let mut c = collector_from(&[("a", &[1.0, 5.0, 9.0])]);
        assert!(c.is_dirty());
        c.rebuild();
        assert!(!c.is_dirty());
        let before = c.cumulative_histogram().cloned();
        c.rebuild();
        assert_eq!(c.cumulative_histogram().cloned(), before);
    }

    #[test]
    fn width_change_rebuilds_clean_series() {
        let mut c = collector_from(&[("a", &[1.0, 2.0, 3.0, 4.0]), ("b", &[5.0])]);
        c.rebuild();
        let w0 = c.bucket_width().unwrap();

        // only "b" is dirty, but the shared width moves, so "a" follows
        for v in [50.0, 60.0, 70.0, 80.0, 90.0] {
            c.insert("b", v);
        }
        c.rebuild();
        let w1 = c.bucket_width().unwrap();
        assert_ne!(w0, w1);
        for s in c.iter() {
            assert_eq!(s.histogram().unwrap().bucket_width(), w1);
        }
    }

    #[test]
    fn sorted_keys_orders() {
        let c = collector_from(&[
            ("zeta", &[1.0, 1.0]),
            ("alpha", &[50.0]),
            ("mid", &[10.0, 20.0]),
        ]);
        assert_eq!(
            c.sorted_keys(KeyOrder::Insertion),
            vec!["zeta", "alpha", "mid"]
        );
        assert_eq!(c.sorted_keys(KeyOrder::ByMean), vec!["zeta", "mid", "alpha"]);
        assert_eq!(
            c.sorted_keys(KeyOrder::Lexicographic),
            vec!["alpha", "mid", "zeta"]
        );
    }

    #[test]
    fn empty_and_nan_only_collectors() {
        let mut c = MultiSeriesCollector::new();
        c.rebuild();
        assert!(c.bucket_width().is_none());
        assert!(c.cumulative_histogram().is_none());

        c.insert("bad", f64::NAN);
        assert_eq!(c.len(), 1);
        c.rebuild();
        assert!(c.bucket_width().is_none());
        let s = c.series("bad").unwrap();
        assert!(!s.is_stale());
        assert!(s.histogram().is_none());
    }

    #[test]
    fn policy_change_after_rebuild_takes_effect() {
        let mut c = MultiSeriesCollector::new().with_sizing(BucketSizing::Fixed(BucketWidth::ONE));
        for v in [1.0, 2.0, 3.0, 4.0, 5.0, 1000.0] {
            c.insert("k", v);
        }
        c.rebuild();
        assert_eq!(c.series("k").unwrap().histogram().unwrap().count_at(1000.0), 1);

        let mut c = c.with_outlier_policy(OutlierPolicy::Discard);
        c.rebuild();
        assert_eq!(c.series("k").unwrap().histogram().unwrap().count_at(1000.0), 0);

        let mut c = c.with_outlier_policy(OutlierPolicy::Keep);
        c.rebuild();
        assert_eq!(c.series("k").unwrap().histogram().unwrap().count_at(1000.0), 1);
    }

    #[test]
    fn table_rows_follow_the_cumulative_span() {
        let mut c = collector_from(&[("a", &[1.0, 2.0, 3.0]), ("b", &[100.0, 101.0, 102.0])]);
        assert_eq!(c.table_rows(), None);
        c.rebuild();
        assert!(c.table_rows().unwrap() < LARGE_TABLE_ROWS);

        // spans zero, so |max| - |min| yields a tiny but valid width
        let mut c = collector_from(&[("x", &[-100.0, 100.01])]);
        c.rebuild();
        assert!(c.bucket_width().unwrap().get() < 0.011);
        assert!(c.table_rows().unwrap() > LARGE_TABLE_ROWS);
    }

    #[test]
    fn fixed_sizing_and_discarded_outliers() {
        let mut c = MultiSeriesCollector::new()
            .with_sizing(BucketSizing::Fixed(BucketWidth::ONE))
            .with_outlier_policy(OutlierPolicy::Discard);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0, 1000.0] {
            c.insert("k", v);
        }
        c.rebuild();
        assert_eq!(c.bucket_width(), Some(BucketWidth::ONE));
        assert_eq!(c.series("k").unwrap().histogram().unwrap().count_at(1000.0), 0);
        assert_eq!(c.cumulative_histogram().unwrap().count_at(1000.0), 1);
    }
}
