use crate::histogram::{BucketWidth, Histogram};
use crate::stats::{OutlierPolicy, StatsAccumulator};

/// Cached histogram of a series.
///
/// `Fresh(None)` is a built result for an accumulator with no values;
/// `Stale` means nothing usable is cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HistogramCache {
    #[default]
    Stale,
    Fresh(Option<Histogram>),
}

/// One key's distribution (a "mountain" in the rendered plot).
#[derive(Debug, Clone)]
pub struct Series {
    key: String,
    stats: StatsAccumulator,
    cache: HistogramCache,
}

impl Series {
    pub(crate) fn new(key: String) -> Self {
        Self {
            key,
            stats: StatsAccumulator::new(),
            cache: HistogramCache::Stale,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn stats(&self) -> &StatsAccumulator {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut StatsAccumulator {
        &mut self.stats
    }

    /// Histogram at the collector's shared width, when fresh and non-empty.
    pub fn histogram(&self) -> Option<&Histogram> {
        match &self.cache {
            HistogramCache::Fresh(h) => h.as_ref(),
            HistogramCache::Stale => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self.cache, HistogramCache::Stale)
    }

    pub(crate) fn insert(&mut self, value: f64) {
        self.stats.insert(value);
        self.cache = HistogramCache::Stale;
    }

    pub(crate) fn invalidate(&mut self) {
        self.cache = HistogramCache::Stale;
    }

    /// Whether the cached histogram is unusable at `width`.
    pub(crate) fn needs_rebuild(&self, width: BucketWidth) -> bool {
        match &self.cache {
            HistogramCache::Stale => true,
            HistogramCache::Fresh(Some(h)) => h.bucket_width() != width,
            HistogramCache::Fresh(None) => !self.stats.is_empty(),
        }
    }

    pub(crate) fn rebuild(&mut self, width: BucketWidth, policy: OutlierPolicy) {
        self.cache = HistogramCache::Fresh(self.stats.build_histogram(width, policy));
    }
}
