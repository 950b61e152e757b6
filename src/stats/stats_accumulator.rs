use crate::histogram::{BucketWidth, Histogram};
use crate::stats::OutlierPolicy;

// 4096 bytes worth of f64 before the first doubling.
const INITIAL_CAPACITY: usize = 4096 / std::mem::size_of::<f64>();

/// Online univariate statistics that also keeps every raw value.
///
/// Sums feed mean/variance in O(1); the retained values back the order
/// statistics (quartiles, whiskers) and histogram construction. Sorting is
/// deferred until an order statistic is asked for, which is why those
/// accessors take `&mut self`.
///
/// Non-finite input is dropped without trace: a NaN or ±inf never reaches
/// the sums or the buffer.
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    sum: f64,
    sum_squares: f64,
    values: Vec<f64>,
    needs_sort: bool,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            sum_squares: 0.0,
            values: Vec::with_capacity(INITIAL_CAPACITY),
            needs_sort: false,
        }
    }

    pub fn insert(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.sum += value;
        self.sum_squares += value * value;
        if self.values.len() == self.values.capacity() {
            // double
            self.values.reserve_exact(self.values.capacity().max(1));
        }
        self.values.push(value);
        self.needs_sort = true;
    }

    /// Folds every value of `other` into `self`.
    pub fn merge(&mut self, other: &StatsAccumulator) {
        self.values.reserve(other.values.len());
        for &v in &other.values {
            self.insert(v);
        }
    }

    /// Clears all observations, keeping the allocation.
    pub fn reset(&mut self) {
        self.sum = 0.0;
        self.sum_squares = 0.0;
        self.values.clear();
        self.needs_sort = false;
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    #[inline]
    pub fn sum_squares(&self) -> f64 {
        self.sum_squares
    }

    /// Stored values, in insertion order until the first order statistic
    /// sorts them.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.sum / self.count() as f64
    }

    /// Population variance, `E[x²] - E[x]²`.
    pub fn variance(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let mean = self.mean();
        self.sum_squares / self.count() as f64 - mean * mean
    }

    /// Square root of [`variance`](Self::variance). Negative rounding on
    /// constant data counts as zero.
    pub fn stddev(&self) -> f64 {
        non_negative_sqrt(self.variance())
    }

    pub fn minimum(&mut self) -> f64 {
        self.sorted().first().copied().unwrap_or(f64::NAN)
    }

    pub fn maximum(&mut self) -> f64 {
        self.sorted().last().copied().unwrap_or(f64::NAN)
    }

    pub fn median(&mut self) -> f64 {
        middle(self.sorted())
    }

    /// Lower quartile: the middle of `[0, count/2)`.
    pub fn q1(&mut self) -> f64 {
        let sorted = self.sorted();
        match sorted.len() {
            0 => f64::NAN,
            1 => sorted[0],
            n => middle(&sorted[..n / 2]),
        }
    }

    /// Upper quartile: the middle of `[count/2, count)` for even counts and
    /// of `[count/2 + 1, count)` for odd ones.
    pub fn q3(&mut self) -> f64 {
        let sorted = self.sorted();
        match sorted.len() {
            0 => f64::NAN,
            1 => sorted[0],
            n if n % 2 == 0 => middle(&sorted[n / 2..]),
            n => middle(&sorted[n / 2 + 1..]),
        }
    }

    /// Lowest value that is not below `Q1 - 1.5·IQR`.
    pub fn whisker_low(&mut self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let q1 = self.q1();
        let iqr = self.q3() - q1;
        let threshold = q1 - 1.5 * iqr;
        self.sorted()
            .iter()
            .copied()
            .find(|&v| v >= threshold)
            .unwrap_or(f64::NAN)
    }

    /// Highest value that is not above `Q3 + 1.5·IQR`.
    pub fn whisker_high(&mut self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let q3 = self.q3();
        let iqr = q3 - self.q1();
        let threshold = q3 + 1.5 * iqr;
        self.sorted()
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= threshold)
            .unwrap_or(f64::NAN)
    }

    /// Buckets every stored value within the range selected by `policy`.
    ///
    /// Returns `None` when nothing has been inserted.
    pub fn build_histogram(
        &mut self,
        bucket_width: BucketWidth,
        policy: OutlierPolicy,
    ) -> Option<Histogram> {
        if self.is_empty() {
            return None;
        }
        let (low, high) = match policy {
            OutlierPolicy::Keep => (self.minimum(), self.maximum()),
            OutlierPolicy::Discard => (self.whisker_low(), self.whisker_high()),
        };
        let mut histogram = Histogram::new(bucket_width);
        for &v in self.sorted() {
            if v >= low && v <= high {
                histogram.insert(v);
            }
        }
        Some(histogram)
    }

    /// Width giving roughly `sqrt(count)` buckets.
    ///
    /// Uses `|maximum| - |minimum|` as the span, not `maximum - minimum`,
    /// so data straddling zero gets a narrower (possibly non-positive)
    /// width. Callers validate the result through [`BucketWidth::new`].
    pub fn ideal_bucket_size(&mut self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let min = self.minimum();
        let max = self.maximum();
        let mut span = max.abs() - min.abs();
        if max == min {
            span = if max == 0.0 { 1e-3 } else { max.abs() * 1e-3 };
        }
        span / (self.count() as f64).sqrt().floor()
    }

    fn sorted(&mut self) -> &[f64] {
        if self.needs_sort {
            self.values.sort_unstable_by(f64::total_cmp);
            self.needs_sort = false;
        }
        &self.values
    }
}

/// `sqrt` with values rounded below zero taken as zero; NaN stays NaN.
pub(crate) fn non_negative_sqrt(v: f64) -> f64 {
    if v < 0.0 { 0.0 } else { v.sqrt() }
}

/// Exact middle element, or the mean of the two middle elements.
fn middle(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        f64::NAN
    } else if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1.0e6f64..1.0e6, min_len..=max_len)
    }

    fn acc(values: &[f64]) -> StatsAccumulator {
        let mut s = StatsAccumulator::new();
        for &v in values {
            s.insert(v);
        }
        s
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn incremental_moments_match_direct(data in finite_vec(1, 200)) {
            let s = acc(&data);
            let n = data.len() as f64;
            let mean = data.iter().sum::<f64>() / n;
            let var = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
            let scale = data.iter().map(|x| x * x).sum::<f64>() / n + 1.0;
            prop_assert!((s.mean() - mean).abs() <= 1e-9 * (mean.abs() + 1.0));
            prop_assert!((s.variance() - var).abs() <= 1e-9 * scale);
            prop_assert!(!s.stddev().is_nan());
            prop_assert!((s.stddev() - var.sqrt()).abs() <= (1e-9 * scale).sqrt());
        }

        #[test]
        fn non_finite_insert_changes_nothing(
            data in finite_vec(1, 50),
            bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
        ) {
            let mut s = acc(&data);
            let (count, sum, sq) = (s.count(), s.sum(), s.sum_squares());
            let (min, max) = (s.minimum(), s.maximum());
            s.insert(bad);
            prop_assert_eq!(s.count(), count);
            prop_assert_eq!(s.sum(), sum);
            prop_assert_eq!(s.sum_squares(), sq);
            prop_assert_eq!(s.minimum(), min);
            prop_assert_eq!(s.maximum(), max);
        }

        #[test]
        fn quartiles_are_ordered(data in finite_vec(3, 200)) {
            let mut s = acc(&data);
            let (q1, med, q3) = (s.q1(), s.median(), s.q3());
            prop_assert!(q1 <= med && med <= q3, "q1={} med={} q3={}", q1, med, q3);
        }

        #[test]
        fn whiskers_bracket_quartiles(data in finite_vec(1, 200)) {
            let mut s = acc(&data);
            prop_assert!(s.whisker_low() <= s.q1());
            prop_assert!(s.whisker_high() >= s.q3());
        }

        #[test]
        fn histogram_respects_outlier_policy(data in finite_vec(1, 200)) {
            let mut s = acc(&data);
            let width = BucketWidth::new(s.ideal_bucket_size()).unwrap_or(BucketWidth::ONE);

            let kept = s.build_histogram(width, OutlierPolicy::Keep).unwrap();
            prop_assert_eq!(kept.total_count(), s.count() as u64);

            let (lo, hi) = (s.whisker_low(), s.whisker_high());
            let trimmed = s.build_histogram(width, OutlierPolicy::Discard).unwrap();
            let first = trimmed.occupied_buckets().first().copied().unwrap();
            let last = trimmed.occupied_buckets().last().copied().unwrap();
            prop_assert_eq!(first, trimmed.bucket_start(lo));
            prop_assert_eq!(last, trimmed.bucket_start(hi));
        }
    }
}
