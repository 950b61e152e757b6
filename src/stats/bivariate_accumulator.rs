use crate::stats::stats_accumulator::non_negative_sqrt;

/// Result of fitting `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Online two-variable statistics over `(x, y)` pairs.
///
/// Only running sums and extrema are kept, so unlike
/// [`StatsAccumulator`](crate::stats::StatsAccumulator) there are no order
/// statistics here. Pairs with a non-finite member are dropped.
#[derive(Debug, Clone)]
pub struct BivariateAccumulator {
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_sq_x: f64,
    sum_sq_y: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    count: u64,
}

impl Default for BivariateAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BivariateAccumulator {
    pub fn new() -> Self {
        Self {
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xy: 0.0,
            sum_sq_x: 0.0,
            sum_sq_y: 0.0,
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            count: 0,
        }
    }

    pub fn insert(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_sq_x += x * x;
        self.sum_sq_y += y * y;
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.count += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean_x(&self) -> f64 {
        self.per_point(self.sum_x)
    }

    pub fn mean_y(&self) -> f64 {
        self.per_point(self.sum_y)
    }

    pub fn stddev_x(&self) -> f64 {
        let mean = self.mean_x();
        non_negative_sqrt(self.per_point(self.sum_sq_x) - mean * mean)
    }

    pub fn stddev_y(&self) -> f64 {
        let mean = self.mean_y();
        non_negative_sqrt(self.per_point(self.sum_sq_y) - mean * mean)
    }

    pub fn min_x(&self) -> f64 {
        self.extremum(self.min_x)
    }

    pub fn max_x(&self) -> f64 {
        self.extremum(self.max_x)
    }

    pub fn min_y(&self) -> f64 {
        self.extremum(self.min_y)
    }

    pub fn max_y(&self) -> f64 {
        self.extremum(self.max_y)
    }

    pub fn covariance(&self) -> f64 {
        self.per_point(self.sum_xy) - self.mean_x() * self.mean_y()
    }

    /// Pearson correlation coefficient.
    pub fn correlation(&self) -> f64 {
        self.covariance() / (self.stddev_x() * self.stddev_y())
    }

    /// Least-squares line through the pairs.
    ///
    /// `None` with fewer than two points, or when the slope is not finite
    /// (all `x` equal).
    pub fn linear_regression(&self) -> Option<LinearFit> {
        if self.count < 2 {
            return None;
        }
        let slope = self.correlation() * (self.stddev_y() / self.stddev_x());
        if !slope.is_finite() {
            return None;
        }
        Some(LinearFit {
            slope,
            intercept: self.mean_y() - slope * self.mean_x(),
        })
    }

    #[inline]
    fn per_point(&self, sum: f64) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            sum / self.count as f64
        }
    }

    #[inline]
    fn extremum(&self, v: f64) -> f64 {
        if self.count == 0 { f64::NAN } else { v }
    }
}
