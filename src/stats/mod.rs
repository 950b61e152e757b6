mod bivariate_accumulator;
mod outlier_policy;
mod stats_accumulator;

pub use bivariate_accumulator::{BivariateAccumulator, LinearFit};
pub use outlier_policy::OutlierPolicy;
pub use stats_accumulator::StatsAccumulator;
