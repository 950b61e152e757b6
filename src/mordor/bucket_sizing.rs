use crate::error::{MordorError, Result};
use crate::histogram::BucketWidth;
use crate::stats::StatsAccumulator;
use tracing::warn;

/// How the collector picks its shared bucket width.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BucketSizing {
    /// `sqrt(n)` buckets over the cumulative distribution.
    #[default]
    Ideal,
    Fixed(BucketWidth),
}

impl BucketSizing {
    /// `None` means ideal sizing; anything else must be a valid width.
    pub fn from_option(width: Option<f64>) -> Result<Self> {
        match width {
            None => Ok(BucketSizing::Ideal),
            Some(w) => BucketWidth::new(w).map(BucketSizing::Fixed).map_err(|_| {
                MordorError::InvalidParameter(format!("bucket_width must be > 0, got {w}"))
            }),
        }
    }

    /// Width for the current cumulative data, or `None` when it is empty.
    pub(crate) fn resolve(self, cumulative: &mut StatsAccumulator) -> Option<BucketWidth> {
        if cumulative.is_empty() {
            return None;
        }
        match self {
            BucketSizing::Fixed(width) => Some(width),
            BucketSizing::Ideal => {
                let ideal = cumulative.ideal_bucket_size();
                if let Ok(width) = BucketWidth::new(ideal) {
                    return Some(width);
                }
                let buckets = (cumulative.count() as f64).sqrt().floor();
                let range = cumulative.maximum() - cumulative.minimum();
                let fallback = BucketWidth::new(range / buckets).unwrap_or(BucketWidth::ONE);
                warn!(
                    ideal,
                    fallback = fallback.get(),
                    "ideal bucket size unusable (data spans zero), using value range"
                );
                Some(fallback)
            }
        }
    }
}
