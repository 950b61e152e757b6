use crate::error::{MordorError, Result};
use std::fmt::{Display, Formatter};

/// A histogram bucket width: finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BucketWidth(f64);

impl BucketWidth {
    pub const ONE: BucketWidth = BucketWidth(1.0);

    pub fn new(width: f64) -> Result<Self> {
        if width.is_finite() && width > 0.0 {
            Ok(Self(width))
        } else {
            Err(MordorError::InvalidBucketWidth(width))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for BucketWidth {
    type Error = MordorError;

    fn try_from(width: f64) -> Result<Self> {
        Self::new(width)
    }
}

impl Display for BucketWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
