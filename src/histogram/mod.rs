mod bucket_width;
mod histogram;

pub use bucket_width::BucketWidth;
pub use histogram::Histogram;
