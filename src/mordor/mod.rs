mod bucket_sizing;
mod collector;
mod key_order;
mod series;

pub use bucket_sizing::BucketSizing;
pub use collector::{LARGE_TABLE_ROWS, MultiSeriesCollector};
pub use key_order::KeyOrder;
pub use series::{HistogramCache, Series};
