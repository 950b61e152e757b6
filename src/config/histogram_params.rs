use crate::error::Result;
use crate::mordor::{BucketSizing, KeyOrder};
use crate::render::{TableRenderer, TableStyle};
use crate::stats::OutlierPolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings shared by every task that emits a histogram table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistogramParams {
    #[serde(default)]
    #[schemars(
        title = "Table style",
        description = "clean: placeholders outside each series' range; classic: zeros"
    )]
    pub style: TableStyle,

    #[serde(default)]
    #[schemars(title = "Key order", description = "Column order of the series")]
    pub order: KeyOrder,

    #[serde(default)]
    #[schemars(
        title = "Outliers",
        description = "Keep or discard values outside the whiskers in per-key histograms"
    )]
    pub outliers: OutlierPolicy,

    #[serde(default)]
    #[schemars(
        title = "Bucket width",
        description = "Fixed bucket width; empty = derived from the data"
    )]
    pub bucket_width: Option<f64>,
}

impl HistogramParams {
    pub fn bucket_sizing(&self) -> Result<BucketSizing> {
        BucketSizing::from_option(self.bucket_width)
    }

    pub fn renderer(&self) -> TableRenderer {
        TableRenderer::new(self.style, self.order)
    }
}
