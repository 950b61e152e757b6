use crate::config::HistogramParams;
use crate::error::{MordorError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_category_field() -> String {
    "category".to_string()
}

fn default_threshold() -> usize {
    1
}

fn default_output_fields() -> Vec<String> {
    ["wall_time", "cpu_time", "memory", "disk"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SplitConfig {
    #[schemars(
        title = "Split field",
        description = "String field whose values become the series keys"
    )]
    pub split_field: String,

    #[serde(default = "default_category_field")]
    #[schemars(
        title = "Category field",
        description = "String field that partitions records into output directories",
        default = "default_category_field"
    )]
    pub category_field: String,

    #[serde(default = "default_threshold")]
    #[schemars(
        title = "Threshold",
        description = "Minimum number of records a split value needs to get its own series",
        range(min = 1),
        default = "default_threshold"
    )]
    pub threshold: usize,

    #[serde(default = "default_output_fields")]
    #[schemars(
        title = "Output fields",
        description = "Numeric fields to histogram, one table per field",
        default = "default_output_fields"
    )]
    pub output_fields: Vec<String>,

    #[serde(default = "default_output_dir")]
    #[schemars(
        with = "String",
        title = "Output directory",
        description = "Root of the per-category output tree",
        extend("format" = "path")
    )]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub histogram: HistogramParams,
}

impl SplitConfig {
    pub fn new<S: Into<String>>(split_field: S) -> Self {
        Self {
            split_field: split_field.into(),
            category_field: default_category_field(),
            threshold: default_threshold(),
            output_fields: default_output_fields(),
            output_dir: default_output_dir(),
            histogram: HistogramParams::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.split_field.is_empty() {
            return Err(MordorError::InvalidParameter(
                "split_field must not be empty".into(),
            ));
        }
        if self.category_field.is_empty() {
            return Err(MordorError::InvalidParameter(
                "category_field must not be empty".into(),
            ));
        }
        if self.output_fields.is_empty() {
            return Err(MordorError::InvalidParameter(
                "at least one output field is required".into(),
            ));
        }
        self.histogram.bucket_sizing()?;
        Ok(())
    }
}
