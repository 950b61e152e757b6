use crate::config::HistogramParams;
use crate::error::{MordorError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_label_column() -> usize {
    1
}

fn default_value_column() -> usize {
    2
}

fn default_delimiters() -> String {
    " \t".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlotConfig {
    #[serde(default = "default_label_column")]
    #[schemars(
        title = "Label column",
        description = "1-based column holding the series key",
        range(min = 1),
        default = "default_label_column"
    )]
    pub label_column: usize,

    #[serde(default = "default_value_column")]
    #[schemars(
        title = "Value column",
        description = "1-based column holding the numeric value",
        range(min = 1),
        default = "default_value_column"
    )]
    pub value_column: usize,

    #[serde(default = "default_delimiters")]
    #[schemars(
        title = "Delimiters",
        description = "Every character is a field separator; runs count as one",
        default = "default_delimiters"
    )]
    pub delimiters: String,

    #[serde(default)]
    pub histogram: HistogramParams,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            label_column: default_label_column(),
            value_column: default_value_column(),
            delimiters: default_delimiters(),
            histogram: HistogramParams::default(),
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.label_column == 0 {
            return Err(MordorError::InvalidParameter(
                "label_column must be positive".into(),
            ));
        }
        if self.value_column == 0 {
            return Err(MordorError::InvalidParameter(
                "value_column must be positive".into(),
            ));
        }
        if self.label_column == self.value_column {
            return Err(MordorError::InvalidParameter(
                "label and value must be different columns".into(),
            ));
        }
        if self.delimiters.is_empty() {
            return Err(MordorError::InvalidParameter(
                "delimiters must not be empty".into(),
            ));
        }
        self.histogram.bucket_sizing()?;
        Ok(())
    }
}
