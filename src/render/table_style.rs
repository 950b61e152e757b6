use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Layout of the histogram data table.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TableStyle {
    #[default]
    #[strum(
        message = "Clean",
        detailed_message = "Placeholders outside each series' range, gaps filled with rows."
    )]
    Clean,
    #[strum(
        message = "Classic",
        detailed_message = "One row per occupied cumulative bucket, zero where a series is absent."
    )]
    Classic,
}
