use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Column order of the per-key series in rendered tables.
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
pub enum KeyOrder {
    #[strum(message = "Order in which keys were first inserted")]
    Insertion,
    #[default]
    #[strum(message = "Ascending mean of each series")]
    ByMean,
    #[strum(message = "Lexicographic key order")]
    Lexicographic,
}
