use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// What to do with values beyond the whiskers when building a histogram.
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
pub enum OutlierPolicy {
    #[default]
    #[strum(message = "Keep every value, histogram spans minimum..maximum")]
    Keep,
    #[strum(message = "Drop values outside whisker_low..whisker_high")]
    Discard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::EnumMessage;

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(OutlierPolicy::from_str("keep").unwrap(), OutlierPolicy::Keep);
        assert_eq!(
            OutlierPolicy::from_str("discard").unwrap(),
            OutlierPolicy::Discard
        );
        assert!(OutlierPolicy::from_str("drop").is_err());
    }

    #[test]
    fn default_keeps_outliers() {
        assert_eq!(OutlierPolicy::default(), OutlierPolicy::Keep);
        assert!(OutlierPolicy::Discard.get_message().is_some());
    }
}
