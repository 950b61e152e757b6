mod histogram_params;
mod plot_config;
mod split_config;

pub use histogram_params::HistogramParams;
pub use plot_config::PlotConfig;
pub use split_config::SplitConfig;

use crate::error::Result;
use schemars::{JsonSchema, Schema, schema_for};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a task configuration from a JSON file. Missing fields take their
/// defaults.
pub fn from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn schema<T: JsonSchema>() -> Schema {
    schema_for!(T)
}

#[cfg(test)]
pub(crate) fn root_props_of<T: JsonSchema>() -> serde_json::Value {
    let v = serde_json::to_value(schema::<T>()).expect("schema to JSON");
    v.get("properties")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}))
}
