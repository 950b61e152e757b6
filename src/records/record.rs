use crate::records::FieldValue;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// One parsed resource summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    source: Option<PathBuf>,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            source: None,
            fields,
        }
    }

    pub fn with_source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Some(path.into());
        self
    }

    /// File the record was read from, when it came from a list file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of a string-typed field.
    pub fn string_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Numeric value of `field`, unwrapping `[value, "unit"]` arrays.
    pub fn numeric_field(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).and_then(FieldValue::from_json)
    }
}
