use crate::records::Record;
use serde_json::Value;

/// Record from an inline JSON object; panics on anything else.
pub fn record(json: Value) -> Record {
    match json {
        Value::Object(fields) => Record::new(fields),
        other => panic!("test record must be a JSON object, got {other}"),
    }
}

pub fn records_from_json(values: Vec<Value>) -> Vec<Record> {
    values.into_iter().map(record).collect()
}
