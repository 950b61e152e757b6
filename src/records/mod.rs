mod field_value;
mod grouping;
mod readers;
mod record;
mod unit_tracker;

pub use field_value::FieldValue;
pub use grouping::{Grouping, filter_by_threshold, group_by_field};
pub use readers::{LoadedRecords, read_json_stream, read_list_file};
pub use record::Record;
pub use unit_tracker::{UnitMismatch, UnitTracker};
