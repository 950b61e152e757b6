mod dummies;

pub use dummies::collectors::collector_from;
pub use dummies::records::{record, records_from_json};
