pub mod collectors;
pub mod records;
