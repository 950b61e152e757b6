pub mod config;
pub mod error;
pub mod histogram;
pub mod mordor;
pub mod records;
pub mod render;
pub mod stats;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{MordorError, Result};
