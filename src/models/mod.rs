//! Data models

mod audit;
mod log_entry;
mod query;
mod stats;

pub use audit::*;
pub use log_entry::*;
pub use query::*;
pub use stats::*;
