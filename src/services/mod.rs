//! Business logic services

pub mod retention;
pub mod stats;

pub use retention::{run_cleanup, RetentionPolicy};
