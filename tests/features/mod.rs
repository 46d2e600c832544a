//! Feature step definitions and shared world


pub use support::TestWorld;
