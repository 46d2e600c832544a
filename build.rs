//! Build script for logkeeper
//!
//! `sqlx::migrate!` embeds the migration files at compile time, so the crate
//! must be rebuilt whenever one of them changes.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
