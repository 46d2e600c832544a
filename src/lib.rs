//! Logkeeper Library
//!
//! Core of a small ingestion service for structured log and audit entries:
//! persistence, filtered queries, aggregate statistics and retention cleanup.

use axum::Router;

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use db::DbPool;

/// Versioned prefix for the API routes
pub const API_PREFIX: &str = "/api/v1";

/// Unversioned prefix kept for existing clients
pub const LEGACY_API_PREFIX: &str = "/api";

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Database connection pool
    pub db: DbPool,
}

/// Build the application router without transport middleware
///
/// The API is served under `/api/v1`, under `/api`, and at the root
/// (`/logs`, `/health`, ...).
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes())
        .nest(LEGACY_API_PREFIX, api::routes())
        .nest(API_PREFIX, api::routes())
        .with_state(state)
}
