//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::{routing::get, Router};

use crate::AppState;

mod audit;
mod health;
mod logs;

pub use audit::AuditPageResponse;
pub use health::{DatabaseHealth, HealthReport, HealthStatus};
pub use logs::{CleanupResponse, CreatedResponse, LogPageResponse, StatsResponse};

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::health_check_detailed))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
}

/// Create the full API router; the caller picks the mount points
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/logs", logs::routes().nest("/audit", audit::routes()))
}
