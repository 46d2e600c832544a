//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{db, AppState};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `/health` and `/health/detailed`; the latter adds `database`
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseHealth>,
}

async fn probe_database(state: &AppState) -> DatabaseHealth {
    match db::check_health(&state.db).await {
        Ok(()) => DatabaseHealth {
            status: HealthStatus::Healthy,
            error: None,
        },
        Err(e) => DatabaseHealth {
            status: HealthStatus::Unhealthy,
            error: Some(format!("{:#}", e)),
        },
    }
}

/// Process is up; the store is not consulted
pub async fn health_check() -> Json<HealthReport> {
    Json(HealthReport {
        status: HealthStatus::Healthy,
        version: VERSION,
        database: None,
    })
}

/// 200 when the store answers, 503 otherwise
pub async fn health_check_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthReport>) {
    let database = probe_database(&state).await;
    let status = database.status;
    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthReport {
            status,
            version: VERSION,
            database: Some(database),
        }),
    )
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match probe_database(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}
