//! Log entry API endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;

use crate::{
    db::LogRepository,
    models::{CleanupReport, CreateLogRequest, LogEntry, LogQueryParams, LogStatistics},
    services::{self, RetentionPolicy},
    utils::{AppError, AppResult},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs).post(create_log))
        .route("/create", post(create_log))
        .route("/system", get(list_logs))
        .route("/cleanup", post(cleanup_logs))
        .route("/stats", get(log_stats))
}

/// Response for a newly stored entry
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LogPageResponse {
    pub logs: Vec<LogEntry>,
    pub total_count: i64,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: CleanupReport,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub statistics: LogStatistics,
}

async fn create_log(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateLogRequest>, AppError>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let entry = request.into_new_entry()?;

    let id = LogRepository::new(&state.db)
        .insert(&entry)
        .await
        .map_err(|e| AppError::database(format!("Failed to store log entry: {:#}", e)))?;

    info!(id, service = %entry.service, level = %entry.level, "Stored log entry");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Log entry stored successfully".to_string(),
        }),
    ))
}

async fn list_logs(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<LogQueryParams>, AppError>,
) -> AppResult<Json<LogPageResponse>> {
    let (filter, page) = params.parse()?;

    let result = LogRepository::new(&state.db)
        .query(&filter, page)
        .await
        .map_err(|e| AppError::database(format!("Failed to retrieve logs: {:#}", e)))?;

    Ok(Json(LogPageResponse {
        logs: result.items,
        total_count: result.total_count,
        limit: result.limit,
        offset: result.offset,
    }))
}

async fn cleanup_logs(State(state): State<AppState>) -> AppResult<Json<CleanupResponse>> {
    let policy = RetentionPolicy::from_config(&state.config.retention)?;

    let report = services::run_cleanup(&state.db, policy)
        .await
        .map_err(|e| AppError::database(format!("Failed to clean up logs: {:#}", e)))?;

    Ok(Json(CleanupResponse {
        message: format!(
            "Cleaned up {} log entries older than {} days",
            report.deleted_count, report.retention_days
        ),
        report,
    }))
}

async fn log_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let statistics = services::stats::collect(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to retrieve log statistics: {:#}", e)))?;

    Ok(Json(StatsResponse { statistics }))
}
