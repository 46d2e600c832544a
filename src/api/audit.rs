//! Audit trail API endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;

use super::logs::CreatedResponse;
use crate::{
    db::AuditRepository,
    models::{AuditEntry, AuditQueryParams, CreateAuditRequest},
    utils::{AppError, AppResult},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_audit_entries))
        .route("/create", post(create_audit_entry))
}

#[derive(Debug, Serialize)]
pub struct AuditPageResponse {
    pub audit_logs: Vec<AuditEntry>,
    pub total_count: i64,
    pub limit: u32,
    pub offset: u32,
}

async fn create_audit_entry(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateAuditRequest>, AppError>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let action = request.checked_action()?;

    let entry = AuditRepository::new(&state.db)
        .insert(request.user_id, action, request.details.as_deref())
        .await
        .map_err(|e| AppError::database(format!("Failed to store audit entry: {:#}", e)))?;

    info!(id = entry.id, action = %entry.action, "Stored audit entry");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: entry.id,
            message: "Audit entry stored successfully".to_string(),
        }),
    ))
}

async fn list_audit_entries(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<AuditQueryParams>, AppError>,
) -> AppResult<Json<AuditPageResponse>> {
    let (filter, page) = params.parse()?;

    let result = AuditRepository::new(&state.db)
        .query(&filter, page)
        .await
        .map_err(|e| AppError::database(format!("Failed to retrieve audit entries: {:#}", e)))?;

    Ok(Json(AuditPageResponse {
        audit_logs: result.items,
        total_count: result.total_count,
        limit: result.limit,
        offset: result.offset,
    }))
}
