//! Audit trail models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Pagination;
use crate::utils::{
    validation::{non_blank, parse_id_param, parse_time_param},
    AppError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAuditRequest {
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub action: Option<String>,
    pub details: Option<String>,
}

impl CreateAuditRequest {
    /// Check the request and return the action to record
    pub fn checked_action(&self) -> Result<&str, AppError> {
        let Some(action) = self.action.as_deref().filter(|a| !a.trim().is_empty()) else {
            return Err(AppError::MissingFields(vec!["action".to_string()]));
        };
        self.validate()?;
        Ok(action)
    }
}

/// Raw query string for audit listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQueryParams {
    pub user_id: Option<String>,
    pub action: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub user_id: Option<i64>,
    pub action: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl AuditQueryParams {
    pub fn parse(self) -> Result<(AuditFilter, Pagination), AppError> {
        let page = Pagination::parse(self.limit.as_deref(), self.offset.as_deref())?;
        let filter = AuditFilter {
            user_id: parse_id_param("user_id", self.user_id.as_deref())?,
            action: non_blank(self.action),
            start_time: parse_time_param("start_time", self.start_time.as_deref())?,
            end_time: parse_time_param("end_time", self.end_time.as_deref())?,
        };
        Ok((filter, page))
    }
}
