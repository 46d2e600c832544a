//! Structured log entry models

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Pagination;
use crate::utils::{
    time::parse_timestamp,
    validation::{non_blank, parse_time_param, require},
    AppError,
};

/// A persisted log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub event_type: String,
    pub user_id: Option<String>,
    pub details: serde_json::Value,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

/// A validated entry ready for insertion
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewLogEntry {
    pub timestamp: DateTime<Utc>,
    #[validate(length(min = 1, max = 50))]
    pub service: String,
    #[validate(length(min = 1, max = 50))]
    pub event_type: String,
    #[validate(length(max = 50))]
    pub user_id: Option<String>,
    pub details: serde_json::Value,
    #[validate(length(min = 1, max = 20))]
    pub level: String,
}

/// Request body for creating a log entry
///
/// Every field is optional at the serde level so that absent fields are
/// reported together as a validation error instead of a deserializer error
/// naming only the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLogRequest {
    pub timestamp: Option<String>,
    pub service: Option<String>,
    pub event_type: Option<String>,
    pub user_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub level: Option<String>,
}

impl CreateLogRequest {
    pub fn into_new_entry(self) -> Result<NewLogEntry, AppError> {
        let mut missing = Vec::new();
        let timestamp = require("timestamp", non_blank(self.timestamp), &mut missing);
        let service = require("service", non_blank(self.service), &mut missing);
        let event_type = require("event_type", non_blank(self.event_type), &mut missing);
        let details = require(
            "details",
            self.details.filter(|d| !d.is_null()),
            &mut missing,
        );
        let level = require("level", non_blank(self.level), &mut missing);

        let (Some(timestamp), Some(service), Some(event_type), Some(details), Some(level)) =
            (timestamp, service, event_type, details, level)
        else {
            return Err(AppError::MissingFields(missing));
        };

        let timestamp = parse_timestamp(&timestamp)
            .map(|ts| ts.trunc_subsecs(6))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "timestamp is not a valid ISO-8601 datetime: {}",
                    timestamp
                ))
            })?;

        if !details.is_object() {
            return Err(AppError::validation("details must be a JSON object"));
        }

        let entry = NewLogEntry {
            timestamp,
            service,
            event_type,
            user_id: non_blank(self.user_id),
            details,
            level,
        };
        entry.validate()?;

        Ok(entry)
    }
}

/// Raw query string for log listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQueryParams {
    pub service: Option<String>,
    pub event_type: Option<String>,
    pub user_id: Option<String>,
    pub level: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Parsed log filter; each `Some` field narrows the result set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub service: Option<String>,
    pub event_type: Option<String>,
    pub user_id: Option<String>,
    pub level: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl LogQueryParams {
    pub fn parse(self) -> Result<(LogFilter, Pagination), AppError> {
        let page = Pagination::parse(self.limit.as_deref(), self.offset.as_deref())?;
        let filter = LogFilter {
            start_time: parse_time_param("start_time", self.start_time.as_deref())?,
            end_time: parse_time_param("end_time", self.end_time.as_deref())?,
            service: non_blank(self.service),
            event_type: non_blank(self.event_type),
            user_id: non_blank(self.user_id),
            level: non_blank(self.level),
        };
        Ok((filter, page))
    }
}
