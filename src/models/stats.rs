//! Aggregate statistics and retention reports

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Column a grouped count is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Service,
    EventType,
    Level,
}

impl GroupColumn {
    pub fn column(&self) -> &'static str {
        match self {
            GroupColumn::Service => "service",
            GroupColumn::EventType => "event_type",
            GroupColumn::Level => "level",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStatistics {
    pub by_service: Vec<GroupCount>,
    pub by_event_type: Vec<GroupCount>,
    pub by_level: Vec<GroupCount>,
}

/// Outcome of a retention cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted_count: u64,
    pub retention_days: u32,
    pub cutoff: DateTime<Utc>,
}
