//! Grouped counts over the whole log table

use anyhow::Result;

use crate::db::{DbPool, LogRepository};
use crate::models::{GroupColumn, LogStatistics};

/// Compute the three independent groupings
pub async fn collect(pool: &DbPool) -> Result<LogStatistics> {
    let repo = LogRepository::new(pool);

    Ok(LogStatistics {
        by_service: repo.count_by(GroupColumn::Service).await?,
        by_event_type: repo.count_by(GroupColumn::EventType).await?,
        by_level: repo.count_by(GroupColumn::Level).await?,
    })
}
