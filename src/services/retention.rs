//! Age-based retention for log entries
//!
//! Cleanup is unconditional and permanent: every log entry whose
//! `timestamp` falls before `now - retention_days` is deleted in a single
//! statement. The audit trail is never touched.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::config::RetentionConfig;
use crate::db::{DbPool, LogRepository};
use crate::models::CleanupReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retention_days: u32,
}

impl RetentionPolicy {
    /// `retention_days` must be at least 1
    pub fn new(retention_days: u32) -> Result<Self> {
        if retention_days == 0 {
            anyhow::bail!("retention_days must be at least 1");
        }
        Ok(Self { retention_days })
    }

    pub fn from_config(config: &RetentionConfig) -> Result<Self> {
        Self::new(config.log_retention_days)
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Oldest timestamp that survives a cleanup run at `now`
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.retention_days))
    }
}

/// Delete every log entry older than the policy allows
pub async fn run_cleanup(pool: &DbPool, policy: RetentionPolicy) -> Result<CleanupReport> {
    let cutoff = policy.cutoff(Utc::now());
    let deleted_count = LogRepository::new(pool).delete_older_than(cutoff).await?;

    info!(
        deleted_count,
        retention_days = policy.retention_days(),
        cutoff = %cutoff,
        "Retention cleanup finished"
    );

    Ok(CleanupReport {
        deleted_count,
        retention_days: policy.retention_days(),
        cutoff,
    })
}
