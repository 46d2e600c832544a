//! Audit trail repository

use anyhow::{Context, Result};
use chrono::{SubsecRound, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::filter::{push_page, FilterBuilder};
use crate::models::{AuditEntry, AuditFilter, Page, Pagination};
use crate::utils::time::{from_db_timestamp, to_db_timestamp};

#[derive(Debug, sqlx::FromRow)]
struct AuditRow {
    id: i64,
    user_id: Option<i64>,
    action: String,
    details: Option<String>,
    timestamp: String,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = anyhow::Error;

    fn try_from(row: AuditRow) -> Result<Self> {
        Ok(AuditEntry {
            id: row.id,
            user_id: row.user_id,
            action: row.action,
            details: row.details,
            timestamp: from_db_timestamp(&row.timestamp)
                .with_context(|| format!("Invalid timestamp on audit entry {}", row.id))?,
        })
    }
}

pub struct AuditRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuditRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Option<i64>,
        action: &str,
        details: Option<&str>,
    ) -> Result<AuditEntry> {
        // Stored precision is microseconds
        let timestamp = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"
            INSERT INTO audit_trail (user_id, action, details, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(details)
        .bind(to_db_timestamp(&timestamp))
        .execute(self.pool)
        .await
        .context("Failed to insert audit entry")?;

        Ok(AuditEntry {
            id: result.last_insert_rowid(),
            user_id,
            action: action.to_string(),
            details: details.map(|d| d.to_string()),
            timestamp,
        })
    }

    pub async fn query(&self, filter: &AuditFilter, page: Pagination) -> Result<Page<AuditEntry>> {
        let predicates = FilterBuilder::new()
            .eq("user_id", filter.user_id)
            .eq("action", filter.action.clone())
            .since("timestamp", filter.start_time)
            .until("timestamp", filter.end_time);

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM audit_trail");
        predicates.push_where(&mut count);
        let total_count = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await
            .context("Failed to count audit entries")?;

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT id, user_id, action, details, timestamp FROM audit_trail",
        );
        predicates.push_where(&mut select);
        push_page(&mut select, page);
        let rows = select
            .build_query_as::<AuditRow>()
            .fetch_all(self.pool)
            .await
            .context("Failed to list audit entries")?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(AuditEntry::try_from)
                .collect::<Result<Vec<_>>>()?,
            total_count,
            limit: page.limit,
            offset: page.offset,
        })
    }
}
