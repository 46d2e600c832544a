//! Log entry repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::filter::{push_page, FilterBuilder};
use crate::models::{GroupColumn, GroupCount, LogEntry, LogFilter, NewLogEntry, Page, Pagination};
use crate::utils::time::{from_db_timestamp, to_db_timestamp};

const LOG_COLUMNS: &str = "id, timestamp, service, event_type, user_id, details, level, created_at";

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: i64,
    timestamp: String,
    service: String,
    event_type: String,
    user_id: Option<String>,
    details: String,
    level: String,
    created_at: String,
}

impl TryFrom<LogRow> for LogEntry {
    type Error = anyhow::Error;

    fn try_from(row: LogRow) -> Result<Self> {
        Ok(LogEntry {
            id: row.id,
            timestamp: from_db_timestamp(&row.timestamp)
                .with_context(|| format!("Invalid timestamp on log entry {}", row.id))?,
            service: row.service,
            event_type: row.event_type,
            user_id: row.user_id,
            details: serde_json::from_str(&row.details)
                .with_context(|| format!("Invalid details on log entry {}", row.id))?,
            level: row.level,
            created_at: from_db_timestamp(&row.created_at)
                .with_context(|| format!("Invalid created_at on log entry {}", row.id))?,
        })
    }
}

fn log_predicates(filter: &LogFilter) -> FilterBuilder {
    FilterBuilder::new()
        .eq("service", filter.service.clone())
        .eq("event_type", filter.event_type.clone())
        .eq("user_id", filter.user_id.clone())
        .eq("level", filter.level.clone())
        .since("timestamp", filter.start_time)
        .until("timestamp", filter.end_time)
}

pub struct LogRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LogRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated entry and return its id
    pub async fn insert(&self, entry: &NewLogEntry) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO log_entries (timestamp, service, event_type, user_id, details, level, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(to_db_timestamp(&entry.timestamp))
        .bind(&entry.service)
        .bind(&entry.event_type)
        .bind(entry.user_id.as_deref())
        .bind(entry.details.to_string())
        .bind(&entry.level)
        .bind(to_db_timestamp(&Utc::now()))
        .execute(self.pool)
        .await
        .context("Failed to insert log entry")?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch one page of matching entries, most recent first
    pub async fn query(&self, filter: &LogFilter, page: Pagination) -> Result<Page<LogEntry>> {
        let predicates = log_predicates(filter);

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM log_entries");
        predicates.push_where(&mut count);
        let total_count: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await
            .context("Failed to count log entries")?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM log_entries", LOG_COLUMNS));
        predicates.push_where(&mut select);
        push_page(&mut select, page);
        let rows = select
            .build_query_as::<LogRow>()
            .fetch_all(self.pool)
            .await
            .context("Failed to list log entries")?;

        let items = rows
            .into_iter()
            .map(LogEntry::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total_count,
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// Delete every entry whose `timestamp` is strictly before `cutoff`
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM log_entries");
        FilterBuilder::new()
            .before("timestamp", cutoff)
            .push_where(&mut delete);

        let result = delete
            .build()
            .execute(self.pool)
            .await
            .context("Failed to delete expired log entries")?;

        Ok(result.rows_affected())
    }

    /// Count entries grouped by one column over the whole table
    pub async fn count_by(&self, group: GroupColumn) -> Result<Vec<GroupCount>> {
        let column = group.column();
        let sql = format!(
            "SELECT {column} AS \"key\", COUNT(*) AS count FROM log_entries \
             GROUP BY {column} ORDER BY count DESC, \"key\" ASC"
        );

        sqlx::query_as::<_, GroupCount>(&sql)
            .fetch_all(self.pool)
            .await
            .with_context(|| format!("Failed to count log entries by {}", column))
    }
}
