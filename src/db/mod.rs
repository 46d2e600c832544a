//! Database layer
//!
//! SQLite storage for structured log entries and the audit trail. The
//! schema lives in `migrations/` and is applied when the pool is created.

pub mod audit_repository;
pub mod filter;
pub mod log_repository;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::info;

use crate::config::DatabaseConfig;

pub use audit_repository::AuditRepository;
pub use filter::{FilterBuilder, FilterValue};
pub use log_repository::LogRepository;

/// Database connection pool type
pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool and apply migrations
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("Invalid database URL: {}", config.url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database schema is up to date");

    Ok(pool)
}

/// Check that the database answers a trivial query
pub async fn check_health(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Database health check failed")?;
    Ok(())
}

/// Single-connection in-memory pool for unit tests
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 30,
        idle_timeout_secs: u64::from(u32::MAX),
    };
    init_pool(&config).await.expect("Failed to initialize test database")
}
