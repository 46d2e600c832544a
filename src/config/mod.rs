//! Configuration management
//!
//! This module provides YAML-based configuration management with support for:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://./data/logkeeper.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Log output target (console or file)
    #[serde(default)]
    pub target: LogTarget,
    /// Directory for log files (used when target is "file" or "both")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name prefix
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,
    /// Rotate the log file daily
    #[serde(default = "default_log_rotation")]
    pub daily_rotation: bool,
    /// Maximum number of rotated log files to keep (0 = unlimited)
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            daily_rotation: default_log_rotation(),
            max_log_files: default_max_log_files(),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Log output target
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to console (stdout/stderr)
    #[default]
    Console,
    /// Log to file with optional rotation
    File,
    /// Log to both console and file
    Both,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

impl LogTarget {
    fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "file" => LogTarget::File,
            "both" => LogTarget::Both,
            _ => LogTarget::Console,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_prefix() -> String {
    "logkeeper".to_string()
}

fn default_log_rotation() -> bool {
    true
}

fn default_max_log_files() -> usize {
    10
}

/// Retention policy for stored log entries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    /// Log entries with a timestamp older than this many days are removed by cleanup
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            log_retention_days: default_log_retention_days(),
        }
    }
}

fn default_log_retention_days() -> u32 {
    90
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file (YAML)
    /// 3. Environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("LOGKEEPER_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = match config_path {
            Some(ref path) if path.exists() => {
                eprintln!("[CONFIG] Loading configuration from: {:?}", path);
                Self::from_file(path)?
            }
            Some(ref path) => {
                eprintln!("[CONFIG] Config file not found: {:?}, using defaults", path);
                AppConfig::default()
            }
            None => {
                eprintln!("[CONFIG] No config file found, using defaults");
                AppConfig::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse a YAML configuration file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_norway::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Find the configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("config.yaml"),
            PathBuf::from("config/config.yaml"),
            PathBuf::from("/etc/logkeeper/config.yaml"),
            dirs::config_dir()
                .map(|p| p.join("logkeeper/config.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = var("LOGKEEPER_HOST") {
            self.server.host = host;
        }
        // PORT is kept for compatibility with existing deployments
        if let Some(port) = var("LOGKEEPER_PORT").or_else(|| var("PORT")) {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Database overrides
        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }

        // Logging overrides
        if let Some(level) = var("RUST_LOG").or_else(|| var("LOG_LEVEL")) {
            self.logging.level = level;
        }
        if let Some(format) = var("LOGKEEPER_LOG_FORMAT") {
            self.logging.format = LogFormat::from_env_value(&format);
        }
        if let Some(target) = var("LOGKEEPER_LOG_TARGET") {
            self.logging.target = LogTarget::from_env_value(&target);
        }
        if let Some(dir) = var("LOGKEEPER_LOG_DIR") {
            self.logging.log_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = var("LOGKEEPER_LOG_PREFIX") {
            self.logging.log_prefix = prefix;
        }
        if let Some(rotation) = var("LOGKEEPER_LOG_ROTATION") {
            self.logging.daily_rotation = rotation.parse().unwrap_or(true);
        }
        if let Some(max_files) = var("LOGKEEPER_LOG_MAX_FILES") {
            if let Ok(n) = max_files.parse() {
                self.logging.max_log_files = n;
            }
        }

        // Retention overrides
        if let Some(days) = var("LOG_RETENTION_DAYS") {
            if let Ok(d) = days.parse() {
                self.retention.log_retention_days = d;
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "database.min_connections ({}) cannot exceed max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.retention.log_retention_days == 0 {
            anyhow::bail!("retention.log_retention_days must be at least 1");
        }

        Ok(())
    }
}
