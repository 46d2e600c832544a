//! Logkeeper - structured log and audit trail ingestion service
//!
//! Accepts log and audit entries from other services over HTTP, stores them
//! in SQLite, and answers filtered queries, statistics and retention cleanup.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use config::{LogFormat, LogTarget};
use logkeeper::{app_router, config, db, services, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("logkeeper {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration first (before logging, so we know log format)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // The guard must be kept alive for the duration of the program
    // to ensure log messages are flushed to files
    let _log_guard = init_logging(&config);

    ensure_data_directory(&config)?;

    info!("Initializing database connection");
    let db = db::init_pool(&config.database)
        .await
        .context("Failed to initialize database")?;

    if args.iter().any(|arg| arg == "--init-db") {
        info!("Database initialized");
        println!("Database initialized at {}", config.database.url);
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--cleanup") {
        let policy = services::RetentionPolicy::from_config(&config.retention)?;
        let report = services::run_cleanup(&db, policy).await?;
        println!(
            "Cleaned up {} log entries older than {} days",
            report.deleted_count, report.retention_days
        );
        return Ok(());
    }

    let state = AppState {
        config: config.clone(),
        db,
    };
    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address configuration")?;

    info!("Starting HTTP server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// Initialize the logging/tracing infrastructure
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let log_config = &config.logging;
    let json = log_config.format == LogFormat::Json;
    let compact = log_config.format == LogFormat::Compact;

    let console = matches!(log_config.target, LogTarget::Console | LogTarget::Both);
    let (file_writer, guard) = match log_config.target {
        LogTarget::File | LogTarget::Both => match create_file_writer(log_config) {
            Some((writer, guard)) => (Some(writer), Some(guard)),
            None => (None, None),
        },
        LogTarget::Console => (None, None),
    };
    // Fall back to the console when the file writer could not be created
    let console = console || file_writer.is_none();

    let console_layer = console.then(|| {
        if json {
            fmt::layer().json().with_target(true).boxed()
        } else if compact {
            fmt::layer().compact().with_target(false).boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .boxed()
        }
    });

    let file_layer = file_writer.map(|writer| {
        if json {
            fmt::layer().json().with_target(true).with_writer(writer).boxed()
        } else if compact {
            fmt::layer()
                .compact()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Create a non-blocking file writer with optional daily rotation
fn create_file_writer(
    log_config: &config::LoggingConfig,
) -> Option<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    if let Err(e) = std::fs::create_dir_all(&log_config.log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_config.log_dir, e
        );
    }

    let rotation = if log_config.daily_rotation {
        Rotation::DAILY
    } else {
        Rotation::NEVER
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(&log_config.log_prefix)
        .filename_suffix("log");
    if log_config.max_log_files > 0 {
        builder = builder.max_log_files(log_config.max_log_files);
    }

    match builder.build(&log_config.log_dir) {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!(
                "Warning: Failed to open log file in {:?}: {}",
                log_config.log_dir, e
            );
            None
        }
    }
}

/// Ensure the directory of a file-backed SQLite database exists
fn ensure_data_directory(config: &AppConfig) -> Result<()> {
    let url = &config.database.url;
    let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
            info!("Created data directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Create the application router with transport middleware
fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let router = app_router(state).layer(cors).layer(trace_layer);

    match config.server.request_timeout_secs {
        Some(secs) if secs > 0 => {
            info!("Request timeout set to {}s", secs);
            router.layer(TimeoutLayer::new(Duration::from_secs(secs)))
        }
        _ => router,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

fn print_help() {
    println!(
        r#"logkeeper {}

USAGE:
    logkeeper [OPTIONS]

OPTIONS:
    -h, --help       Print this help message
    -V, --version    Print version information
        --init-db    Create the database and apply migrations, then exit
        --cleanup    Delete log entries older than the retention period, then exit

ENVIRONMENT:
    LOGKEEPER_CONFIG        Path to the YAML configuration file
    DATABASE_URL            SQLite connection URL
    PORT, LOGKEEPER_PORT    Listen port (default 5002)
    LOG_RETENTION_DAYS      Days to keep log entries (default 90)
    RUST_LOG, LOG_LEVEL     Log filter (default info)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
