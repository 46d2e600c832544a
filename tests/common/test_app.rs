//! Test application setup utilities
//!
//! Provides utilities for setting up test instances of the application
//! backed by a throwaway in-memory SQLite database.

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

use logkeeper::{
    app_router,
    config::{AppConfig, DatabaseConfig, RetentionConfig},
    db, AppState,
};

/// Test application wrapper for integration testing
#[derive(Debug, Clone)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with a fresh database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a new test application with a custom retention period
    pub async fn with_retention_days(days: u32) -> Self {
        let mut config = test_config();
        config.retention = RetentionConfig {
            log_retention_days: days,
        };
        Self::with_config(config).await
    }

    /// Create a new test application with custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let db = db::init_pool(&config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState { config, db };
        let router = app_router(state.clone());

        Self { router, state }
    }

    /// Make a GET request to the test application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request without a body
    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    /// Make a POST request with a raw JSON-typed body
    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
    }

    /// Store a log entry through the API and return its id
    pub async fn create_log(&self, body: serde_json::Value) -> i64 {
        let response = self.post_json("/api/v1/logs", body).await;
        response.assert_created();
        response.json::<serde_json::Value>()["id"]
            .as_i64()
            .expect("create response carries an id")
    }

    /// Make an arbitrary request
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: axum::http::StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: bytes::Bytes,
}

impl TestResponse {
    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response as JSON")
    }

    /// Assert the response status
    pub fn assert_status(&self, expected: axum::http::StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert the response status is OK (200)
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::OK)
    }

    /// Assert the response status is Created (201)
    pub fn assert_created(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::CREATED)
    }

    /// Assert the response status is Bad Request (400)
    pub fn assert_bad_request(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::BAD_REQUEST)
    }

    /// Assert the response status is Not Found (404)
    pub fn assert_not_found(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::NOT_FOUND)
    }
}

/// Create a test configuration backed by a private in-memory database
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to a single connection that is never reaped.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: u64::from(u32::MAX),
        },
        ..AppConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_creation() {
        let app = TestApp::new().await;
        assert_eq!(app.state.config.retention.log_retention_days, 90);
    }

    #[tokio::test]
    async fn test_response_json_parsing() {
        let app = TestApp::new().await;
        let response = app.get("/health").await;
        let json: serde_json::Value = response.json();
        assert!(json.get("status").is_some());
    }
}
