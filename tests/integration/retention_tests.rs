//! Retention cleanup integration tests

use serde_json::Value;

use crate::common::{AuditFixtures, LogFixtures, TestApp};

#[tokio::test]
async fn test_cleanup_removes_only_expired_entries() {
    let app = TestApp::with_retention_days(30).await;

    app.create_log(LogFixtures::days_old(31)).await;
    app.create_log(LogFixtures::days_old(45)).await;
    let kept = app.create_log(LogFixtures::days_old(29)).await;
    let today = app.create_log(LogFixtures::days_old(0)).await;

    let response = app.post("/api/v1/logs/cleanup").await;
    response.assert_ok();

    let json: Value = response.json();
    assert_eq!(json["deleted_count"], 2);
    assert_eq!(json["retention_days"], 30);
    assert!(json["cutoff"].is_string());
    assert_eq!(
        json["message"],
        "Cleaned up 2 log entries older than 30 days"
    );

    let remaining: Value = app.get("/api/v1/logs").await.json();
    let ids: Vec<i64> = remaining["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![today, kept]);
}

#[tokio::test]
async fn test_second_cleanup_deletes_nothing() {
    let app = TestApp::with_retention_days(30).await;
    app.create_log(LogFixtures::days_old(60)).await;

    let first: Value = app.post("/api/v1/logs/cleanup").await.json();
    assert_eq!(first["deleted_count"], 1);

    let second: Value = app.post("/api/v1/logs/cleanup").await.json();
    assert_eq!(second["deleted_count"], 0);
}

#[tokio::test]
async fn test_cleanup_uses_default_retention() {
    let app = TestApp::new().await;
    app.create_log(LogFixtures::days_old(89)).await;
    app.create_log(LogFixtures::days_old(91)).await;

    let json: Value = app.post("/api/v1/logs/cleanup").await.json();
    assert_eq!(json["retention_days"], 90);
    assert_eq!(json["deleted_count"], 1);
}

#[tokio::test]
async fn test_cleanup_never_touches_audit_trail() {
    let app = TestApp::with_retention_days(1).await;
    app.post_json("/api/v1/logs/audit/create", AuditFixtures::settings_changed(7))
        .await
        .assert_created();
    app.create_log(LogFixtures::days_old(10)).await;

    let json: Value = app.post("/api/v1/logs/cleanup").await.json();
    assert_eq!(json["deleted_count"], 1);

    let audit: Value = app.get("/api/v1/logs/audit").await.json();
    assert_eq!(audit["total_count"], 1);
}

#[tokio::test]
async fn test_cleanup_on_empty_store() {
    let app = TestApp::new().await;
    let json: Value = app.post("/api/v1/logs/cleanup").await.json();
    assert_eq!(json["deleted_count"], 0);
}
