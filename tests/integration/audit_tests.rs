//! Audit trail integration tests

use serde_json::{json, Value};

use crate::common::{AuditFixtures, TestApp};

#[tokio::test]
async fn test_create_and_list_audit_entries() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/v1/logs/audit/create", AuditFixtures::settings_changed(7))
        .await;
    response.assert_created();
    let created: Value = response.json();
    assert_eq!(created["message"], "Audit entry stored successfully");

    let response = app.get("/api/v1/logs/audit").await;
    response.assert_ok();

    let json: Value = response.json();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["limit"], 100);
    let entry = &json["audit_logs"][0];
    assert_eq!(entry["id"], created["id"]);
    assert_eq!(entry["user_id"], 7);
    assert_eq!(entry["action"], "settings_changed");
    assert_eq!(entry["details"], "theme=dark");
    assert!(entry["timestamp"].is_string());
}

#[tokio::test]
async fn test_audit_action_is_required() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/v1/logs/audit/create", json!({"user_id": 1}))
        .await;
    response.assert_bad_request();
    let json: Value = response.json();
    assert_eq!(json["details"]["missing"], json!(["action"]));

    app.post_json("/api/v1/logs/audit/create", AuditFixtures::action_only("  "))
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn test_audit_action_length_is_bounded() {
    let app = TestApp::new().await;
    app.post_json(
        "/api/v1/logs/audit/create",
        AuditFixtures::action_only(&"a".repeat(101)),
    )
    .await
    .assert_bad_request();
}

#[tokio::test]
async fn test_audit_filters() {
    let app = TestApp::new().await;
    for body in [
        AuditFixtures::settings_changed(1),
        AuditFixtures::settings_changed(2),
        AuditFixtures::action_only("system_start"),
    ] {
        app.post_json("/api/v1/logs/audit/create", body)
            .await
            .assert_created();
    }

    let json: Value = app.get("/api/v1/logs/audit?user_id=2").await.json();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["audit_logs"][0]["user_id"], 2);

    let json: Value = app
        .get("/api/v1/logs/audit?action=settings_changed")
        .await
        .json();
    assert_eq!(json["total_count"], 2);

    let json: Value = app
        .get("/api/v1/logs/audit?start_time=2000-01-01")
        .await
        .json();
    assert_eq!(json["total_count"], 3);

    let json: Value = app
        .get("/api/v1/logs/audit?end_time=2000-01-01")
        .await
        .json();
    assert_eq!(json["total_count"], 0);
}

#[tokio::test]
async fn test_audit_entries_are_newest_first() {
    let app = TestApp::new().await;
    let mut ids = Vec::new();
    for action in ["first", "second", "third"] {
        let created: Value = app
            .post_json("/api/v1/logs/audit/create", AuditFixtures::action_only(action))
            .await
            .json();
        ids.push(created["id"].as_i64().unwrap());
    }

    let json: Value = app.get("/api/v1/logs/audit?limit=2").await.json();
    let listed: Vec<i64> = json["audit_logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1]]);
    assert_eq!(json["total_count"], 3);
}

#[tokio::test]
async fn test_non_integer_audit_user_id_is_rejected() {
    let app = TestApp::new().await;
    app.get("/api/v1/logs/audit?user_id=abc")
        .await
        .assert_bad_request();
}
