//! Log ingestion step definitions

use cucumber::{then, when};

use crate::common::LogFixtures;
use crate::features::support::TestWorld;

#[when(expr = "I store a {string} {string} log at level {string}")]
async fn store_log(world: &mut TestWorld, service: String, event_type: String, level: String) {
    let body = LogFixtures::entry(&service, &event_type, &level, "2024-02-20T12:00:00Z");
    world.post_json("/api/v1/logs", body).await;
    world.response().assert_created();
}

#[when(expr = "I submit a log without {string}")]
async fn submit_incomplete_log(world: &mut TestWorld, field: String) {
    let mut body = LogFixtures::order_failed();
    if let Some(object) = body.as_object_mut() {
        object.remove(&field);
    }
    world.post_json("/api/v1/logs", body).await;
}

#[when(expr = "I query logs with {string}")]
async fn query_logs(world: &mut TestWorld, query: String) {
    world.get(&format!("/api/v1/logs?{}", query)).await;
}

#[when("I request log statistics")]
async fn request_stats(world: &mut TestWorld) {
    world.get("/api/v1/logs/stats").await;
}

#[then(expr = "the query should report {int} total entries")]
async fn total_entries(world: &mut TestWorld, expected: i64) {
    assert_eq!(world.response_json()["total_count"].as_i64(), Some(expected));
}

#[then(expr = "every returned log should have {word} {string}")]
async fn every_log_has(world: &mut TestWorld, field: String, value: String) {
    let body = world.response_json();
    let logs = body["logs"].as_array().expect("logs array");
    assert!(!logs.is_empty());
    for log in logs {
        assert_eq!(log[field.as_str()], value.as_str());
    }
}

#[then(expr = "the missing fields should be {string}")]
async fn missing_fields(world: &mut TestWorld, fields: String) {
    let body = world.response_json();
    let expected: Vec<&str> = fields.split(", ").collect();
    let missing: Vec<&str> = body["details"]["missing"]
        .as_array()
        .expect("missing field list")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(missing, expected);
}

#[then(expr = "the {word} statistics should count {string} {int} times")]
async fn group_count(world: &mut TestWorld, group: String, key: String, expected: i64) {
    let body = world.response_json();
    let groups = body["statistics"][format!("by_{}", group)]
        .as_array()
        .expect("statistics group")
        .clone();
    let count = groups
        .iter()
        .find(|g| g["key"] == key.as_str())
        .and_then(|g| g["count"].as_i64());
    assert_eq!(count, Some(expected), "groups: {:?}", groups);
}
