//! Retention cleanup step definitions

use cucumber::{given, when};

use crate::common::LogFixtures;
use crate::features::support::TestWorld;

#[given(expr = "a log entry {int} days old")]
async fn log_entry_days_old(world: &mut TestWorld, days: i64) {
    world.post_json("/api/v1/logs", LogFixtures::days_old(days)).await;
    world.response().assert_created();
}

#[when("I run the retention cleanup")]
async fn run_cleanup(world: &mut TestWorld) {
    world.post("/api/v1/logs/cleanup").await;
}
