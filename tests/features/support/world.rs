//! Test world for Cucumber scenarios

use cucumber::World;
use serde_json::Value;

use crate::common::{TestApp, TestResponse};

/// Test world that maintains state across scenario steps
#[derive(Debug, Default, World)]
pub struct TestWorld {
    /// Application under test, started by a `Given` step
    pub app: Option<TestApp>,

    /// Response from last API call
    pub last_response: Option<TestResponse>,
}

impl TestWorld {
    pub fn app(&self) -> &TestApp {
        self.app
            .as_ref()
            .expect("No running log service; add a Given step that starts one")
    }

    pub fn response(&self) -> &TestResponse {
        self.last_response.as_ref().expect("No response available")
    }

    pub fn response_json(&self) -> Value {
        self.response().json()
    }

    pub async fn get(&mut self, uri: &str) {
        let response = self.app().get(uri).await;
        self.last_response = Some(response);
    }

    pub async fn post(&mut self, uri: &str) {
        let response = self.app().post(uri).await;
        self.last_response = Some(response);
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) {
        let response = self.app().post_json(uri, body).await;
        self.last_response = Some(response);
    }
}
