//! Common test utilities for integration tests.
//!
//! This module provides shared helpers and re-exports commonly used types for
//! testing the QRadar client against a wiremock console.
//!
//! # Invariants
//! - Clients built here use millisecond poll and retry intervals so the full
//!   lifecycle runs in well under a second
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use std::time::Duration;

use secrecy::SecretString;

#[allow(unused_imports)]
pub use qradar_client::testing::RecordingObserver;
#[allow(unused_imports)]
pub use qradar_client::{
    AqlQuery, AuthStrategy, ClientError, FetchRetryPolicy, QRadarClient, QRadarClientBuilder,
    SearchEvent,
};
#[allow(unused_imports)]
pub use serde_json::json;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCHES: &str = "/api/ariel/searches";

pub fn token_auth() -> AuthStrategy {
    AuthStrategy::SecToken {
        token: SecretString::new("test-token".to_string().into()),
    }
}

#[allow(dead_code)]
pub fn basic_auth() -> AuthStrategy {
    AuthStrategy::Basic {
        username: "admin".to_string(),
        password: SecretString::new("hunter2".to_string().into()),
    }
}

/// Builder pointed at `server` with fast lifecycle timings.
pub fn fast_builder(server: &MockServer) -> QRadarClientBuilder {
    QRadarClient::builder()
        .base_url(server.uri())
        .auth_strategy(token_auth())
        .search_timeout(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(20))
        .fetch_retry(FetchRetryPolicy::new(3, Duration::from_millis(10)))
}

#[allow(dead_code)]
pub fn fast_client(server: &MockServer) -> QRadarClient {
    fast_builder(server).build().expect("client should build")
}

/// Path of a single search.
#[allow(dead_code)]
pub fn search_path(search_id: &str) -> String {
    format!("{SEARCHES}/{search_id}")
}

/// Path of a search's results.
#[allow(dead_code)]
pub fn results_path(search_id: &str) -> String {
    format!("{SEARCHES}/{search_id}/results")
}

#[allow(dead_code)]
pub fn created(search_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "search_id": search_id,
        "status": "WAIT",
    }))
}

#[allow(dead_code)]
pub fn status(search_id: &str, status: &str, progress: u32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "search_id": search_id,
        "status": status,
        "progress": progress,
    }))
}
