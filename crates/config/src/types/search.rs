//! Search lifecycle settings.
//!
//! Responsibilities:
//! - Hold the wall-clock search budget, poll cadence, fetch retry policy,
//!   verbosity, and cleanup behavior.
//!
//! Does NOT handle:
//! - Enforcing these settings (see the client crate's lifecycle controller).

use crate::constants::{
    DEFAULT_CLEANUP_ON_COMPLETION, DEFAULT_FETCH_MAX_RETRIES, DEFAULT_FETCH_RETRY_DELAY_SECS,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SEARCH_TIMEOUT_MINUTES,
};
use crate::types::connection::duration_seconds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied to every search run with a given config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minutes to wait for a search to complete before abandoning it.
    pub timeout_minutes: u64,
    /// Delay between status polls (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub poll_interval: Duration,
    /// Retries after the first failed results request.
    pub fetch_max_retries: usize,
    /// Delay between results request attempts (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub fetch_retry_delay: Duration,
    /// Log lifecycle events at info level instead of debug.
    pub verbose: bool,
    /// Delete the server-side search once results are loaded.
    pub cleanup_on_completion: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: DEFAULT_SEARCH_TIMEOUT_MINUTES,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            fetch_max_retries: DEFAULT_FETCH_MAX_RETRIES,
            fetch_retry_delay: Duration::from_secs(DEFAULT_FETCH_RETRY_DELAY_SECS),
            verbose: false,
            cleanup_on_completion: DEFAULT_CLEANUP_ON_COMPLETION,
        }
    }
}

impl SearchConfig {
    /// The search budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_minutes.saturating_mul(60))
    }
}
