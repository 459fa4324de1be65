//! Ariel search lifecycle: submit, poll, fetch, cleanup.
//!
//! Responsibilities:
//! - Drive one search from submission to materialized rows.
//! - Enforce the wall-clock completion budget and the bounded fetch retry.
//! - Delete abandoned searches (timeout, cancellation) and, when configured,
//!   completed ones.
//! - Report every phase to the registered observers.
//!
//! Does NOT handle:
//! - HTTP details (see [`crate::endpoints`] via [`SearchBackend`]).
//! - Query composition (see [`crate::query`]).
//!
//! Invariants:
//! - Phases for one search are strictly sequential.
//! - The first status poll always happens; the deadline is checked only after
//!   each poll interval and is anchored when the wait loop starts.
//! - CANCELED and ERROR end the wait immediately without a delete.
//! - Fetch retry is bounded by its own policy and never by the search budget.
//! - Cleanup failures are reported to observers and never returned.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use qradar_config::SearchConfig;
use qradar_config::constants::{
    DEFAULT_CLEANUP_ON_COMPLETION, DEFAULT_FETCH_MAX_RETRIES, DEFAULT_FETCH_RETRY_DELAY_SECS,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SEARCH_TIMEOUT_MINUTES,
};

use crate::backend::SearchBackend;
use crate::cancellation::CancellationToken;
use crate::error::{ClientError, Result};
use crate::models::{SearchInfo, SearchJob, SearchStatus};
use crate::observer::{Observers, SearchEvent, SearchOutcome};
use crate::results::{ResultSet, materialize};

/// Bounded retry for the results request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRetryPolicy {
    /// Retries after the first failed attempt.
    pub max_retries: usize,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl FetchRetryPolicy {
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

impl Default for FetchRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_FETCH_MAX_RETRIES,
            delay: Duration::from_secs(DEFAULT_FETCH_RETRY_DELAY_SECS),
        }
    }
}

/// Timing and cleanup settings for a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Wall-clock budget for the search to reach COMPLETED.
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub fetch_retry: FetchRetryPolicy,
    pub cleanup_on_completion: bool,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_MINUTES * 60),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            fetch_retry: FetchRetryPolicy::default(),
            cleanup_on_completion: DEFAULT_CLEANUP_ON_COMPLETION,
        }
    }
}

impl From<&SearchConfig> for LifecycleSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            timeout: config.timeout(),
            poll_interval: config.poll_interval,
            fetch_retry: FetchRetryPolicy::new(config.fetch_max_retries, config.fetch_retry_delay),
            cleanup_on_completion: config.cleanup_on_completion,
        }
    }
}

/// Runs searches against a [`SearchBackend`].
///
/// A controller is cheap to build and borrows everything it uses; build one
/// per search.
pub struct JobController<'a, B> {
    backend: &'a B,
    settings: &'a LifecycleSettings,
    observers: &'a Observers,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, B: SearchBackend> JobController<'a, B> {
    pub fn new(backend: &'a B, settings: &'a LifecycleSettings, observers: &'a Observers) -> Self {
        Self {
            backend,
            settings,
            observers,
            cancel: None,
        }
    }

    /// Honor `token` between polls and during fetch retry delays.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Create the search. Submission is never retried.
    pub async fn submit(&self, query: &str) -> Result<SearchJob> {
        let job = self.backend.create_search(query).await?;
        self.observers.notify(SearchEvent::Submitted {
            search_id: job.search_id.clone(),
            query: query.to_string(),
        });
        Ok(job)
    }

    /// Read the current status once.
    pub async fn poll(&self, search_id: &str) -> Result<SearchInfo> {
        self.backend.search_status(search_id).await
    }

    /// Poll until the search completes, fails, or runs out of time.
    ///
    /// # Errors
    ///
    /// - [`ClientError::JobFailed`] on CANCELED or ERROR (no delete).
    /// - [`ClientError::JobTimedOut`] once the budget is spent (after a delete).
    /// - [`ClientError::Cancelled`] when the token fires (after a delete).
    /// - Status request errors are returned as-is.
    pub async fn await_completion(&self, search_id: &str) -> Result<SearchInfo> {
        let started = Instant::now();
        // A budget too large to represent as an instant never expires.
        let deadline = started.checked_add(self.settings.timeout);
        let mut polls = 0usize;

        loop {
            let info = self.poll(search_id).await?;
            polls += 1;
            self.observers.notify(SearchEvent::Polled {
                search_id: search_id.to_string(),
                status: info.status.clone(),
                progress: info.progress,
                poll: polls,
            });

            match &info.status {
                SearchStatus::Completed => {
                    self.observers.notify(SearchEvent::Completed {
                        search_id: search_id.to_string(),
                        polls,
                        elapsed: started.elapsed(),
                    });
                    return Ok(info);
                }
                status if status.is_failure() => {
                    self.observers.notify(SearchEvent::Failed {
                        search_id: search_id.to_string(),
                        status: status.clone(),
                    });
                    return Err(ClientError::JobFailed {
                        search_id: search_id.to_string(),
                        status: status.to_string(),
                    });
                }
                _ => {}
            }

            self.pause(search_id, self.settings.poll_interval).await?;

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.observers.notify(SearchEvent::TimedOut {
                    search_id: search_id.to_string(),
                    timeout: self.settings.timeout,
                });
                self.cleanup(search_id).await;
                return Err(ClientError::JobTimedOut {
                    search_id: search_id.to_string(),
                    timeout: self.settings.timeout,
                });
            }
        }
    }

    /// Request the results envelope, retrying failed attempts per policy.
    ///
    /// Non-200 responses and transport errors are retried; a 200 whose body
    /// is not JSON is not.
    pub async fn fetch(&self, search_id: &str) -> Result<Value> {
        let policy = self.settings.fetch_retry;
        let max_attempts = policy.max_attempts();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            match self.backend.search_results(search_id).await {
                Ok(envelope) => return Ok(envelope),
                Err(e @ (ClientError::ApiError { .. } | ClientError::HttpError(_))) => {
                    if attempt >= max_attempts {
                        return Err(ClientError::FetchFailed {
                            search_id: search_id.to_string(),
                            attempts: attempt,
                        });
                    }
                    self.observers.notify(SearchEvent::FetchRetrying {
                        search_id: search_id.to_string(),
                        attempt,
                        max_attempts,
                        delay: policy.delay,
                        error: e.to_string(),
                    });
                    self.pause(search_id, policy.delay).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Delete the search, best effort.
    pub async fn cleanup(&self, search_id: &str) {
        match self.backend.delete_search(search_id).await {
            Ok(()) => self.observers.notify(SearchEvent::CleanedUp {
                search_id: search_id.to_string(),
            }),
            Err(e) => self.observers.notify(SearchEvent::CleanupFailed {
                search_id: search_id.to_string(),
                error: e.to_string(),
            }),
        }
    }

    /// Submit, wait, fetch, materialize and optionally clean up.
    pub async fn run(&self, query: &str) -> Result<ResultSet> {
        let started = Instant::now();
        let result = self.run_phases(query).await;
        self.observers.notify(SearchEvent::Finished {
            outcome: outcome_of(&result),
            elapsed: started.elapsed(),
        });
        result
    }

    async fn run_phases(&self, query: &str) -> Result<ResultSet> {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled { search_id: None });
        }

        let job = self.submit(query).await?;
        let search_id = job.search_id.as_str();

        self.await_completion(search_id).await?;
        let envelope = self.fetch(search_id).await?;
        let results = materialize(envelope)?;
        self.observers.notify(SearchEvent::Fetched {
            search_id: search_id.to_string(),
            envelope_key: results.envelope_key.clone(),
            rows: results.len(),
        });

        if self.settings.cleanup_on_completion {
            self.cleanup(search_id).await;
        }

        Ok(results)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }

    /// Sleep for `delay`, abandoning the search if cancellation fires first.
    async fn pause(&self, search_id: &str, delay: Duration) -> Result<()> {
        let Some(token) = self.cancel else {
            tokio::time::sleep(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                self.observers.notify(SearchEvent::Cancelled {
                    search_id: search_id.to_string(),
                });
                self.cleanup(search_id).await;
                Err(ClientError::Cancelled {
                    search_id: Some(search_id.to_string()),
                })
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

fn outcome_of(result: &Result<ResultSet>) -> SearchOutcome {
    match result {
        Ok(_) => SearchOutcome::Succeeded,
        Err(ClientError::SubmissionFailed { .. }) => SearchOutcome::SubmissionFailed,
        Err(ClientError::JobFailed { .. }) => SearchOutcome::JobFailed,
        Err(ClientError::JobTimedOut { .. }) => SearchOutcome::TimedOut,
        Err(ClientError::FetchFailed { .. }) => SearchOutcome::FetchFailed,
        Err(ClientError::Cancelled { .. }) => SearchOutcome::Cancelled,
        Err(_) => SearchOutcome::Error,
    }
}
