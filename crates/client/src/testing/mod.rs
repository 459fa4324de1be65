//! Testing utilities for code built on the QRadar client.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! - [`RecordingObserver`] captures every lifecycle event for assertions.
//! - [`ScriptedBackend`] answers lifecycle requests from a script instead of
//!   a console, so tests can run the controller on tokio's paused clock.
//!
//! # Example
//! ```ignore
//! use qradar_client::testing::{PollReply, ScriptedBackend};
//!
//! let backend = ScriptedBackend::new("abc")
//!     .with_polls([PollReply::running(), PollReply::completed()])
//!     .with_results_json(serde_json::json!({"events": [{"x": "y"}]}));
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use serde_json::Value;

use crate::backend::SearchBackend;
use crate::error::{ClientError, Result};
use crate::models::{SearchInfo, SearchJob, SearchStatus};
use crate::observer::{SearchEvent, SearchObserver};

/// Observer that stores every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SearchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far.
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SearchEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl SearchObserver for RecordingObserver {
    fn on_event(&self, event: &SearchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Scripted answer to a status request.
#[derive(Debug, Clone)]
pub enum PollReply {
    Status(SearchStatus, Option<f64>),
    /// Non-success HTTP status on the status request.
    HttpStatus(u16),
}

impl PollReply {
    pub fn running() -> Self {
        Self::Status(SearchStatus::Execute, Some(50.0))
    }

    pub fn completed() -> Self {
        Self::Status(SearchStatus::Completed, Some(100.0))
    }

    pub fn status(status: &str) -> Self {
        Self::Status(SearchStatus::from(status), None)
    }
}

/// Scripted answer to a results request.
#[derive(Debug, Clone)]
pub enum FetchReply {
    Envelope(Value),
    /// Non-200 HTTP status on the results request.
    HttpStatus(u16),
}

/// Request counts observed by a [`ScriptedBackend`].
#[derive(Debug, Default)]
pub struct CallCounts {
    pub submits: AtomicUsize,
    pub polls: AtomicUsize,
    pub fetches: AtomicUsize,
    pub deletes: AtomicUsize,
}

/// A [`SearchBackend`] that replays scripted replies.
///
/// Poll and fetch scripts are consumed in order; once one is down to its
/// last reply, that reply repeats forever.
#[derive(Debug)]
pub struct ScriptedBackend {
    search_id: String,
    submit_status: Option<u16>,
    polls: Mutex<VecDeque<PollReply>>,
    fetches: Mutex<VecDeque<FetchReply>>,
    delete_status: Option<u16>,
    submitted_queries: Mutex<Vec<String>>,
    calls: CallCounts,
}

impl ScriptedBackend {
    /// A backend that accepts submissions as `search_id`, reports COMPLETED,
    /// and returns an empty `events` envelope.
    pub fn new(search_id: impl Into<String>) -> Self {
        Self {
            search_id: search_id.into(),
            submit_status: None,
            polls: Mutex::new(VecDeque::from([PollReply::completed()])),
            fetches: Mutex::new(VecDeque::from([FetchReply::Envelope(
                serde_json::json!({"events": []}),
            )])),
            delete_status: None,
            submitted_queries: Mutex::new(Vec::new()),
            calls: CallCounts::default(),
        }
    }

    /// Reject submissions with `status`.
    pub fn with_submit_failure(mut self, status: u16) -> Self {
        self.submit_status = Some(status);
        self
    }

    pub fn with_polls(self, replies: impl IntoIterator<Item = PollReply>) -> Self {
        Self {
            polls: Mutex::new(replies.into_iter().collect()),
            ..self
        }
    }

    pub fn with_fetches(self, replies: impl IntoIterator<Item = FetchReply>) -> Self {
        Self {
            fetches: Mutex::new(replies.into_iter().collect()),
            ..self
        }
    }

    /// Always answer results requests with `envelope`.
    pub fn with_results_json(self, envelope: Value) -> Self {
        self.with_fetches([FetchReply::Envelope(envelope)])
    }

    /// Answer delete requests with `status`.
    pub fn with_delete_failure(mut self, status: u16) -> Self {
        self.delete_status = Some(status);
        self
    }

    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    pub fn submits(&self) -> usize {
        self.calls.submits.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.calls.polls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.calls.fetches.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.calls.deletes.load(Ordering::SeqCst)
    }

    /// Query texts received by `create_search`, in order.
    pub fn submitted_queries(&self) -> Vec<String> {
        self.submitted_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn next<T: Clone>(script: &Mutex<VecDeque<T>>) -> Option<T> {
        let mut script = script.lock().ok()?;
        if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("scripted://api/ariel/searches/{}{}", self.search_id, suffix)
    }
}

impl SearchBackend for ScriptedBackend {
    async fn create_search(&self, query: &str) -> Result<SearchJob> {
        self.calls.submits.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.submitted_queries.lock() {
            queries.push(query.to_string());
        }
        if let Some(status) = self.submit_status {
            return Err(ClientError::SubmissionFailed {
                status,
                message: "scripted submission failure".to_string(),
            });
        }
        Ok(SearchJob {
            search_id: self.search_id.clone(),
            status: SearchStatus::Wait,
            submitted_at: Utc::now(),
        })
    }

    async fn search_status(&self, search_id: &str) -> Result<SearchInfo> {
        self.calls.polls.fetch_add(1, Ordering::SeqCst);
        match Self::next(&self.polls) {
            Some(PollReply::Status(status, progress)) => Ok(SearchInfo {
                search_id: Some(search_id.to_string()),
                status,
                progress,
                record_count: None,
            }),
            Some(PollReply::HttpStatus(status)) => Err(ClientError::ApiError {
                status,
                url: self.url(""),
                message: "scripted status failure".to_string(),
            }),
            None => Err(ClientError::MalformedResponse("poll script is empty".into())),
        }
    }

    async fn search_results(&self, _search_id: &str) -> Result<Value> {
        self.calls.fetches.fetch_add(1, Ordering::SeqCst);
        match Self::next(&self.fetches) {
            Some(FetchReply::Envelope(envelope)) => Ok(envelope),
            Some(FetchReply::HttpStatus(status)) => Err(ClientError::ApiError {
                status,
                url: self.url("/results"),
                message: "scripted results failure".to_string(),
            }),
            None => Err(ClientError::MalformedResponse("fetch script is empty".into())),
        }
    }

    async fn delete_search(&self, _search_id: &str) -> Result<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        match self.delete_status {
            Some(status) => Err(ClientError::ApiError {
                status,
                url: self.url(""),
                message: "scripted delete failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}
