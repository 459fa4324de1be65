//! Search lifecycle observation.
//!
//! Responsibilities:
//! - Define the events the lifecycle controller emits at each phase.
//! - Provide the default `TracingObserver`, which turns events into log records.
//! - Provide `redact_query` for logging queries without their contents.
//!
//! Does NOT handle:
//! - Deciding what happens next in a search. Observers are notified after the
//!   fact and cannot alter control flow.
//!
//! Invariants:
//! - Observers are called synchronously, in registration order, on the task
//!   running the search.
//! - Query text only reaches logs in full when verbose mode is on.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::SearchStatus;

/// Redact a query for logging: length and a short hash, never the text.
pub fn redact_query(query: &str) -> String {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    let hash = hasher.finish();
    format!("<{} chars, hash={:08x}>", query.len(), hash)
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Succeeded,
    SubmissionFailed,
    JobFailed,
    TimedOut,
    FetchFailed,
    Cancelled,
    Error,
}

impl SearchOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::SubmissionFailed => "submission_failed",
            Self::JobFailed => "job_failed",
            Self::TimedOut => "timed_out",
            Self::FetchFailed => "fetch_failed",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }
}

/// A lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Submitted {
        search_id: String,
        query: String,
    },
    Polled {
        search_id: String,
        status: SearchStatus,
        progress: Option<f64>,
        poll: usize,
    },
    Completed {
        search_id: String,
        polls: usize,
        elapsed: Duration,
    },
    Failed {
        search_id: String,
        status: SearchStatus,
    },
    TimedOut {
        search_id: String,
        timeout: Duration,
    },
    FetchRetrying {
        search_id: String,
        attempt: usize,
        max_attempts: usize,
        delay: Duration,
        error: String,
    },
    Fetched {
        search_id: String,
        envelope_key: String,
        rows: usize,
    },
    CleanedUp {
        search_id: String,
    },
    CleanupFailed {
        search_id: String,
        error: String,
    },
    Cancelled {
        search_id: String,
    },
    Finished {
        outcome: SearchOutcome,
        elapsed: Duration,
    },
}

/// Receives lifecycle events from a running search.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent);
}

impl<T: SearchObserver + ?Sized> SearchObserver for Arc<T> {
    fn on_event(&self, event: &SearchEvent) {
        (**self).on_event(event);
    }
}

/// Ordered set of observers notified for every event.
#[derive(Clone, Default)]
pub struct Observers(Vec<Arc<dyn SearchObserver>>);

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: Arc<dyn SearchObserver>) {
        self.0.push(observer);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SearchObserver>> {
        self.0.iter()
    }

    pub(crate) fn notify(&self, event: SearchEvent) {
        for observer in &self.0 {
            observer.on_event(&event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observers({})", self.0.len())
    }
}

/// Logs lifecycle events through `tracing`.
///
/// With `verbose` set, events are logged at `info` and queries in full.
/// Otherwise everything is `debug` and queries are redacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

macro_rules! lifecycle_log {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent) {
        let verbose = self.verbose;
        match event {
            SearchEvent::Submitted { search_id, query } => {
                if verbose {
                    info!(search_id = %search_id, "Submitted search: {}", query);
                } else {
                    debug!(search_id = %search_id, "Submitted search: {}", redact_query(query));
                }
            }
            SearchEvent::Polled {
                search_id,
                status,
                progress,
                poll,
            } => {
                lifecycle_log!(
                    verbose,
                    search_id = %search_id,
                    poll,
                    "Search {} and {}% complete",
                    status,
                    progress.unwrap_or(0.0)
                );
            }
            SearchEvent::Completed {
                search_id,
                polls,
                elapsed,
            } => {
                lifecycle_log!(verbose, search_id = %search_id, polls, ?elapsed, "Search completed");
            }
            SearchEvent::Failed { search_id, status } => {
                warn!(search_id = %search_id, status = %status, "Search ended without results");
            }
            SearchEvent::TimedOut { search_id, timeout } => {
                warn!(search_id = %search_id, ?timeout, "Search timed out");
            }
            SearchEvent::FetchRetrying {
                search_id,
                attempt,
                max_attempts,
                delay,
                error,
            } => {
                lifecycle_log!(
                    verbose,
                    search_id = %search_id,
                    attempt,
                    max_attempts,
                    ?delay,
                    "Loading results failed, retrying: {}",
                    error
                );
            }
            SearchEvent::Fetched {
                search_id,
                envelope_key,
                rows,
            } => {
                lifecycle_log!(
                    verbose,
                    search_id = %search_id,
                    envelope_key = %envelope_key,
                    rows,
                    "Loaded search results"
                );
            }
            SearchEvent::CleanedUp { search_id } => {
                lifecycle_log!(verbose, "Deleted search cursor {}", search_id);
            }
            SearchEvent::CleanupFailed { search_id, error } => {
                if verbose {
                    warn!(search_id = %search_id, "Failed to delete search: {}", error);
                } else {
                    debug!(search_id = %search_id, "Failed to delete search: {}", error);
                }
            }
            SearchEvent::Cancelled { search_id } => {
                lifecycle_log!(verbose, search_id = %search_id, "Search cancelled");
            }
            SearchEvent::Finished { outcome, elapsed } => {
                debug!(outcome = outcome.as_str(), ?elapsed, "Search finished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_redact_query_hides_content() {
        let query = "SELECT * FROM events WHERE username='alice'";
        let redacted = redact_query(query);
        assert!(!redacted.contains("alice"));
        assert!(redacted.starts_with(&format!("<{} chars, hash=", query.len())));
        assert_eq!(redacted, redact_query(query));
    }

    #[test]
    fn test_redact_query_distinguishes_queries() {
        assert_ne!(redact_query("SELECT 1"), redact_query("SELECT 2"));
    }

    struct Counter(Mutex<Vec<&'static str>>, &'static str);

    impl SearchObserver for Counter {
        fn on_event(&self, _event: &SearchEvent) {
            self.0.lock().unwrap().push(self.1);
        }
    }

    #[test]
    fn test_observers_notified_in_order() {
        let log = Arc::new(Counter(Mutex::new(Vec::new()), "first"));
        let second = Arc::new(Counter(Mutex::new(Vec::new()), "second"));
        let mut observers = Observers::new();
        observers.push(log.clone());
        observers.push(second.clone());

        observers.notify(SearchEvent::CleanedUp {
            search_id: "abc".to_string(),
        });

        assert_eq!(observers.len(), 2);
        assert_eq!(*log.0.lock().unwrap(), vec!["first"]);
        assert_eq!(*second.0.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn test_tracing_observer_handles_every_event() {
        let observer = TracingObserver::new(true);
        let events = [
            SearchEvent::Submitted {
                search_id: "abc".into(),
                query: "SELECT 1".into(),
            },
            SearchEvent::Polled {
                search_id: "abc".into(),
                status: SearchStatus::Execute,
                progress: Some(50.0),
                poll: 1,
            },
            SearchEvent::CleanupFailed {
                search_id: "abc".into(),
                error: "boom".into(),
            },
            SearchEvent::Finished {
                outcome: SearchOutcome::Succeeded,
                elapsed: Duration::from_secs(1),
            },
        ];
        for event in &events {
            observer.on_event(event);
        }
        TracingObserver::default().on_event(&events[0]);
    }
}
