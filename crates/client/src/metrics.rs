//! Metrics for search lifecycles.
//!
//! This module provides an observer that records lifecycle events through the
//! `metrics` facade:
//! - Searches submitted and finished, labelled by outcome
//! - Status polls and fetch retries
//! - Cleanup attempts, labelled by result
//! - End-to-end search duration
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder such as a Prometheus exporter)
//!
//! # Invariants
//! - Metric recording is infallible and never affects the search
//! - Zero-cost when no metrics recorder is installed

use crate::observer::{SearchEvent, SearchObserver};

/// Metric name for submitted search counter.
pub const METRIC_SEARCHES_SUBMITTED: &str = "qradar_searches_submitted_total";

/// Metric name for finished search counter (label: `outcome`).
pub const METRIC_SEARCHES_FINISHED: &str = "qradar_searches_finished_total";

/// Metric name for search duration histogram (label: `outcome`).
pub const METRIC_SEARCH_DURATION: &str = "qradar_search_duration_seconds";

/// Metric name for status poll counter.
pub const METRIC_POLLS_TOTAL: &str = "qradar_search_polls_total";

/// Metric name for fetch retry counter.
pub const METRIC_FETCH_RETRIES_TOTAL: &str = "qradar_fetch_retries_total";

/// Metric name for cleanup counter (label: `result`).
pub const METRIC_CLEANUPS_TOTAL: &str = "qradar_search_cleanups_total";

/// Records lifecycle events as metrics.
///
/// # Example
///
/// ```rust,ignore
/// use qradar_client::{QRadarClient, metrics::MetricsObserver};
///
/// let client = QRadarClient::builder()
///     .from_config(&config)
///     .observer(MetricsObserver::new())
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    /// Whether metrics collection is enabled.
    enabled: bool,
}

impl MetricsObserver {
    /// Create a new, enabled metrics observer.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create an observer that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl SearchObserver for MetricsObserver {
    fn on_event(&self, event: &SearchEvent) {
        if !self.enabled {
            return;
        }

        match event {
            SearchEvent::Submitted { .. } => {
                metrics::counter!(METRIC_SEARCHES_SUBMITTED).increment(1);
            }
            SearchEvent::Polled { status, .. } => {
                metrics::counter!(METRIC_POLLS_TOTAL, "status" => status.to_string()).increment(1);
            }
            SearchEvent::FetchRetrying { .. } => {
                metrics::counter!(METRIC_FETCH_RETRIES_TOTAL).increment(1);
            }
            SearchEvent::CleanedUp { .. } => {
                metrics::counter!(METRIC_CLEANUPS_TOTAL, "result" => "ok").increment(1);
            }
            SearchEvent::CleanupFailed { .. } => {
                metrics::counter!(METRIC_CLEANUPS_TOTAL, "result" => "error").increment(1);
            }
            SearchEvent::Finished { outcome, elapsed } => {
                metrics::counter!(METRIC_SEARCHES_FINISHED, "outcome" => outcome.as_str())
                    .increment(1);
                metrics::histogram!(METRIC_SEARCH_DURATION, "outcome" => outcome.as_str())
                    .record(elapsed.as_secs_f64());
            }
            _ => {}
        }
    }
}
