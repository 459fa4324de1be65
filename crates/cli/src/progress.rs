//! Progress indicators for the QRadar CLI.
//!
//! Responsibilities:
//! - Show search progress (0-100%) while the lifecycle polls, driven by
//!   lifecycle events.
//! - Provide a spinner for single requests (status, delete).
//! - Ensure ALL progress output is written to STDERR (never stdout), so machine-readable
//!   command output (json/table/csv/ndjson) is not contaminated.
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.
//! - This module does not print command results; stdout remains reserved for results.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use qradar_client::{SearchEvent, SearchObserver};

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg} [{bar:40.cyan/blue}] {pos:>3}%")
        .map(|style| style.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Bar position for a percent value, clamped to 0..=100.
fn bar_position(percent: f64) -> u64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0) as u64
    } else {
        0
    }
}

/// A percent-based progress bar for a running search.
///
/// Registered as a lifecycle observer; a no-op when disabled.
pub(crate) struct SearchProgress {
    label: String,
    pb: Option<ProgressBar>,
}

impl SearchProgress {
    /// Create a new search progress indicator.
    ///
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new(100);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(bar_style());
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Update progress from the console's percent-complete value.
    pub(crate) fn set_percent(&self, percent: f64) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.set_position(bar_position(percent));
    }

    /// Finish the progress indicator with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.set_position(100);
        pb.finish_with_message(format!("{} done", self.label));
    }

    /// Remove the progress line, e.g. before an error is printed.
    pub(crate) fn clear(&self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

impl SearchObserver for SearchProgress {
    fn on_event(&self, event: &SearchEvent) {
        match event {
            SearchEvent::Polled {
                progress: Some(percent),
                ..
            } => self.set_percent(*percent),
            SearchEvent::Completed { .. } => self.finish(),
            SearchEvent::Failed { .. }
            | SearchEvent::TimedOut { .. }
            | SearchEvent::Cancelled { .. } => self.clear(),
            _ => {}
        }
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        // Clear the line if the search ended without completing.
        self.clear();
    }
}

/// An indefinite spinner for short operations (status, delete).
///
/// Always draws to STDERR; no-op when disabled.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// Create a new spinner.
    ///
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(spinner_style());
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Finish the spinner with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.finish_with_message(format!("{} done", self.label));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
