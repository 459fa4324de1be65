//! Cooperative cancellation for running searches.
//!
//! Responsibilities:
//! - Provide a lightweight cancellation token that can be cloned and handed to
//!   [`crate::QRadarClient::search_with_cancel`].
//!
//! Does NOT handle:
//! - Installing signal handlers. Front ends decide when to call `cancel()`.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.
//! - The lifecycle controller observes cancellation only between polls and
//!   during fetch retry delays; an in-flight request is allowed to finish.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// Safe against missed notifications by creating `notified()` future first,
    /// then checking atomic state.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
