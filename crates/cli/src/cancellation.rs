//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Re-export the client's cancellation token so command handlers and the
//!   search lifecycle share one token.
//! - Recognize cancellation errors in an `anyhow` chain.
//! - Centralize the cancellation message printed on Ctrl+C.
//!
//! Does NOT handle:
//! - This module does not install signal handlers by itself (see `main`).
//! - Deleting the interrupted search; the lifecycle controller does that.

use qradar_client::ClientError;

pub use qradar_client::CancellationToken;

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ClientError>(),
            Some(ClientError::Cancelled { .. })
        )
    })
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

/// Race `fut` against `token`, turning cancellation into `ClientError::Cancelled`.
///
/// For single requests that have no pause the lifecycle could interrupt.
pub async fn cancellable<T>(
    token: &CancellationToken,
    search_id: &str,
    fut: impl std::future::Future<Output = qradar_client::Result<T>>,
) -> qradar_client::Result<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ClientError::Cancelled {
            search_id: Some(search_id.to_string()),
        }),
        result = fut => result,
    }
}
