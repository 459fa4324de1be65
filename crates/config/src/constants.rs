//! Centralized constants for the QRadar search workspace.
//!
//! Default values and validation bounds shared by the config, client and CLI
//! crates.

// =============================================================================
// Connection Defaults
// =============================================================================

/// Default HTTP request timeout in seconds (per request, not per search).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed HTTP request timeout in seconds (1 hour).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Consoles commonly run with self-signed certificates.
pub const DEFAULT_SKIP_VERIFY: bool = true;

// =============================================================================
// Search Lifecycle Defaults
// =============================================================================

/// Default wall-clock budget for a search to complete, in minutes.
pub const DEFAULT_SEARCH_TIMEOUT_MINUTES: u64 = 10;

/// Maximum allowed search timeout in minutes (24 hours).
pub const MAX_SEARCH_TIMEOUT_MINUTES: u64 = 1440;

/// Fixed interval between status polls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Number of retries after the first failed results request.
pub const DEFAULT_FETCH_MAX_RETRIES: usize = 10;

/// Fixed delay between results request attempts, in seconds.
pub const DEFAULT_FETCH_RETRY_DELAY_SECS: u64 = 5;

/// Upper bound for configurable fetch retries.
pub const MAX_FETCH_MAX_RETRIES: usize = 100;

/// Delete the server-side search after its results have been loaded.
pub const DEFAULT_CLEANUP_ON_COMPLETION: bool = true;

// =============================================================================
// Ariel API
// =============================================================================

/// Path of the Ariel searches collection.
pub const ARIEL_SEARCHES_PATH: &str = "/api/ariel/searches";
