//! Error types for the QRadar client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while running an Ariel search.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] qradar_config::ConfigError),

    /// Transport-level HTTP error (connection, TLS, request timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected non-success response outside of submission and fetch.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The console refused to create the search.
    #[error("Search submission failed ({status}): {message}")]
    SubmissionFailed { status: u16, message: String },

    /// The search reached a failed terminal state on the console.
    #[error("Search {search_id} ended with status {status}")]
    JobFailed { search_id: String, status: String },

    /// The search did not complete within the configured budget.
    #[error("Search {search_id} did not complete within {timeout:?}")]
    JobTimedOut {
        search_id: String,
        timeout: Duration,
    },

    /// Results could not be retrieved within the retry budget.
    #[error("Failed to fetch results for search {search_id} after {attempts} attempts")]
    FetchFailed { search_id: String, attempts: usize },

    /// A response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller cancelled the search. `search_id` is unset when
    /// cancellation happened before submission.
    #[error("Search cancelled")]
    Cancelled { search_id: Option<String> },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Check if this error is transient and worth retrying at the request level.
    ///
    /// Only transport failures qualify. Lifecycle outcomes (failed, timed out,
    /// cancelled) are final for the search that produced them.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502, 503, 504: transient gateway and availability errors
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates rejected credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError { status: 401 | 403, .. }
                | Self::SubmissionFailed {
                    status: 401 | 403,
                    ..
                }
        )
    }

    /// Search id carried by lifecycle errors, if any.
    pub fn search_id(&self) -> Option<&str> {
        match self {
            Self::JobFailed { search_id, .. }
            | Self::JobTimedOut { search_id, .. }
            | Self::FetchFailed { search_id, .. } => Some(search_id),
            Self::Cancelled { search_id } => search_id.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors_not_retryable() {
        let err = ClientError::JobTimedOut {
            search_id: "abc".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert!(!err.is_retryable());

        let err = ClientError::FetchFailed {
            search_id: "abc".to_string(),
            attempts: 11,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_api_error_retryable_by_status() {
        let err = ClientError::ApiError {
            status: 503,
            url: "https://qradar/api/ariel/searches/abc".to_string(),
            message: "unavailable".to_string(),
        };
        assert!(err.is_retryable());

        let err = ClientError::ApiError {
            status: 404,
            url: "https://qradar/api/ariel/searches/abc".to_string(),
            message: "not found".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_is_auth_error() {
        let err = ClientError::SubmissionFailed {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_auth_error());

        let err = ClientError::SubmissionFailed {
            status: 422,
            message: "bad AQL".to_string(),
        };
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(ClientError::is_retryable_status(429));
        assert!(ClientError::is_retryable_status(502));
        assert!(!ClientError::is_retryable_status(400));
        assert!(!ClientError::is_retryable_status(500));
        assert!(!ClientError::is_retryable_status(201));
    }

    #[test]
    fn test_search_id_accessor() {
        let err = ClientError::JobFailed {
            search_id: "s-1".to_string(),
            status: "ERROR".to_string(),
        };
        assert_eq!(err.search_id(), Some("s-1"));
        assert_eq!(ClientError::MalformedResponse("x".into()).search_id(), None);
    }

    #[test]
    fn test_display_messages() {
        let err = ClientError::JobTimedOut {
            search_id: "abc".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert_eq!(err.to_string(), "Search abc did not complete within 60s");

        let err = ClientError::FetchFailed {
            search_id: "abc".to_string(),
            attempts: 11,
        };
        assert!(err.to_string().contains("11 attempts"));
    }
}
