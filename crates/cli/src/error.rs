//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError and ConfigError to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use qradar_client::ClientError;
use qradar_config::ConfigError;

/// Structured exit codes for qradar-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - missing console or credentials, invalid values.
    ///
    /// Scripts should fix the environment; no request was sent.
    ConfigError = 2,

    /// Connection error - network, TLS, or request timeout.
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// Search not found on the console.
    NotFound = 4,

    /// The console refused to create the search (bad AQL, permissions).
    SubmissionFailed = 5,

    /// The search ended CANCELED or ERROR on the console.
    JobFailed = 6,

    /// The search did not complete within the timeout budget.
    TimedOut = 7,

    /// Results could not be loaded within the retry budget.
    FetchFailed = 8,

    /// A response did not have the expected shape.
    MalformedResponse = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if rerunning the same command may succeed.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::TimedOut | ExitCode::FetchFailed
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Config(_) | ClientError::InvalidUrl(_) => ExitCode::ConfigError,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() || e.is_request() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,
            ClientError::ApiError { .. } => ExitCode::GeneralError,

            ClientError::SubmissionFailed { .. } => ExitCode::SubmissionFailed,
            ClientError::JobFailed { .. } => ExitCode::JobFailed,
            ClientError::JobTimedOut { .. } => ExitCode::TimedOut,
            ClientError::FetchFailed { .. } => ExitCode::FetchFailed,
            ClientError::MalformedResponse(_) => ExitCode::MalformedResponse,
            ClientError::Cancelled { .. } => ExitCode::Interrupted,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if the chain holds no known error type.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigError;
            }
        }

        ExitCode::GeneralError
    }
}

/// Id of a search the failed command left on the console, if any.
///
/// Timed-out and cancelled searches are deleted by the client; failed
/// searches and those whose results could not be loaded are not.
pub fn abandoned_search_id(err: &anyhow::Error) -> Option<&str> {
    let client_err = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())?;
    match client_err {
        ClientError::JobFailed { .. } | ClientError::FetchFailed { .. } => client_err.search_id(),
        _ => None,
    }
}
