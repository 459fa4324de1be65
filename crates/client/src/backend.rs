//! The request surface the lifecycle controller drives.
//!
//! [`crate::QRadarClient`] implements this over HTTP. Tests substitute a
//! scripted implementation so lifecycle behavior can be checked without a
//! console or real time passing.

use std::future::Future;

use serde_json::Value;

use crate::error::Result;
use crate::models::{SearchInfo, SearchJob};

/// One request per method; no retries, polling or cleanup policy.
pub trait SearchBackend: Send + Sync {
    /// Create a search. Anything other than a successful creation is
    /// `ClientError::SubmissionFailed` or a transport error.
    fn create_search(&self, query: &str) -> impl Future<Output = Result<SearchJob>> + Send;

    /// Read the current status of a search.
    fn search_status(&self, search_id: &str) -> impl Future<Output = Result<SearchInfo>> + Send;

    /// Read the raw results envelope. Non-200 responses are errors.
    fn search_results(&self, search_id: &str) -> impl Future<Output = Result<Value>> + Send;

    /// Delete a search.
    fn delete_search(&self, search_id: &str) -> impl Future<Output = Result<()>> + Send;
}
