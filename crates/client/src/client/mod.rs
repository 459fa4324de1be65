//! Main QRadar client.
//!
//! This module provides the primary [`QRadarClient`] for running Ariel
//! searches against a QRadar console.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `search`: Search methods (one-shot and phase by phase)
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Polling, retry and cleanup policy (delegated to [`crate::lifecycle`])
//!
//! # Invariants
//! - The client holds no per-search state; concurrent searches share only the
//!   immutable settings and the connection pool.

pub mod builder;
mod search;

use serde_json::Value;

use crate::auth::AuthStrategy;
use crate::backend::SearchBackend;
use crate::endpoints;
use crate::error::Result;
use crate::lifecycle::LifecycleSettings;
use crate::models::{SearchInfo, SearchJob};
use crate::observer::Observers;

/// QRadar Ariel API client.
///
/// # Creating a Client
///
/// Use [`QRadarClient::builder()`] to create a new client:
///
/// ```rust,ignore
/// use qradar_client::{QRadarClient, AuthStrategy, AqlQuery};
/// use secrecy::SecretString;
///
/// let client = QRadarClient::builder()
///     .base_url("qradar.example.com".to_string())
///     .auth_strategy(AuthStrategy::SecToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()?;
///
/// let rows = client.search(&AqlQuery::new("SELECT * FROM events").limit(10)).await?;
/// ```
#[derive(Debug)]
pub struct QRadarClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) settings: LifecycleSettings,
    pub(crate) observers: Observers,
}

impl QRadarClient {
    /// Create a new client builder.
    pub fn builder() -> builder::QRadarClientBuilder {
        builder::QRadarClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lifecycle settings applied to every search.
    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Check if the client authenticates with a SEC token.
    pub fn is_token_auth(&self) -> bool {
        matches!(self.auth, AuthStrategy::SecToken { .. })
    }
}

impl SearchBackend for QRadarClient {
    async fn create_search(&self, query: &str) -> Result<SearchJob> {
        endpoints::create_search(&self.http, &self.base_url, &self.auth, query).await
    }

    async fn search_status(&self, search_id: &str) -> Result<SearchInfo> {
        endpoints::get_search(&self.http, &self.base_url, &self.auth, search_id).await
    }

    async fn search_results(&self, search_id: &str) -> Result<Value> {
        endpoints::get_results(&self.http, &self.base_url, &self.auth, search_id).await
    }

    async fn delete_search(&self, search_id: &str) -> Result<()> {
        endpoints::delete_search(&self.http, &self.base_url, &self.auth, search_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use secrecy::SecretString;

    fn token() -> AuthStrategy {
        AuthStrategy::SecToken {
            token: SecretString::new("test-token".to_string().into()),
        }
    }

    #[test]
    fn test_client_builder_with_token() {
        let client = QRadarClient::builder()
            .base_url("https://qradar.example.com".to_string())
            .auth_strategy(token())
            .build();

        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.base_url(), "https://qradar.example.com");
        assert!(client.is_token_auth());
    }

    #[test]
    fn test_client_builder_missing_base_url() {
        let client = QRadarClient::builder().auth_strategy(token()).build();

        assert!(matches!(client.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_builder_missing_auth_is_config_error() {
        let client = QRadarClient::builder()
            .base_url("qradar.example.com".to_string())
            .build();

        assert!(matches!(
            client.unwrap_err(),
            ClientError::Config(qradar_config::ConfigError::MissingAuth)
        ));
    }

    #[test]
    fn test_client_builder_bare_host_gets_https() {
        let client = QRadarClient::builder()
            .base_url("10.1.2.3/".to_string())
            .auth_strategy(token())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://10.1.2.3");
    }

    #[test]
    fn test_skip_verify_with_http_url() {
        // Should succeed but log a warning about ineffective skip_verify
        let client = QRadarClient::builder()
            .base_url("http://localhost:8080".to_string())
            .auth_strategy(token())
            .skip_verify(true)
            .build();

        assert!(client.is_ok());
    }
}
