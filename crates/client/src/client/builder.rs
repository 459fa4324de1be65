//! Client builder for constructing [`QRadarClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (console URL, credentials)
//! - Normalizing the console URL
//! - Configuring the underlying HTTP client (timeouts, TLS verification, proxy)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`QRadarClient`] methods)
//! - Reading `.env` files or environment variables (see `qradar_config::ConfigLoader`)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` are required; a missing credential is a
//!   configuration error raised before any network call
//! - The base URL always carries a scheme and has no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::sync::Arc;
use std::time::Duration;

use qradar_config::{
    Config, ConfigError,
    constants::{
        DEFAULT_MAX_REDIRECTS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SKIP_VERIFY,
        MAX_SEARCH_TIMEOUT_MINUTES,
    },
};

use crate::auth::AuthStrategy;
use crate::client::QRadarClient;
use crate::error::{ClientError, Result};
use crate::lifecycle::{FetchRetryPolicy, LifecycleSettings};
use crate::observer::{Observers, SearchObserver, TracingObserver};

/// Builder for creating a new [`QRadarClient`].
///
/// All options have defaults except `base_url` and `auth_strategy`.
///
/// # Example
///
/// ```rust,ignore
/// use qradar_client::{QRadarClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = QRadarClient::builder()
///     .base_url("https://qradar.example.com".to_string())
///     .auth_strategy(AuthStrategy::Basic {
///         username: "admin".to_string(),
///         password: SecretString::new("secret".to_string().into()),
///     })
///     .poll_interval(Duration::from_secs(2))
///     .build()?;
/// ```
pub struct QRadarClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    proxy: Option<String>,
    timeout: Duration,
    settings: LifecycleSettings,
    verbose: bool,
    observers: Observers,
}

impl Default for QRadarClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            skip_verify: DEFAULT_SKIP_VERIFY,
            proxy: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            settings: LifecycleSettings::default(),
            verbose: false,
            observers: Observers::new(),
        }
    }
}

impl QRadarClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the console URL.
    ///
    /// A bare host such as `10.1.2.3` is treated as `https://10.1.2.3`.
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// Defaults to `true`, since consoles commonly run with self-signed
    /// certificates.
    ///
    /// # Security Warning
    /// Disabling TLS verification makes the connection vulnerable to
    /// man-in-the-middle attacks.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Route HTTPS traffic through a proxy.
    ///
    /// A proxy without a scheme is treated as `http://<proxy>`.
    pub fn proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set the per-request HTTP timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the wall-clock budget for waiting on a search. Default is 10 minutes.
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Set the search budget in minutes.
    pub fn timeout_minutes(self, minutes: u64) -> Self {
        self.search_timeout(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// Set the pause between status polls. Default is 5 seconds.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.settings.poll_interval = interval;
        self
    }

    /// Set the retry policy for loading results.
    pub fn fetch_retry(mut self, policy: FetchRetryPolicy) -> Self {
        self.settings.fetch_retry = policy;
        self
    }

    /// Delete the search on the console once its results are loaded. Default is `true`.
    pub fn cleanup_on_completion(mut self, cleanup: bool) -> Self {
        self.settings.cleanup_on_completion = cleanup;
        self
    }

    /// Log lifecycle progress at `info` and queries in full.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Register an additional lifecycle observer.
    ///
    /// Observers are notified after the built-in tracing observer, in the
    /// order they were added.
    pub fn observer(mut self, observer: impl SearchObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Create a client builder from configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use qradar_client::QRadarClient;
    /// use qradar_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
    /// let client = QRadarClient::builder().from_config(&config).build()?;
    /// ```
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.console_url.clone());
        self.auth_strategy = Some(AuthStrategy::from(&config.auth.strategy));
        self.skip_verify = config.connection.skip_verify;
        self.proxy = config.connection.proxy.clone();
        self.timeout = config.connection.timeout;
        self.settings = LifecycleSettings::from(&config.search);
        self.verbose = config.search.verbose;
        self
    }

    /// Normalize a console URL: add `https://` to a bare host and remove
    /// trailing slashes.
    ///
    /// # Examples
    ///
    /// - `"10.1.2.3"` -> `"https://10.1.2.3"`
    /// - `"https://qradar.example.com/"` -> `"https://qradar.example.com"`
    /// - `"http://localhost:8080//"` -> `"http://localhost:8080"`
    fn normalize_base_url(url: String) -> String {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    fn proxy_url(proxy: &str) -> String {
        if proxy.contains("://") {
            proxy.to_string()
        } else {
            format!("http://{proxy}")
        }
    }

    /// Build the [`QRadarClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or the
    /// proxy URL is invalid.
    /// Returns [`ClientError::Config`] if no credentials were provided or the
    /// search budget is zero or longer than `MAX_SEARCH_TIMEOUT_MINUTES`.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<QRadarClient> {
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let auth = self.auth_strategy.ok_or(ConfigError::MissingAuth)?;

        if self.settings.timeout.is_zero() {
            return Err(ConfigError::InvalidSearchTimeout {
                message: "search timeout must be greater than zero".to_string(),
            }
            .into());
        }
        if self.settings.timeout > Duration::from_secs(MAX_SEARCH_TIMEOUT_MINUTES * 60) {
            return Err(ConfigError::InvalidSearchTimeout {
                message: format!(
                    "search timeout must not exceed {MAX_SEARCH_TIMEOUT_MINUTES} minutes"
                ),
            }
            .into());
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        if let Some(proxy) = self.proxy.as_deref() {
            let url = Self::proxy_url(proxy);
            let proxy = reqwest::Proxy::https(&url)
                .map_err(|e| ClientError::InvalidUrl(format!("invalid proxy '{url}': {e}")))?;
            http_builder = http_builder.proxy(proxy);
        }

        let http = http_builder.build()?;

        let mut observers = Observers::new();
        observers.push(Arc::new(TracingObserver::new(self.verbose)));
        for observer in self.observers.iter() {
            observers.push(observer.clone());
        }

        tracing::debug!(
            base_url = %base_url,
            auth = auth.kind(),
            timeout = ?self.settings.timeout,
            poll_interval = ?self.settings.poll_interval,
            "Built QRadar client"
        );

        Ok(QRadarClient {
            http,
            base_url,
            auth,
            settings: self.settings,
            observers,
        })
    }
}
