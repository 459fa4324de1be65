//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Validate and normalize the console address and numeric bounds.
//! - Resolve exactly one authentication strategy.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Later writes win: call `from_env()` first, then builder overrides.
//! - A complete username/password pair takes precedence over a SEC token.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;
use tracing::debug;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_CLEANUP_ON_COMPLETION, DEFAULT_FETCH_MAX_RETRIES, DEFAULT_FETCH_RETRY_DELAY_SECS,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_TIMEOUT_MINUTES,
    DEFAULT_SKIP_VERIFY, MAX_FETCH_MAX_RETRIES, MAX_REQUEST_TIMEOUT_SECS,
    MAX_SEARCH_TIMEOUT_MINUTES,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SearchConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    console: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    sec_token: Option<SecretString>,
    proxy: Option<String>,
    skip_verify: Option<bool>,
    request_timeout: Option<Duration>,
    timeout_minutes: Option<u64>,
    poll_interval: Option<Duration>,
    fetch_max_retries: Option<usize>,
    fetch_retry_delay: Option<Duration>,
    verbose: Option<bool>,
    cleanup_on_completion: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// Missing `.env` files are silently ignored. If `DOTENV_DISABLED` is set
    /// to "true" or "1", nothing is loaded.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from `QRADAR_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the console address (bare host or URL).
    pub fn with_console(mut self, console: String) -> Self {
        self.console = Some(console);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the SEC token.
    pub fn with_sec_token(mut self, token: String) -> Self {
        self.sec_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the HTTPS proxy.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the search completion budget in minutes.
    pub fn with_timeout_minutes(mut self, minutes: u64) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    /// Set the interval between status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the fetch retry budget and delay.
    pub fn with_fetch_retry(mut self, max_retries: usize, delay: Duration) -> Self {
        self.fetch_max_retries = Some(max_retries);
        self.fetch_retry_delay = Some(delay);
        self
    }

    /// Set verbose lifecycle logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set whether to delete the server-side search after loading results.
    pub fn with_cleanup_on_completion(mut self, cleanup: bool) -> Self {
        self.cleanup_on_completion = Some(cleanup);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let console_url = self
            .console
            .as_deref()
            .map(validate_and_normalize_console)
            .transpose()?
            .ok_or(ConfigError::MissingConsole)?;

        let strategy = match (self.username, self.password, self.sec_token) {
            (Some(username), Some(password), token) => {
                if token.is_some() {
                    debug!("Both basic credentials and a SEC token supplied, using basic auth");
                }
                AuthStrategy::Basic { username, password }
            }
            (_, _, Some(token)) => AuthStrategy::SecToken { token },
            _ => return Err(ConfigError::MissingAuth),
        };

        let connection = ConnectionConfig {
            console_url,
            skip_verify: self.skip_verify.unwrap_or(DEFAULT_SKIP_VERIFY),
            proxy: self.proxy.filter(|p| !p.trim().is_empty()),
            timeout: self
                .request_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        };

        let search = SearchConfig {
            timeout_minutes: self
                .timeout_minutes
                .unwrap_or(DEFAULT_SEARCH_TIMEOUT_MINUTES),
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
            fetch_max_retries: self.fetch_max_retries.unwrap_or(DEFAULT_FETCH_MAX_RETRIES),
            fetch_retry_delay: self
                .fetch_retry_delay
                .unwrap_or(Duration::from_secs(DEFAULT_FETCH_RETRY_DELAY_SECS)),
            verbose: self.verbose.unwrap_or(false),
            cleanup_on_completion: self
                .cleanup_on_completion
                .unwrap_or(DEFAULT_CLEANUP_ON_COMPLETION),
        };

        Self::validate(&connection, &search)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
            search,
        })
    }

    /// Validates numeric bounds.
    ///
    /// Checks:
    /// - request timeout is in 1..=MAX_REQUEST_TIMEOUT_SECS seconds
    /// - search timeout is in 1..=MAX_SEARCH_TIMEOUT_MINUTES minutes
    /// - fetch retries do not exceed MAX_FETCH_MAX_RETRIES
    fn validate(connection: &ConnectionConfig, search: &SearchConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_REQUEST_TIMEOUT_SECS
                ),
            });
        }

        if search.timeout_minutes == 0 {
            return Err(ConfigError::InvalidSearchTimeout {
                message: "timeout_minutes must be a positive integer".to_string(),
            });
        }
        if search.timeout_minutes > MAX_SEARCH_TIMEOUT_MINUTES {
            return Err(ConfigError::InvalidSearchTimeout {
                message: format!(
                    "timeout_minutes exceeds maximum allowed value of {} minutes",
                    MAX_SEARCH_TIMEOUT_MINUTES
                ),
            });
        }

        if search.fetch_max_retries > MAX_FETCH_MAX_RETRIES {
            return Err(ConfigError::InvalidFetchRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_FETCH_MAX_RETRIES, search.fetch_max_retries
                ),
            });
        }

        Ok(())
    }

    pub(crate) fn set_console(&mut self, console: Option<String>) {
        self.console = console;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_sec_token(&mut self, token: Option<SecretString>) {
        self.sec_token = token;
    }

    pub(crate) fn set_proxy(&mut self, proxy: Option<String>) {
        self.proxy = proxy;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_request_timeout(&mut self, timeout: Option<Duration>) {
        self.request_timeout = timeout;
    }

    pub(crate) fn set_timeout_minutes(&mut self, minutes: Option<u64>) {
        self.timeout_minutes = minutes;
    }

    pub(crate) fn set_verbose(&mut self, verbose: Option<bool>) {
        self.verbose = verbose;
    }

    pub(crate) fn set_cleanup_on_completion(&mut self, cleanup: Option<bool>) {
        self.cleanup_on_completion = cleanup;
    }
}

/// Validates and normalizes a console address.
///
/// Validation rules:
/// - Trim surrounding whitespace; blank means missing
/// - A bare host (`1.2.3.4`, `qradar.example.com:8443`) gets an `https://` scheme
/// - Scheme must be http or https and a host must be present
/// - Normalize by stripping trailing slashes
pub(crate) fn validate_and_normalize_console(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingConsole);
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidValue {
        var: "console".into(),
        message: format!("must be a host name or an absolute http(s) URL: {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "console".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "console".into(),
            message: "host is required (e.g. qradar.example.com)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
