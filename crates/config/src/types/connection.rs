//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (console URL, TLS verification, proxy, request timeout).
//! - Define the main `Config` structure combining connection, auth and search settings.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `console_url` is always an absolute http(s) URL without a trailing slash
//!   once it has passed through `ConfigLoader::build`.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SKIP_VERIFY};
use crate::types::auth::{AuthConfig, AuthStrategy};
use crate::types::search::SearchConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
pub(crate) mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for a QRadar console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Console URL (e.g., https://qradar.example.com)
    pub console_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Optional HTTPS proxy (e.g., proxy.example.com:8080)
    #[serde(default)]
    pub proxy: Option<String>,
    /// Per-request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Connection settings for `console_url` with defaults for everything else.
    pub fn new(console_url: String) -> Self {
        Self {
            console_url,
            skip_verify: DEFAULT_SKIP_VERIFY,
            proxy: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Main configuration structure.
///
/// Read-only after construction; safe to share across concurrent searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Create a config for the given console using a SEC token.
    pub fn with_sec_token(console_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::new(console_url),
            auth: AuthConfig {
                strategy: AuthStrategy::SecToken { token },
            },
            search: SearchConfig::default(),
        }
    }

    /// Create a config for the given console using username/password headers.
    pub fn with_basic_auth(console_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::new(console_url),
            auth: AuthConfig {
                strategy: AuthStrategy::Basic { username, password },
            },
            search: SearchConfig::default(),
        }
    }
}
