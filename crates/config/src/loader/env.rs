//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `QRADAR_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(console) = env_var_or_none("QRADAR_CONSOLE") {
        loader.set_console(Some(console));
    }
    if let Some(username) = env_var_or_none("QRADAR_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("QRADAR_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none("QRADAR_SEC_TOKEN") {
        loader.set_sec_token(Some(SecretString::new(token.into())));
    }
    if let Some(proxy) = env_var_or_none("QRADAR_PROXY") {
        loader.set_proxy(Some(proxy));
    }
    if let Some(skip) = parse_env::<bool>("QRADAR_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("QRADAR_REQUEST_TIMEOUT", "must be a number")? {
        loader.set_request_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(minutes) =
        parse_env::<u64>("QRADAR_TIMEOUT_MINUTES", "must be a positive number of minutes")?
    {
        loader.set_timeout_minutes(Some(minutes));
    }
    if let Some(verbose) = parse_env::<bool>("QRADAR_VERBOSE", "must be true or false")? {
        loader.set_verbose(Some(verbose));
    }
    if let Some(cleanup) = parse_env::<bool>("QRADAR_CLEANUP", "must be true or false")? {
        loader.set_cleanup_on_completion(Some(cleanup));
    }

    Ok(())
}
