//! Integration tests for configuration loading from the public API.
//!
//! These tests verify that the builder chain used by the CLI produces a
//! complete `Config` and that the crate's public surface is exported.

use qradar_config::{AuthStrategy, Config, ConfigError, ConfigLoader, env_var_or_none};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

#[test]
fn test_config_loader_overrides() {
    let config = ConfigLoader::new()
        .with_console("qradar.corp.local".to_string())
        .with_username("analyst".to_string())
        .with_password("secret".to_string())
        .with_timeout_minutes(5)
        .build()
        .expect("should build with overrides");

    assert_eq!(config.connection.console_url, "https://qradar.corp.local");
    assert_eq!(config.search.timeout(), Duration::from_secs(300));
    match &config.auth.strategy {
        AuthStrategy::Basic { username, password } => {
            assert_eq!(username, "analyst");
            assert_eq!(password.expose_secret(), "secret");
        }
        other => panic!("expected basic auth, got {}", other.kind()),
    }
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("QRADAR_CONSOLE_UNLIKELY_TO_EXIST");
}

#[test]
fn test_missing_auth_message_is_actionable() {
    let err = ConfigLoader::new()
        .with_console("qradar.corp.local".to_string())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingAuth));
    assert!(err.to_string().contains("credentials"));
}

#[test]
fn test_direct_constructors_match_loader_defaults() {
    let direct = Config::with_sec_token(
        "https://qradar.corp.local".to_string(),
        SecretString::new("tok".to_string().into()),
    );
    let loaded = ConfigLoader::new()
        .with_console("https://qradar.corp.local".to_string())
        .with_sec_token("tok".to_string())
        .build()
        .unwrap();

    assert_eq!(direct.connection.console_url, loaded.connection.console_url);
    assert_eq!(direct.connection.skip_verify, loaded.connection.skip_verify);
    assert_eq!(direct.connection.timeout, loaded.connection.timeout);
    assert_eq!(direct.search.timeout_minutes, loaded.search.timeout_minutes);
    assert_eq!(direct.search.poll_interval, loaded.search.poll_interval);
}
