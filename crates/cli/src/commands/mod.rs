//! CLI command implementations.

pub mod delete;
pub mod results;
pub mod search;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use qradar_client::{QRadarClient, SearchObserver};
use qradar_config::Config;

/// Build a client from the resolved configuration.
///
/// `observer` receives lifecycle events after the built-in tracing observer.
pub(crate) fn build_client(
    config: &Config,
    observer: Option<Arc<dyn SearchObserver>>,
) -> Result<QRadarClient> {
    let mut builder = QRadarClient::builder().from_config(config);
    if let Some(observer) = observer {
        builder = builder.observer(observer);
    }
    let client = builder.build()?;
    tracing::info!("Connecting to {}", client.base_url());
    Ok(client)
}

/// Parse a time-window bound: RFC 3339 or integer epoch milliseconds.
pub(crate) fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(ms) = trimmed.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(ms)
            .single()
            .with_context(|| format!("epoch milliseconds out of range: {trimmed}"));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| {
            format!("invalid time '{trimmed}': expected RFC 3339 (2024-05-01T00:00:00Z) or epoch milliseconds")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_rfc3339() {
        let dt = parse_time("2024-05-01T00:00:00Z").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_714_521_600_000);

        let offset = parse_time("2024-05-01T02:00:00+02:00").unwrap();
        assert_eq!(offset, dt);
    }

    #[test]
    fn test_parse_time_epoch_millis() {
        let dt = parse_time("1714521600000").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_714_521_600_000);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time("yesterday").unwrap_err();
        assert!(err.to_string().contains("invalid time"));
    }
}
