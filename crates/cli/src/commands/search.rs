//! Search command implementation.
//!
//! Runs the full lifecycle (submit, poll, fetch, cleanup) through the client
//! library, or only submits when `--no-wait` is given.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use qradar_client::{AqlQuery, Priority, SearchObserver};
use qradar_config::Config;
use tracing::warn;

use crate::args::SearchArgs;
use crate::cancellation::CancellationToken;
use crate::commands::{build_client, parse_time};
use crate::formatters::{OutputFormat, get_formatter, output_result};
use crate::progress::SearchProgress;

/// Compose the query and its modifiers from command-line arguments.
pub(crate) fn build_query(args: &SearchArgs) -> Result<AqlQuery> {
    let mut query = AqlQuery::new(args.query.clone());

    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    if let Some(start) = args.start.as_deref() {
        query = query.start(parse_time(start)?);
    }
    if let Some(end) = args.end.as_deref() {
        query = query.end(parse_time(end)?);
    }
    if let Some(priority) = args.priority.as_deref() {
        if Priority::parse_lenient(priority).is_none() {
            warn!(
                "Ignoring unknown priority '{}' (expected LOW, NORMAL or HIGH)",
                priority
            );
        }
        query = query.priority_lenient(priority);
    }

    Ok(query)
}

pub async fn run(
    mut config: Config,
    args: SearchArgs,
    output_format: &str,
    quiet: bool,
    output_file: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);
    let query = build_query(&args)?;

    if args.no_cleanup {
        config.search.cleanup_on_completion = false;
    }

    if args.no_wait {
        let client = build_client(&config, None)?;
        let job = client.submit(&query).await?;
        let output = formatter.format_submitted(&job)?;
        return output_result(&output, format, output_file.as_ref());
    }

    let progress = Arc::new(SearchProgress::new(!quiet, "Searching"));
    let observer: Arc<dyn SearchObserver> = progress.clone();
    let client = build_client(&config, Some(observer))?;

    let results = match client.search_with_cancel(&query, cancel).await {
        Ok(results) => results,
        Err(e) => {
            progress.clear();
            return Err(e.into());
        }
    };

    let output = formatter.format_results(&results)?;
    output_result(&output, format, output_file.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn args(query: &str) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            limit: None,
            start: None,
            end: None,
            priority: None,
            no_cleanup: false,
            no_wait: false,
        }
    }

    #[test]
    fn test_build_query_all_modifiers() {
        let mut a = args("SELECT * FROM events");
        a.limit = Some(10);
        a.start = Some("1000".to_string());
        a.end = Some("2000".to_string());
        a.priority = Some("LOW".to_string());

        let query = build_query(&a).unwrap();
        let now = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(
            query.compose_at(now),
            "SELECT * FROM events\n LIMIT 10\n START 1000 STOP 2000\n PARAMETERS PRIORITY='LOW'"
        );
    }

    #[test]
    fn test_build_query_unknown_priority_dropped() {
        let mut a = args("SELECT * FROM events");
        a.priority = Some("URGENT".to_string());

        let query = build_query(&a).unwrap();
        assert_eq!(query.priority, None);
    }

    #[test]
    fn test_build_query_invalid_time_is_error() {
        let mut a = args("SELECT * FROM events");
        a.start = Some("last tuesday".to_string());
        assert!(build_query(&a).is_err());
    }
}
