//! NDJSON formatter implementation.
//!
//! Responsibilities:
//! - Format resources as NDJSON (Newline Delimited JSON).
//!
//! Invariants:
//! - Each line is a valid JSON object
//! - Suitable for streaming and log processing pipelines

use anyhow::Result;
use qradar_client::{ResultSet, SearchJob};
use serde::Serialize;

use crate::formatters::{Formatter, SearchStatusOutput};

/// NDJSON formatter.
pub struct NdjsonFormatter;

/// Helper function to format a slice as NDJSON.
fn to_ndjson<T: Serialize>(items: &[T]) -> Result<String> {
    let mut output = String::new();
    for item in items {
        let line = serde_json::to_string(item)?;
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

/// Helper function to format a single item as NDJSON.
fn to_ndjson_single<T: Serialize>(item: &T) -> Result<String> {
    let line = serde_json::to_string(item)?;
    Ok(line + "\n")
}

impl Formatter for NdjsonFormatter {
    fn format_results(&self, results: &ResultSet) -> Result<String> {
        to_ndjson(&results.rows)
    }

    fn format_status(&self, status: &SearchStatusOutput) -> Result<String> {
        to_ndjson_single(status)
    }

    fn format_submitted(&self, job: &SearchJob) -> Result<String> {
        to_ndjson_single(job)
    }
}
