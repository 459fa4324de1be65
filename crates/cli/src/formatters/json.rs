//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format results, status and receipts as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Line-delimited output (see `NdjsonFormatter`).

use anyhow::Result;
use qradar_client::{ResultSet, SearchJob};

use crate::formatters::{Formatter, SearchStatusOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_results(&self, results: &ResultSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(&results.rows)? + "\n")
    }

    fn format_status(&self, status: &SearchStatusOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(status)? + "\n")
    }

    fn format_submitted(&self, job: &SearchJob) -> Result<String> {
        Ok(serde_json::to_string_pretty(job)? + "\n")
    }
}
