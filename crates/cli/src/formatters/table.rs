//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format search results as tab-separated tables.
//! - Format status and submission receipts as `Field: value` lines.
//!
//! Does NOT handle:
//! - Column width alignment beyond tabs.

use anyhow::Result;
use qradar_client::table::cell_text;
use qradar_client::{ResultSet, SearchJob};

use crate::formatters::common::format_missing_display;
use crate::formatters::{Formatter, SearchStatusOutput};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_results(&self, results: &ResultSet) -> Result<String> {
        if results.is_empty() {
            return Ok("No results found.\n".to_string());
        }

        let table = results.to_table();
        let mut output = String::new();

        output.push_str(&table.columns.join("\t"));
        output.push('\n');

        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            output.push_str(&cells.join("\t"));
            output.push('\n');
        }

        Ok(output)
    }

    fn format_status(&self, status: &SearchStatusOutput) -> Result<String> {
        let progress = status.progress.map(|p| format!("{p}%"));
        Ok(format!(
            "Search ID: {}\nStatus: {}\nProgress: {}\nRecords: {}\n",
            status.search_id,
            status.status,
            format_missing_display(progress),
            format_missing_display(status.record_count),
        ))
    }

    fn format_submitted(&self, job: &SearchJob) -> Result<String> {
        Ok(format!(
            "Search ID: {}\nStatus: {}\nSubmitted: {}\n",
            job.search_id,
            job.status,
            job.submitted_at.to_rfc3339()
        ))
    }
}
