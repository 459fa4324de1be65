//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format search results as RFC 4180 compliant CSV with a header row.
//!
//! Does NOT handle:
//! - Flattening nested values; arrays and objects are written as compact JSON.

use anyhow::Result;
use qradar_client::{ResultSet, SearchJob};

use crate::formatters::{Formatter, SearchStatusOutput};

/// CSV formatter.
pub struct CsvFormatter;

fn write_rows<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

impl Formatter for CsvFormatter {
    fn format_results(&self, results: &ResultSet) -> Result<String> {
        Ok(results.to_table().to_csv_string()?)
    }

    fn format_status(&self, status: &SearchStatusOutput) -> Result<String> {
        write_rows(
            ["search_id", "status", "progress", "record_count"],
            &[[
                status.search_id.clone(),
                status.status.to_string(),
                status.progress.map(|p| p.to_string()).unwrap_or_default(),
                status
                    .record_count
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            ]],
        )
    }

    fn format_submitted(&self, job: &SearchJob) -> Result<String> {
        write_rows(
            ["search_id", "status", "submitted_at"],
            &[[
                job.search_id.clone(),
                job.status.to_string(),
                job.submitted_at.to_rfc3339(),
            ]],
        )
    }
}
