//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: Table, JSON, CSV, and NDJSON.
//! - Render search results, search status, and submitted-search receipts.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `output_result`).
//!
//! Invariants:
//! - Result columns appear in first-seen order across all rows.
//! - Tables use tab-separation for consistent alignment in standard terminals.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Rationale |
//! |--------|---------------------|-----------|
//! | JSON | `[]` | Machine parseable - valid JSON |
//! | NDJSON | no lines | Nothing to stream |
//! | CSV | empty output | No columns to name |
//! | Table | `No results found.` | Interactive format needs human feedback |
//!
//! ## Missing/Null Value Handling
//!
//! | Format | Missing Value Representation |
//! |--------|------------------------------|
//! | JSON / NDJSON | `null` |
//! | CSV / Table (results) | empty cell |
//! | Table (status) | `N/A` |

use anyhow::Result;
use qradar_client::{ResultSet, SearchInfo, SearchJob, SearchStatus};
use serde::Serialize;

mod common;
mod csv;
mod json;
mod ndjson;
mod table;


pub use common::output_result;
pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use ndjson::NdjsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Ndjson,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "ndjson" | "jsonl" => Ok(OutputFormat::Ndjson),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: table, json, csv, ndjson",
                s
            ),
        }
    }
}

/// Status of a search as printed by `qradar-cli status`.
///
/// The console may omit `search_id` from a status body; the id that was
/// asked for is filled in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchStatusOutput {
    pub search_id: String,
    pub status: SearchStatus,
    pub progress: Option<f64>,
    pub record_count: Option<u64>,
}

impl SearchStatusOutput {
    pub fn new(search_id: &str, info: &SearchInfo) -> Self {
        Self {
            search_id: info
                .search_id
                .clone()
                .unwrap_or_else(|| search_id.to_string()),
            status: info.status.clone(),
            progress: info.progress,
            record_count: info.record_count,
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format the rows of a completed search.
    fn format_results(&self, results: &ResultSet) -> Result<String>;

    /// Format a search's current status.
    fn format_status(&self, status: &SearchStatusOutput) -> Result<String>;

    /// Format the receipt of a submitted search.
    fn format_submitted(&self, job: &SearchJob) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Ndjson => Box::new(NdjsonFormatter),
    }
}
