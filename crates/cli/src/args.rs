//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Collect connection and lifecycle overrides that take precedence over the
//!   environment.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `QRADAR_*` variables; `qradar_config::ConfigLoader` does.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qradar-cli")]
#[command(about = "QRadar CLI - Run Ariel searches from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Connection settings are also read from QRADAR_* environment variables and .env.\n\nExamples:\n  qradar-cli search 'SELECT sourceip, username FROM events' --limit 10\n  qradar-cli -o csv search 'SELECT * FROM flows' --start 2024-05-01T00:00:00Z\n  qradar-cli search 'SELECT * FROM events' --no-wait\n  qradar-cli status 7c1f0c4e-0d2b-4b7a-9f15-2d4c3a1f3d10\n  qradar-cli -o json results 7c1f0c4e-0d2b-4b7a-9f15-2d4c3a1f3d10\n"
)]
pub struct Cli {
    /// QRadar console address (e.g., qradar.example.com or https://10.1.2.3)
    #[arg(short, long, global = true)]
    pub console: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Authorized service token (preferred over username/password)
    #[arg(short = 't', long, global = true)]
    pub sec_token: Option<String>,

    /// HTTPS proxy (host:port or URL)
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Verify the console's TLS certificate (skipped by default)
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Wall-clock budget for a search to complete, in minutes
    #[arg(long, global = true, value_name = "MINUTES")]
    pub timeout_minutes: Option<u64>,

    /// Seconds between status polls
    #[arg(long, global = true, value_name = "SECONDS")]
    pub poll_interval: Option<u64>,

    /// Log lifecycle progress and full query text
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (table, json, csv, ndjson)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Suppress all progress output.
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an AQL search and print its results
    Search(SearchArgs),

    /// Show the status of an existing search
    Status {
        /// Search id returned at submission
        search_id: String,
    },

    /// Print the results of a completed search
    Results {
        /// Search id returned at submission
        search_id: String,
    },

    /// Delete a search and its stored results
    Delete {
        /// Search id returned at submission
        search_id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// The AQL query to run (e.g., 'SELECT * FROM events')
    pub query: String,

    /// Append a LIMIT clause (at least 1)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Start of the time window (RFC 3339 or epoch milliseconds)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End of the time window (RFC 3339 or epoch milliseconds, defaults to now)
    #[arg(short, long, requires = "start")]
    pub end: Option<String>,

    /// Search priority (LOW, NORMAL, HIGH); other values are ignored
    #[arg(long)]
    pub priority: Option<String>,

    /// Keep the search on the console after loading its results
    #[arg(long)]
    pub no_cleanup: bool,

    /// Submit the search and print its id without waiting
    #[arg(long)]
    pub no_wait: bool,
}
