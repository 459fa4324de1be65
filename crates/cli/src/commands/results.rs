//! Results command implementation.
//!
//! Loads the results of a search submitted earlier (for example with
//! `search --no-wait`), retrying per the fetch policy. The search is left on
//! the console; use `delete` to remove it.

use std::path::PathBuf;

use anyhow::Result;
use qradar_client::materialize;
use qradar_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::build_client;
use crate::formatters::{OutputFormat, get_formatter, output_result};
use crate::progress::Spinner;

pub async fn run(
    config: Config,
    search_id: String,
    output_format: &str,
    quiet: bool,
    output_file: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);
    let client = build_client(&config, None)?;

    let spinner = Spinner::new(!quiet, format!("Loading results for {search_id}"));
    let envelope = client
        .controller()
        .with_cancellation(cancel)
        .fetch(&search_id)
        .await?;
    let results = materialize(envelope)?;
    spinner.finish();

    let output = formatter.format_results(&results)?;
    output_result(&output, format, output_file.as_ref())
}
