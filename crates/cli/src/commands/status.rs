//! Status command implementation.

use std::path::PathBuf;

use anyhow::Result;
use qradar_config::Config;

use crate::cancellation::{CancellationToken, cancellable};
use crate::commands::build_client;
use crate::formatters::{OutputFormat, SearchStatusOutput, get_formatter, output_result};
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

    let spinner = Spinner::new(!quiet, format!("Checking search {search_id}"));
    let info = cancellable(cancel, &search_id, client.status(&search_id)).await?;
    spinner.finish();

    let output = formatter.format_status(&SearchStatusOutput::new(&search_id, &info))?;
    output_result(&output, format, output_file.as_ref())
}
