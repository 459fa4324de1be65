//! Delete command implementation.

use anyhow::Result;
use qradar_config::Config;

use crate::cancellation::{CancellationToken, cancellable};
use crate::commands::build_client;
use crate::progress::Spinner;

pub async fn run(
    config: Config,
    search_id: String,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config, None)?;

    let spinner = Spinner::new(!quiet, format!("Deleting search {search_id}"));
    cancellable(cancel, &search_id, client.delete(&search_id)).await?;
    spinner.finish();

    println!("Search {search_id} deleted.");
    Ok(())
}
