//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Pass the resolved configuration and cancellation token through.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use qradar_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::Search(args) => {
            commands::search::run(
                config,
                args,
                &cli.output,
                cli.quiet,
                cli.output_file.clone(),
                cancel_token,
            )
            .await?;
        }
        Commands::Status { search_id } => {
            commands::status::run(
                config,
                search_id,
                &cli.output,
                cli.quiet,
                cli.output_file.clone(),
                cancel_token,
            )
            .await?;
        }
        Commands::Results { search_id } => {
            commands::results::run(
                config,
                search_id,
                &cli.output,
                cli.quiet,
                cli.output_file.clone(),
                cancel_token,
            )
            .await?;
        }
        Commands::Delete { search_id } => {
            commands::delete::run(config, search_id, cli.quiet, cancel_token).await?;
        }
    }

    Ok(())
}
