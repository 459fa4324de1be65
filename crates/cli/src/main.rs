//! QRadar CLI - Command-line interface for QRadar Ariel searches.
//!
//! Responsibilities:
//! - Parse command-line arguments and merge them over `.env` and `QRADAR_*`
//!   environment settings.
//! - Execute searches via the shared client library.
//! - Format and display results in various output formats (table, JSON, etc.).
//!
//! Does NOT handle:
//! - Search lifecycle logic (see `crates/client`).
//! - Long-term persistence of search results.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing.
//! - Command-line flags take precedence over environment variables.
//! - Logs and progress go to stderr; stdout carries only command output.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod progress;

use std::time::Duration;

use anyhow::Result;
use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt, abandoned_search_id};
use qradar_config::{Config, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Resolve configuration: environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref console) = cli.console {
        loader = loader.with_console(console.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.sec_token {
        loader = loader.with_sec_token(token.clone());
    }
    if let Some(ref proxy) = cli.proxy {
        loader = loader.with_proxy(proxy.clone());
    }
    if cli.verify_tls {
        loader = loader.with_skip_verify(false);
    }
    if let Some(secs) = cli.request_timeout {
        loader = loader.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(minutes) = cli.timeout_minutes {
        loader = loader.with_timeout_minutes(minutes);
    }
    if let Some(secs) = cli.poll_interval {
        loader = loader.with_poll_interval(Duration::from_secs(secs));
    }
    if cli.verbose {
        loader = loader.with_verbose(true);
    }

    Ok(loader.build()?)
}

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so it is in place for the loader
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose raises the default to info.
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(e.exit_code().as_i32());
        }
    };

    // Create cancellation token and set up signal handling
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            if let Some(search_id) = abandoned_search_id(&e) {
                eprintln!("Search {search_id} is still on the console; remove it with `qradar-cli delete {search_id}`");
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
