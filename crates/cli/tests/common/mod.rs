//! Shared test utilities for qradar-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Ensure consistent test environment setup (token, fast lifecycle timings).
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `QRADAR_SEC_TOKEN` is set to "test-token" unless overridden.

use assert_cmd::Command;

/// Returns a hermetic `qradar-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `QRADAR_SEC_TOKEN` is set to a dummy value to satisfy config validation.
/// - Other connection env vars are cleared to ensure no leakage from the host.
/// - `--quiet` keeps progress bars out of captured stderr.
pub fn qradar_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("qradar-cli");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("QRADAR_SEC_TOKEN", "test-token");

    cmd.env_remove("QRADAR_CONSOLE")
        .env_remove("QRADAR_USERNAME")
        .env_remove("QRADAR_PASSWORD")
        .env_remove("QRADAR_PROXY")
        .env_remove("QRADAR_SKIP_VERIFY")
        .env_remove("QRADAR_TIMEOUT_MINUTES")
        .env_remove("QRADAR_VERBOSE")
        .env_remove("QRADAR_CLEANUP")
        .env_remove("QRADAR_REQUEST_TIMEOUT")
        .env_remove("RUST_LOG");

    cmd.arg("--quiet");
    cmd
}

/// Returns a hermetic `qradar-cli` command pointed at `console`.
#[allow(dead_code)]
pub fn qradar_cmd_with_console(console: &str) -> Command {
    let mut cmd = qradar_cmd();
    cmd.env("QRADAR_CONSOLE", console);
    cmd
}
