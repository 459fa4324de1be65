//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods, auth resolution and console normalization.
//! - Test environment variable handling and precedence.
//! - Test numeric bound validation.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and `env_lock()`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
