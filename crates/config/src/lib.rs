//! Configuration management for the QRadar search toolkit.
//!
//! This crate provides types and loaders for QRadar console connection,
//! credential, and search lifecycle settings, sourced from `.env` files,
//! environment variables, and explicit builder overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SearchConfig};
