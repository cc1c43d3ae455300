//! Configuration layer for services built on taskhook.
//!
//! This module provides:
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! Every setting is optional; a missing file section or key falls back to
//! the value in [`defaults`].
//!
//! # Credentials
//!
//! The file names the environment variables that hold the API token and
//! base URL; it never holds the values themselves. They are resolved when a
//! client is built, see [`ValidatedConfig::api_client`].

pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
