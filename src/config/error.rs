//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the configuration template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A string setting was present but empty.
    #[error("Field {field} must not be empty")]
    EmptyField {
        /// Name of the empty field
        field: &'static str,
    },

    /// The listen address is not `host:port`.
    #[error("Invalid bind address '{value}': {source}")]
    InvalidBindAddress {
        /// The invalid address string
        value: String,
        /// Underlying parse error
        #[source]
        source: std::net::AddrParseError,
    },

    /// The endpoint path cannot be routed.
    #[error("Invalid webhook path '{value}': must start with '/'")]
    InvalidPath {
        /// The invalid path
        value: String,
    },

    /// Unknown missing-credential policy.
    #[error("Invalid on_missing value '{value}': expected 'error' or 'halt'")]
    InvalidOnMissing {
        /// The invalid value provided
        value: String,
    },

    /// Unknown log format.
    #[error("Invalid log format '{value}': expected 'pretty' or 'json'")]
    InvalidLogFormat {
        /// The invalid value provided
        value: String,
    },
}

/// Dotted field names used in [`ConfigError::EmptyField`].
pub mod field {
    /// `credentials.token_var`
    pub const TOKEN_VAR: &str = "credentials.token_var";
    /// `credentials.base_url_var`
    pub const BASE_URL_VAR: &str = "credentials.base_url_var";
    /// `webhook.envelope_key`
    pub const ENVELOPE_KEY: &str = "webhook.envelope_key";
}
