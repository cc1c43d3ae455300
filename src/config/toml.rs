//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional; validation fills in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Where credentials are looked up
    #[serde(default)]
    pub credentials: CredentialsSection,

    /// Webhook endpoint listener
    #[serde(default)]
    pub server: ServerSection,

    /// Webhook body normalization
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Log output
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Credential lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Environment variable holding the API token
    pub token_var: Option<String>,

    /// Environment variable holding the API base URL
    pub base_url_var: Option<String>,

    /// Behaviour when a variable is missing: "error" or "halt"
    pub on_missing: Option<String>,
}

/// Webhook endpoint listener section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Listen address, `host:port`
    pub bind: Option<String>,

    /// Route the endpoint is mounted at
    pub path: Option<String>,
}

/// Webhook normalization section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Object key holding an enveloped event
    pub envelope_key: Option<String>,
}

/// Log output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// "pretty" or "json"
    pub format: Option<String>,

    /// Log at DEBUG instead of INFO
    #[serde(default)]
    pub verbose: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# taskhook configuration file

[credentials]
# Environment variable holding the API bearer token
# token_var = "VIKUNJA_API_TOKEN"

# Environment variable holding the API base URL, e.g. https://tasks.example.com/api/v1
# base_url_var = "VIKUNJA_API_URL"

# What to do when either variable is unset or empty:
# "error" returns an error, "halt" logs and exits the process
# on_missing = "error"

[server]
# Address the webhook endpoint listens on
# bind = "0.0.0.0:8080"

# Route the webhook endpoint is mounted at
# path = "/"

[webhook]
# Object key whose string value holds an enveloped event
# envelope_key = "body"

[logging]
# "json" or "pretty" (RUST_LOG overrides the level)
# format = "json"

# Log at DEBUG level
# verbose = false
"#
    .to_string()
}
