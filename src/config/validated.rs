//! Validated configuration built from a TOML file.
//!
//! All validation is performed during construction; a [`ValidatedConfig`]
//! only holds typed, usable values.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiError};
use crate::credentials::{EnvSource, MissingCredential, ProcessEnv};
use crate::logging::{self, LogFormat, LoggingError};
use crate::transport::ReqwestClient;
use crate::vikunja::TaskClient;
use crate::webhook::{EventHandler, Normalizer, webhook_router};

use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration.
///
/// Use [`ValidatedConfig::load`] for a file on disk, or
/// [`ValidatedConfig::from_toml`] for an already parsed one.
/// [`ValidatedConfig::default`] is the configuration of an empty file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Environment variable holding the API token
    pub token_var: String,

    /// Environment variable holding the API base URL
    pub base_url_var: String,

    /// Behaviour when either credential variable is missing
    pub on_missing: MissingCredential,

    /// Address the webhook endpoint listens on
    pub bind: SocketAddr,

    /// Route the webhook endpoint is mounted at
    pub path: String,

    /// Object key holding an enveloped webhook event
    pub envelope_key: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Log at DEBUG instead of INFO
    pub verbose: bool,
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self {
            token_var: defaults::TOKEN_VAR.to_string(),
            base_url_var: defaults::BASE_URL_VAR.to_string(),
            on_missing: MissingCredential::default(),
            bind: defaults::bind_addr(),
            path: defaults::PATH.to_string(),
            envelope_key: defaults::ENVELOPE_KEY.to_string(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ token_var: {}, base_url_var: {}, on_missing: {}, bind: {}, path: {}, \
             envelope_key: {}, log: {}{} }}",
            self.token_var,
            self.base_url_var,
            on_missing_name(self.on_missing),
            self.bind,
            self.path,
            self.envelope_key,
            self.log_format,
            if self.verbose { "/verbose" } else { "" },
        )
    }
}

impl ValidatedConfig {
    /// Loads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// value is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = TomlConfig::load(path)?;
        Self::from_toml(&toml)
    }

    /// Validates a parsed configuration, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A variable name or the envelope key is empty
    /// - The bind address is not `host:port`
    /// - The path does not start with `/`
    /// - `on_missing` or the log format is unknown
    pub fn from_toml(toml: &TomlConfig) -> Result<Self, ConfigError> {
        let token_var = non_empty(
            toml.credentials.token_var.as_deref(),
            defaults::TOKEN_VAR,
            field::TOKEN_VAR,
        )?;
        let base_url_var = non_empty(
            toml.credentials.base_url_var.as_deref(),
            defaults::BASE_URL_VAR,
            field::BASE_URL_VAR,
        )?;
        let on_missing = toml
            .credentials
            .on_missing
            .as_deref()
            .map_or(Ok(MissingCredential::default()), parse_on_missing)?;

        let bind = Self::resolve_bind(toml)?;
        let path = Self::resolve_path(toml)?;

        let envelope_key = non_empty(
            toml.webhook.envelope_key.as_deref(),
            defaults::ENVELOPE_KEY,
            field::ENVELOPE_KEY,
        )?;

        let log_format = toml
            .logging
            .format
            .as_deref()
            .map_or(Ok(LogFormat::default()), |value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|_| ConfigError::InvalidLogFormat {
                        value: value.to_string(),
                    })
            })?;

        Ok(Self {
            token_var,
            base_url_var,
            on_missing,
            bind,
            path,
            envelope_key,
            log_format,
            verbose: toml.logging.verbose,
        })
    }

    fn resolve_bind(toml: &TomlConfig) -> Result<SocketAddr, ConfigError> {
        let Some(value) = toml.server.bind.as_deref() else {
            return Ok(defaults::bind_addr());
        };

        value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: value.to_string(),
                source,
            })
    }

    fn resolve_path(toml: &TomlConfig) -> Result<String, ConfigError> {
        let path = toml.server.path.as_deref().unwrap_or(defaults::PATH);

        if !path.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                value: path.to_string(),
            });
        }
        Ok(path.to_string())
    }

    /// Returns a webhook normalizer using the configured envelope key.
    #[must_use]
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new().with_envelope_key(&self.envelope_key)
    }

    /// Builds the webhook router at the configured path.
    #[must_use]
    pub fn webhook_router<E, H>(&self, handler: H) -> Router
    where
        E: DeserializeOwned + Send + 'static,
        H: EventHandler<E> + 'static,
    {
        webhook_router(&self.path, self.normalizer(), handler)
    }

    /// Installs the global tracing subscriber with the configured format.
    ///
    /// # Errors
    ///
    /// See [`logging::init`].
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        logging::init(self.log_format, self.verbose)
    }

    /// Builds an API client from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::from_env`].
    pub fn api_client(&self) -> Result<ApiClient, ApiError> {
        self.api_client_from(&ProcessEnv, ReqwestClient::new())
    }

    /// Builds an API client reading credentials from `source`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::from_source`].
    pub fn api_client_from<H>(
        &self,
        source: &impl EnvSource,
        transport: H,
    ) -> Result<ApiClient<H>, ApiError> {
        ApiClient::from_source(
            source,
            &self.token_var,
            &self.base_url_var,
            self.on_missing,
            transport,
        )
    }

    /// Builds a Vikunja client from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ValidatedConfig::api_client`].
    pub fn task_client(&self) -> Result<TaskClient, ApiError> {
        self.api_client().map(TaskClient::new)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn non_empty(
    value: Option<&str>,
    default: &str,
    field: &'static str,
) -> Result<String, ConfigError> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyField { field }),
        Some(v) => Ok(v.to_string()),
    }
}

fn parse_on_missing(s: &str) -> Result<MissingCredential, ConfigError> {
    match s.to_lowercase().as_str() {
        "error" => Ok(MissingCredential::Error),
        "halt" => Ok(MissingCredential::Halt),
        _ => Err(ConfigError::InvalidOnMissing {
            value: s.to_string(),
        }),
    }
}

const fn on_missing_name(policy: MissingCredential) -> &'static str {
    match policy {
        MissingCredential::Error => "error",
        MissingCredential::Halt => "halt",
    }
}
