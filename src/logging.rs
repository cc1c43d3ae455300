//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Binaries embedding it
//! call [`init`] once at startup; `RUST_LOG` overrides the default level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    #[default]
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Format name is neither `pretty` nor `json`.
    #[error("Unknown log format '{0}', expected 'pretty' or 'json'")]
    UnknownFormat(String),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global tracing subscriber.
///
/// The default level is INFO, or DEBUG when `verbose` is set.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if a global subscriber was already set.
pub fn init(format: LogFormat, verbose: bool) -> Result<(), LoggingError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(LoggingError::Init)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names_case_insensitively() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(matches!(err, LoggingError::UnknownFormat(ref s) if s == "xml"));
    }

    #[test]
    fn display_matches_parse() {
        for format in [LogFormat::Pretty, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn defaults_to_json() {
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn second_init_fails() {
        // The first call may already have happened in another test.
        let _ = init(LogFormat::Pretty, false);
        assert!(matches!(
            init(LogFormat::Json, true),
            Err(LoggingError::Init(_))
        ));
    }
}
