//! Credential lookup from the process environment.
//!
//! Credentials are looked up by exact variable name on every call; nothing
//! is cached. An empty value counts as unset. Only the variable *name* is
//! ever logged.

use std::collections::HashMap;
use std::hash::BuildHasher;

use thiserror::Error;

/// Exit code used when a required credential is missing under
/// [`MissingCredential::Halt`].
pub const HALT_EXIT_CODE: i32 = 78;

/// Error returned when a credential cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The variable is unset, empty, or not valid Unicode.
    #[error("No credentials found for {name}")]
    Missing {
        /// Name of the environment variable that was looked up
        name: String,
    },
}

impl CredentialError {
    /// Returns the name of the credential that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name } => name,
        }
    }
}

/// What to do when a required credential is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingCredential {
    /// Return [`CredentialError::Missing`] to the caller.
    #[default]
    Error,
    /// Log the failure and terminate the process (fail-fast startup).
    Halt,
}

/// A source of named string values.
///
/// [`ProcessEnv`] is the production source; tests and embedders can use a
/// `HashMap<String, String>` instead of mutating the real environment.
pub trait EnvSource {
    /// Returns the raw value of `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolves `name` from the process environment.
///
/// # Errors
///
/// Returns [`CredentialError::Missing`] if the variable is unset or empty.
pub fn resolve(name: &str) -> Result<String, CredentialError> {
    resolve_from(&ProcessEnv, name)
}

/// Resolves `name` from the given source.
///
/// # Errors
///
/// Returns [`CredentialError::Missing`] if the value is absent or empty.
pub fn resolve_from(source: &impl EnvSource, name: &str) -> Result<String, CredentialError> {
    match source.var(name) {
        Some(value) if !value.is_empty() => {
            tracing::info!(credential = name, "Credential found");
            Ok(value)
        }
        _ => {
            tracing::warn!(credential = name, "Credential not found");
            Err(CredentialError::Missing {
                name: name.to_string(),
            })
        }
    }
}

/// Resolves `name` and applies `policy` when it is missing.
///
/// # Errors
///
/// Returns [`CredentialError::Missing`] under [`MissingCredential::Error`].
/// Under [`MissingCredential::Halt`] a missing credential never returns.
pub fn resolve_with_policy(
    source: &impl EnvSource,
    name: &str,
    policy: MissingCredential,
) -> Result<String, CredentialError> {
    match (resolve_from(source, name), policy) {
        (Err(error), MissingCredential::Halt) => halt(&error),
        (result, _) => result,
    }
}

/// Resolves `name` from the process environment or terminates the process.
///
/// Meant for startup code that has no sensible continuation without the
/// value. Prefer [`resolve`] everywhere else.
#[must_use]
pub fn resolve_or_halt(name: &str) -> String {
    match resolve(name) {
        Ok(value) => value,
        Err(error) => halt(&error),
    }
}

fn halt(error: &CredentialError) -> ! {
    tracing::error!(credential = error.name(), "Required credential missing, halting");
    eprintln!("Fatal: {error}");
    std::process::exit(HALT_EXIT_CODE)
}
