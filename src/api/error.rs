//! Error taxonomy for API calls.

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::transport::TransportError;

/// Error type for a single API call.
///
/// Exactly one of "response slot populated" or one of these variants holds
/// after every call. Nothing here is retried internally; the variants only
/// describe what went wrong so the caller can decide.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller misuse detected before any network I/O.
    ///
    /// Examples: a request body on a GET, an endpoint that does not form a
    /// valid URL, an empty base URL. Indicates a bug in the calling code.
    #[error("Developer error: {0}")]
    Developer(String),

    /// A named credential could not be resolved while building a client.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The request body could not be encoded as JSON. Nothing was sent.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body did not match the expected JSON shape.
    ///
    /// The response slot is left untouched.
    #[error("Failed to deserialize response body: {source}")]
    Deserialization {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The remote host could not be reached.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The remote host answered with a status outside `[200, 300)`.
    #[error("API request failed with status code {}: {body}", status.as_u16())]
    Status {
        /// HTTP status code returned by the server
        status: http::StatusCode,
        /// Raw response body
        body: String,
    },

    /// A paginated fetch hit its configured page ceiling before the
    /// server returned an empty page.
    #[error("Pagination stopped after {max_pages} pages without reaching an empty page")]
    PageLimit {
        /// The configured ceiling
        max_pages: u32,
    },
}

impl ApiError {
    /// Returns true for failures caused by the calling code itself.
    #[must_use]
    pub const fn is_developer_error(&self) -> bool {
        matches!(self, Self::Developer(_))
    }

    /// Returns the HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn developer(message: impl Into<String>) -> Self {
        Self::Developer(message.into())
    }
}
