//! Error types for webhook ingestion.

use http::StatusCode;
use thiserror::Error;

use crate::api::ApiError;

/// Boxed error returned by event handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for normalizing and dispatching one webhook body.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The inbound stream could not be read.
    #[error("Failed to read webhook body: {0}")]
    Read(#[from] std::io::Error),

    /// The body (or one embedded event) matched no known wire shape.
    #[error("Failed to deserialize webhook payload: {source}")]
    Deserialization {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The text that failed to parse
        body: String,
    },

    /// The handler rejected an event. Passed through unchanged.
    #[error(transparent)]
    Callback(BoxError),
}

impl WebhookError {
    /// Returns true when the failure is a bug in the service itself.
    ///
    /// That is the case when the handler failed with
    /// [`ApiError::Developer`], e.g. because it misused the API client.
    /// The handler's error is searched along its whole `source()` chain, so
    /// a wrapped developer error still counts.
    #[must_use]
    pub fn is_developer_error(&self) -> bool {
        match self {
            Self::Callback(source) => {
                let root: &(dyn std::error::Error + 'static) = source.as_ref();
                std::iter::successors(Some(root), |err| err.source()).any(|err| {
                    err.downcast_ref::<ApiError>()
                        .is_some_and(ApiError::is_developer_error)
                })
            }
            Self::Read(_) | Self::Deserialization { .. } => false,
        }
    }

    /// HTTP status reported to the webhook sender for this failure.
    ///
    /// 500 for developer errors, 400 for everything else.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        if self.is_developer_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    pub(crate) fn deserialization(source: serde_json::Error, body: &[u8]) -> Self {
        Self::Deserialization {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}
