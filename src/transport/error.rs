//! Failures below the API layer, before any status code exists.

use thiserror::Error;

/// The task server could not be reached, or its answer could not be read.
///
/// Surfaced to callers as [`ApiError::Transport`](crate::api::ApiError::Transport).
/// A 4xx or 5xx answer is not a transport error; the executor reports
/// those as [`ApiError::Status`](crate::api::ApiError::Status).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connecting to the server or reading its response failed.
    #[error("Task server unreachable: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The deadline configured on the wrapped reqwest client expired.
    #[error("Task server did not answer in time")]
    Timeout,

    /// reqwest refused to build the request from the joined URL.
    #[error("Request URL rejected: {0}")]
    InvalidUrl(String),
}
