//! How API calls reach the task server.
//!
//! The executor in [`crate::api`] turns each call into an [`HttpRequest`]
//! and hands it to an [`HttpClient`]. [`ReqwestClient`] is the production
//! implementation; [`TransportError`] covers calls that got no response.

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::ReqwestClient;
pub use error::TransportError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
