//! Typed request execution against a JSON REST API.
//!
//! This module provides:
//! - The request executor ([`execute`])
//! - An authenticated client with verb helpers ([`ApiClient`])
//! - Page-by-page accumulation of list endpoints ([`fetch_all_pages`], [`Paginator`])
//! - The error taxonomy shared by all of the above ([`ApiError`])

mod client;
mod error;
mod executor;
mod pagination;

#[cfg(test)]
mod pagination_tests;

pub use client::ApiClient;
pub use error::ApiError;
pub use executor::{execute, method_accepts_body};
pub use pagination::{FIRST_PAGE, PAGE_PARAM, Paginator, fetch_all_pages, page_endpoint};
