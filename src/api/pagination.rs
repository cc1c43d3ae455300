//! Page-numbered list fetching.

use serde::de::DeserializeOwned;

use super::{ApiClient, ApiError};
use crate::transport::HttpClient;

/// Number of the first page requested.
pub const FIRST_PAGE: u32 = 1;

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// Appends `page=<page>` to `endpoint`, respecting an existing query string.
#[must_use]
pub fn page_endpoint(endpoint: &str, page: u32) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{PAGE_PARAM}={page}")
}

/// Fetches every page of `endpoint` and concatenates the items in order.
///
/// Equivalent to `Paginator::new(client, endpoint).fetch_all()`, with no
/// page ceiling: the loop only ends when the server returns an empty page.
///
/// # Errors
///
/// The first error from any page request is returned and the items
/// accumulated so far are dropped.
pub async fn fetch_all_pages<H, T>(
    client: &ApiClient<H>,
    endpoint: &str,
) -> Result<Vec<T>, ApiError>
where
    H: HttpClient,
    T: DeserializeOwned,
{
    Paginator::new(client, endpoint).fetch_all().await
}

/// Sequential page walker over a list endpoint.
///
/// Requests pages `1, 2, 3, ...` one after another until a page comes back
/// empty. Items keep server order within a page and page order across pages;
/// no deduplication is done. Pages cannot be fetched in parallel since the
/// stop condition is only known once the previous page arrived.
///
/// Without [`Paginator::with_max_pages`] a server that never returns an
/// empty page keeps the loop running.
#[derive(Debug)]
pub struct Paginator<'a, H> {
    client: &'a ApiClient<H>,
    endpoint: String,
    max_pages: Option<u32>,
}

impl<'a, H> Paginator<'a, H> {
    /// Creates an unbounded paginator over `endpoint`.
    #[must_use]
    pub fn new(client: &'a ApiClient<H>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            max_pages: None,
        }
    }

    /// Caps the number of page requests, the terminating empty page included.
    ///
    /// When page `max_pages` still carries items the walk fails with
    /// [`ApiError::PageLimit`] instead of requesting page `max_pages + 1`.
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Returns the configured page ceiling, if any.
    #[must_use]
    pub const fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }
}

impl<H: HttpClient> Paginator<'_, H> {
    /// Walks all pages and returns the accumulated items.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from a page request, or [`ApiError::PageLimit`]
    /// when the ceiling is reached first.
    pub async fn fetch_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut page = FIRST_PAGE;

        loop {
            if let Some(max_pages) = self.max_pages {
                if page > max_pages {
                    tracing::warn!(endpoint = %self.endpoint, max_pages, "Page limit reached");
                    return Err(ApiError::PageLimit { max_pages });
                }
            }

            let mut batch: Vec<T> = Vec::new();
            self.client
                .get(&page_endpoint(&self.endpoint, page), &mut batch)
                .await?;

            if batch.is_empty() {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    pages = page - FIRST_PAGE,
                    items = items.len(),
                    "Pagination complete"
                );
                return Ok(items);
            }

            items.append(&mut batch);
            page += 1;
        }
    }
}
