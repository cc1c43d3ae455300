//! reqwest-backed transport used by API clients outside of tests.

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Talks to the real task server over a pooled `reqwest::Client`.
///
/// Configuration and the task client builders wrap one of these; the
/// executor never sees reqwest directly. Deadlines, proxies and TLS are
/// whatever the wrapped client was built with, so pass a configured one
/// to [`ReqwestClient::from_client`] when calls must not hang.
///
/// ```no_run
/// use taskhook::api::ApiClient;
/// use taskhook::transport::ReqwestClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http = reqwest::Client::builder()
///     .timeout(std::time::Duration::from_secs(10))
///     .build()?;
/// let api = ApiClient::new(
///     "https://tasks.example.com/api/v1",
///     "secret-token",
///     ReqwestClient::from_client(http),
/// )?;
/// # let _ = api;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Uses reqwest's defaults: pooled connections, no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps a client the caller has already configured.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else if e.is_builder() {
                TransportError::InvalidUrl(e.to_string())
            } else {
                TransportError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
