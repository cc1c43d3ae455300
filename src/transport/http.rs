//! Wire-level values exchanged with the task API and the transport seam
//! the request executor sends them through.

use std::sync::Arc;

use super::TransportError;

/// One outgoing API call, fully prepared by the executor.
///
/// By the time a request reaches a transport its URL is already
/// `base_url + endpoint`, the bearer token (if any) sits in `headers`,
/// and a JSON payload has been encoded into `body`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    pub url: url::Url,
    /// `Authorization` and `Content-Type`, when set.
    pub headers: http::HeaderMap,
    /// Encoded JSON payload; only POST and PUT carry one.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no payload.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches an encoded JSON payload.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any earlier value under the same name.
    ///
    /// An API call carries at most one token and one content type.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// What the task API sent back, with the body fully buffered.
///
/// The status is not interpreted here: the executor decides whether a
/// 4xx/5xx becomes an error after it has tried to decode the body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for any status in `[200, 300)`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text for error payloads and logs; invalid UTF-8 is replaced.
    #[must_use]
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends prepared API calls to the remote task server.
///
/// One handle is shared by every call an [`ApiClient`](crate::api::ApiClient)
/// makes, including each page of a paginated listing, so implementations
/// hold no per-call state. Tests swap in a scripted transport here instead
/// of talking to a real server.
pub trait HttpClient: Send + Sync {
    /// Performs one exchange and buffers the whole response.
    ///
    /// # Errors
    ///
    /// [`TransportError`] when no response was obtained at all. Any status
    /// code the server answers with, 4xx and 5xx included, is `Ok`.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).request(req)
    }
}
