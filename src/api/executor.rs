//! Single typed request execution.
//!
//! [`execute`] is the only place a request is built, sent and classified.
//! Everything else in the crate (verb helpers, pagination, the task-manager
//! binding) funnels through it.

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiError;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// JSON read in place of an empty response body.
const EMPTY_BODY: &[u8] = b"null";

/// Returns true for the verbs allowed to carry a request body (POST, PUT).
#[must_use]
pub fn method_accepts_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

/// Executes one API request and decodes the response into `slot`.
///
/// The request goes to `base_url` followed by `endpoint`, joined verbatim:
/// `"/items"` and `"?q=1"` both land directly after the base, so endpoints
/// normally start with `/`. A non-empty `token` is sent as a bearer
/// `Authorization` header; an empty one means an unauthenticated request.
/// When `body` is present it is encoded as JSON and sent with a JSON
/// content type.
///
/// # Response handling
///
/// The body is decoded before the status is looked at:
/// - the body does not decode: [`ApiError::Deserialization`] whatever the
///   status, `slot` untouched.
/// - 2xx and the body decodes: `slot` is overwritten, `Ok(())`.
/// - non-2xx and the body decodes: `slot` is overwritten *and*
///   [`ApiError::Status`] is returned, so callers can inspect an error payload.
///
/// An empty (or all-whitespace) body is decoded as JSON `null`, so `()`
/// and `Option<_>` slots accept bodiless responses such as 204.
///
/// # Errors
///
/// - [`ApiError::Developer`] if a body is supplied for a verb other than
///   POST or PUT, or `base_url` + `endpoint` is not a valid URL. Nothing is sent.
/// - [`ApiError::Serialization`] if `body` cannot be encoded. Nothing is sent.
/// - [`ApiError::Transport`] if the remote host could not be reached.
/// - [`ApiError::Deserialization`] / [`ApiError::Status`] as described above.
pub async fn execute<H, B, T>(
    transport: &H,
    method: Method,
    base_url: &str,
    endpoint: &str,
    token: &str,
    body: Option<&B>,
    slot: &mut T,
) -> Result<(), ApiError>
where
    H: HttpClient,
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    if body.is_some() && !method_accepts_body(&method) {
        tracing::error!(%method, endpoint, "Request body supplied for a method without one");
        return Err(ApiError::developer(format!(
            "{method} requests do not support request bodies"
        )));
    }

    let payload = body
        .map(serde_json::to_vec)
        .transpose()
        .map_err(ApiError::Serialization)?;

    let url = join_url(base_url, endpoint)?;
    let request = build_request(method.clone(), url, token, payload)?;

    tracing::debug!(%method, endpoint, authenticated = !token.is_empty(), "Sending API request");

    let response = transport.request(request).await.map_err(|e| {
        tracing::warn!(%method, endpoint, error = %e, "API request failed to reach host");
        ApiError::Transport(e)
    })?;

    tracing::debug!(%method, endpoint, status = response.status.as_u16(), "API response received");

    settle(&response, slot)
}

/// Appends `endpoint` to `base_url` as-is; no separator is added or removed.
fn join_url(base_url: &str, endpoint: &str) -> Result<Url, ApiError> {
    let joined = format!("{base_url}{endpoint}");
    Url::parse(&joined)
        .map_err(|e| ApiError::developer(format!("invalid request URL '{joined}': {e}")))
}

fn build_request(
    method: Method,
    url: Url,
    token: &str,
    payload: Option<Vec<u8>>,
) -> Result<HttpRequest, ApiError> {
    let mut request = HttpRequest::new(method, url);

    if !token.is_empty() {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ApiError::developer("bearer token contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        request = request.with_header(AUTHORIZATION, value);
    }

    if let Some(payload) = payload {
        request = request
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(payload);
    }

    Ok(request)
}

/// Decodes the body, then classifies the status.
fn settle<T: DeserializeOwned>(response: &HttpResponse, slot: &mut T) -> Result<(), ApiError> {
    match decode::<T>(&response.body) {
        Ok(value) => *slot = value,
        Err(source) => {
            let body = response.body_lossy();
            tracing::error!(
                status = response.status.as_u16(),
                error = %source,
                body = %body,
                "Failed to deserialize response"
            );
            return Err(ApiError::Deserialization { source, body });
        }
    }

    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: response.status,
            body: response.body_lossy(),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(EMPTY_BODY)
    } else {
        serde_json::from_slice(body)
    }
}
