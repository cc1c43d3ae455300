//! Authenticated API client.

use std::fmt;

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ApiError, execute};
use crate::credentials::{self, EnvSource, MissingCredential, ProcessEnv};
use crate::transport::{HttpClient, ReqwestClient};

/// Base URL, bearer token and transport, fixed for the client's lifetime.
///
/// The client holds no mutable state: every call builds its own request and
/// buffers, so one instance can be shared by concurrent callers (wrap the
/// transport in an `Arc` or clone the client). Rotating credentials means
/// building a new client.
///
/// Each verb method is a direct delegation to [`execute`]; see there for
/// the response-slot contract and the error taxonomy.
///
/// # Example
///
/// ```no_run
/// use taskhook::api::ApiClient;
/// use taskhook::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), taskhook::api::ApiError> {
/// let client = ApiClient::new("https://tasks.example.com/api/v1", "secret", ReqwestClient::new())?;
/// let mut projects: Vec<serde_json::Value> = Vec::new();
/// client.get("/projects", &mut projects).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient<H = ReqwestClient> {
    base_url: String,
    token: String,
    transport: H,
}

impl<H> ApiClient<H> {
    /// Creates a client for `base_url`.
    ///
    /// A trailing `/` on the base URL is dropped. An empty `token` puts the
    /// client in unauthenticated mode.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Developer`] if `base_url` is empty or not an
    /// absolute URL.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        transport: H,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');

        if base_url.is_empty() {
            return Err(ApiError::developer("base URL must not be empty"));
        }
        if let Err(e) = url::Url::parse(base_url) {
            return Err(ApiError::developer(format!(
                "base URL '{base_url}' is invalid: {e}"
            )));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            token: token.into(),
            transport,
        })
    }

    /// Returns the base URL every endpoint is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns the shared transport handle.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.transport
    }
}

impl ApiClient<ReqwestClient> {
    /// Builds a client whose token and base URL come from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Credential`] when either variable is unset or empty
    /// and `policy` is [`MissingCredential::Error`]. With
    /// [`MissingCredential::Halt`] the process exits instead.
    pub fn from_env(
        token_var: &str,
        base_url_var: &str,
        policy: MissingCredential,
    ) -> Result<Self, ApiError> {
        Self::from_source(&ProcessEnv, token_var, base_url_var, policy, ReqwestClient::new())
    }
}

impl<H> ApiClient<H> {
    /// Like [`ApiClient::from_env`], reading from any [`EnvSource`] and
    /// using the given transport.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::from_env`] and [`ApiClient::new`].
    pub fn from_source(
        source: &impl EnvSource,
        token_var: &str,
        base_url_var: &str,
        policy: MissingCredential,
        transport: H,
    ) -> Result<Self, ApiError> {
        let token = credentials::resolve_with_policy(source, token_var, policy)?;
        let base_url = credentials::resolve_with_policy(source, base_url_var, policy)?;
        Self::new(base_url, token, transport)
    }
}

impl<H: HttpClient> ApiClient<H> {
    /// Sends a GET request to `endpoint` and decodes the response into `response`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: &mut T,
    ) -> Result<(), ApiError> {
        self.send::<(), T>(Method::GET, endpoint, None, response).await
    }

    /// Sends `request` as a JSON POST body to `endpoint`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        request: &B,
        response: &mut T,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, endpoint, Some(request), response)
            .await
    }

    /// Sends `request` as a JSON PUT body to `endpoint`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn put<B, T>(
        &self,
        endpoint: &str,
        request: &B,
        response: &mut T,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, endpoint, Some(request), response)
            .await
    }

    /// Sends a DELETE request to `endpoint`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: &mut T,
    ) -> Result<(), ApiError> {
        self.send::<(), T>(Method::DELETE, endpoint, None, response)
            .await
    }

    /// Sends an arbitrary verb; body rules are enforced by [`execute`].
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        request: Option<&B>,
        response: &mut T,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        execute(
            &self.transport,
            method,
            &self.base_url,
            endpoint,
            &self.token,
            request,
            response,
        )
        .await
    }
}

impl<H> fmt::Debug for ApiClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<none>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &token)
            .finish_non_exhaustive()
    }
}
