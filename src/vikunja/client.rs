//! Typed Vikunja endpoints.

use crate::api::{ApiClient, ApiError, fetch_all_pages};
use crate::credentials::{self, MissingCredential, ProcessEnv};
use crate::transport::{HttpClient, ReqwestClient};

use super::{Comment, Label, Project, Webhook};

/// Environment variable read for the token when none is given explicitly.
pub const TOKEN_VAR: &str = "VIKUNJA_API_TOKEN";

/// Environment variable read for the base URL when none is given explicitly.
pub const BASE_URL_VAR: &str = "VIKUNJA_API_URL";

/// Vikunja client over a generic [`ApiClient`].
///
/// List endpoints that Vikunja paginates are walked to the end.
#[derive(Debug, Clone)]
pub struct TaskClient<H = ReqwestClient> {
    api: ApiClient<H>,
}

impl TaskClient<ReqwestClient> {
    /// Builds a client, falling back to [`TOKEN_VAR`] and [`BASE_URL_VAR`]
    /// for whichever of `token` and `base_url` is empty.
    ///
    /// # Errors
    ///
    /// [`ApiError::Credential`] if a fallback variable is unset or empty,
    /// [`ApiError::Developer`] if the base URL is invalid.
    pub fn from_env(token: &str, base_url: &str) -> Result<Self, ApiError> {
        Self::from_source(&ProcessEnv, token, base_url, ReqwestClient::new())
    }
}

impl<H> TaskClient<H> {
    /// Wraps an existing API client.
    #[must_use]
    pub const fn new(api: ApiClient<H>) -> Self {
        Self { api }
    }

    /// Like [`TaskClient::from_env`], reading fallbacks from `source`.
    ///
    /// # Errors
    ///
    /// See [`TaskClient::from_env`].
    pub fn from_source(
        source: &impl credentials::EnvSource,
        token: &str,
        base_url: &str,
        transport: H,
    ) -> Result<Self, ApiError> {
        let token = or_resolve(source, token, TOKEN_VAR)?;
        let base_url = or_resolve(source, base_url, BASE_URL_VAR)?;
        Ok(Self::new(ApiClient::new(base_url, token, transport)?))
    }

    /// Returns the underlying API client for endpoints not covered here.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<H> {
        &self.api
    }
}

fn or_resolve(
    source: &impl credentials::EnvSource,
    explicit: &str,
    var: &str,
) -> Result<String, ApiError> {
    if explicit.is_empty() {
        Ok(credentials::resolve_with_policy(
            source,
            var,
            MissingCredential::Error,
        )?)
    } else {
        Ok(explicit.to_string())
    }
}

impl<H: HttpClient> TaskClient<H> {
    /// Lists every project visible to the token.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the page requests.
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        fetch_all_pages(&self.api, "/projects").await
    }

    /// Lists the webhooks registered on a project.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn project_webhooks(&self, project_id: i64) -> Result<Vec<Webhook>, ApiError> {
        let mut webhooks = Vec::new();
        self.api
            .get(&format!("/projects/{project_id}/webhooks"), &mut webhooks)
            .await?;
        Ok(webhooks)
    }

    /// Registers `webhook` on a project and returns the stored record.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn create_project_webhook(
        &self,
        project_id: i64,
        webhook: &Webhook,
    ) -> Result<Webhook, ApiError> {
        let mut created = Webhook::default();
        self.api
            .post(
                &format!("/projects/{project_id}/webhooks"),
                webhook,
                &mut created,
            )
            .await?;
        Ok(created)
    }

    /// Updates the events of an existing webhook, addressed by `webhook.id`.
    ///
    /// Vikunja takes updates as a POST to the webhook's own path and ignores
    /// every field except `events`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn update_project_webhook(
        &self,
        project_id: i64,
        webhook: &Webhook,
    ) -> Result<Webhook, ApiError> {
        let mut updated = Webhook::default();
        self.api
            .post(
                &format!("/projects/{project_id}/webhooks/{}", webhook.id),
                webhook,
                &mut updated,
            )
            .await?;
        Ok(updated)
    }

    /// Lists every label visible to the token.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the page requests.
    pub async fn labels(&self) -> Result<Vec<Label>, ApiError> {
        fetch_all_pages(&self.api, "/labels").await
    }

    /// Lists the comments on a task.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn task_comments(&self, task_id: i64) -> Result<Vec<Comment>, ApiError> {
        let mut comments = Vec::new();
        self.api
            .get(&format!("/tasks/{task_id}/comments"), &mut comments)
            .await?;
        Ok(comments)
    }
}
