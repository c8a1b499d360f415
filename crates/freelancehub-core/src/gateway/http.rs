use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};

use super::{error_message, Gateway};
use crate::config::ApiConfig;
use crate::error::{HubError, Result};
use crate::model::*;

/// Shared slot for the bearer token. The session store writes it on
/// restore/login/logout; the gateway reads it per request. Keeping the slot
/// outside both keeps the stores free of transport logic.
#[derive(Debug, Clone, Default)]
pub struct AuthToken(Arc<Mutex<Option<String>>>);

impl AuthToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = token;
    }

    pub fn get(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// How authenticated requests carry credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransport {
    /// `Authorization: Bearer <token>` from the shared [`AuthToken`] cell.
    Bearer,
    /// Server-managed session cookie via reqwest's cookie store.
    Cookie,
}

impl std::str::FromStr for AuthTransport {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "cookie" => Ok(Self::Cookie),
            _ => Err(format!("unknown auth transport: {s}")),
        }
    }
}

/// REST client for the marketplace API.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    transport: AuthTransport,
    token: AuthToken,
}

impl HttpGateway {
    pub fn from_config(config: &ApiConfig, token: AuthToken) -> Result<Self> {
        let transport: AuthTransport = config
            .auth
            .parse()
            .map_err(HubError::Config)?;

        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if transport == AuthTransport::Cookie {
            builder = builder.cookie_store(true);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if self.transport == AuthTransport::Bearer {
            if let Some(token) = self.token.get() {
                req = req.bearer_auth(token);
            }
        }
        req
    }

    /// Send a request and normalize any failure into [`HubError::Api`] with
    /// a human-readable message.
    async fn send(&self, req: RequestBuilder, fallback: &str) -> Result<Response> {
        let response = req
            .send()
            .await
            .map_err(|e| HubError::Api(format!("{fallback}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, fallback);
            tracing::debug!(%status, "request rejected: {message}");
            return Err(HubError::Api(message));
        }
        Ok(response)
    }

    async fn project_list(&self, path: &str, fallback: &str) -> Result<Vec<Project>> {
        let response = self.send(self.request(Method::GET, path), fallback).await?;
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("{fallback}: {e}")))?;
        Ok(parse_project_list(value))
    }
}

impl Gateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let response = self
            .send(
                self.request(Method::POST, "/auth/login").json(credentials),
                "Login failed",
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("Login failed: {e}")))
    }

    async fn signup(&self, input: &SignupInput) -> Result<User> {
        let response = self
            .send(
                self.request(Method::POST, "/auth/signup").json(input),
                "Signup failed",
            )
            .await?;
        let payload: SignupPayload = response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("Signup failed: {e}")))?;
        Ok(payload.user)
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>> {
        self.project_list("/projects", "Failed to fetch projects")
            .await
    }

    async fn fetch_project(&self, id: &str) -> Result<Project> {
        let response = self
            .send(
                self.request(Method::GET, &format!("/projects/{id}")),
                "Failed to fetch project",
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("Failed to fetch project: {e}")))
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project> {
        let response = self
            .send(
                self.request(Method::POST, "/projects").json(draft),
                "Failed to create project",
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("Failed to create project: {e}")))
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Project> {
        let response = self
            .send(
                self.request(Method::PUT, &format!("/projects/{id}"))
                    .json(patch),
                "Failed to update project",
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| HubError::Api(format!("Failed to update project: {e}")))
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.send(
            self.request(Method::DELETE, &format!("/projects/{id}")),
            "Failed to delete project",
        )
        .await?;
        Ok(())
    }

    async fn complete_project(&self, id: &str) -> Result<()> {
        self.send(
            self.request(Method::PATCH, &format!("/projects/{id}/complete")),
            "Failed to mark project as completed",
        )
        .await?;
        Ok(())
    }

    async fn my_projects(&self) -> Result<Vec<Project>> {
        self.project_list("/projects/user/me", "Failed to fetch your projects")
            .await
    }

    async fn completed_projects(&self) -> Result<Vec<Project>> {
        self.project_list(
            "/projects/completed/me",
            "Failed to fetch completed projects",
        )
        .await
    }
}

/// Normalize a list payload. A non-array body becomes an empty list and
/// malformed elements are skipped, both logged rather than surfaced: a bad
/// payload must not crash the collection store.
fn parse_project_list(value: serde_json::Value) -> Vec<Project> {
    let serde_json::Value::Array(items) = value else {
        tracing::warn!("expected a project array, got a non-array payload");
        return Vec::new();
    };

    let mut projects = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Project>(item) {
            Ok(project) => projects.push(project),
            Err(e) => tracing::warn!("skipping malformed project entry: {e}"),
        }
    }
    projects
}
