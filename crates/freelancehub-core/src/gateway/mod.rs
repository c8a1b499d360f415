mod http;

pub use http::{AuthToken, AuthTransport, HttpGateway};

use crate::error::Result;
use crate::model::*;

/// Seam between the stores and the marketplace REST API.
///
/// `HttpGateway` is the production implementation; tests substitute a
/// scripted in-memory one. Every rejection a gateway produces carries a
/// human-readable message; stores never see status codes or transport
/// detail.
pub trait Gateway: Send + Sync {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<AuthPayload>> + Send;

    fn signup(
        &self,
        input: &SignupInput,
    ) -> impl std::future::Future<Output = Result<User>> + Send;

    fn fetch_projects(&self) -> impl std::future::Future<Output = Result<Vec<Project>>> + Send;

    fn fetch_project(&self, id: &str)
        -> impl std::future::Future<Output = Result<Project>> + Send;

    fn create_project(
        &self,
        draft: &ProjectDraft,
    ) -> impl std::future::Future<Output = Result<Project>> + Send;

    fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> impl std::future::Future<Output = Result<Project>> + Send;

    fn delete_project(&self, id: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    fn complete_project(&self, id: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Projects posted by the authenticated user.
    fn my_projects(&self) -> impl std::future::Future<Output = Result<Vec<Project>>> + Send;

    /// Projects the authenticated user has marked completed.
    fn completed_projects(&self) -> impl std::future::Future<Output = Result<Vec<Project>>> + Send;
}

/// Pull a human-readable message out of an error response body.
/// Prefers the server's `detail` field, then `message`, then the fallback.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    fallback.to_string()
}
