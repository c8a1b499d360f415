use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};

pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate a draft before it is sent to the server. Mirrors the server's
/// own field constraints so obviously bad input never leaves the client.
pub fn validate_draft(draft: &ProjectDraft) -> Result<()> {
    validate_title(&draft.title)?;
    if draft.description.trim().is_empty() {
        return Err(HubError::InvalidInput(
            "description cannot be empty".into(),
        ));
    }
    if draft.budget == 0 {
        return Err(HubError::InvalidInput("budget must be positive".into()));
    }
    if draft.tech_stack.is_empty() {
        return Err(HubError::InvalidInput(
            "tech stack needs at least one entry".into(),
        ));
    }
    Ok(())
}

/// Validate a patch before it is sent. Absent fields are not checked.
pub fn validate_patch(patch: &ProjectPatch) -> Result<()> {
    if let Some(ref title) = patch.title {
        validate_title(title)?;
    }
    if let Some(ref description) = patch.description {
        if description.trim().is_empty() {
            return Err(HubError::InvalidInput(
                "description cannot be empty".into(),
            ));
        }
    }
    if patch.budget == Some(0) {
        return Err(HubError::InvalidInput("budget must be positive".into()));
    }
    if let Some(ref stack) = patch.tech_stack {
        if stack.is_empty() {
            return Err(HubError::InvalidInput(
                "tech stack needs at least one entry".into(),
            ));
        }
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(HubError::InvalidInput("title cannot be empty".into()));
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(HubError::InvalidInput(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A marketplace project as cached by the client.
///
/// Identity: `id` is the canonical key. Historical API payloads carry the
/// same value under `_id`; the serde alias maps either spelling onto this
/// one field at ingestion, so no code downstream ever compares the raw
/// `_id` name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub budget: u64,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Completion badge scoped to the authenticated viewer, distinct from
    /// the project's global lifecycle `status`. Populated by fetches only.
    #[serde(default, rename = "isCompleted")]
    pub is_completed: bool,
}

impl Project {
    /// Merge the fields present in `patch` into this project, preserving
    /// everything the patch does not mention.
    pub fn apply_patch(&mut self, patch: &ProjectPatch) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(ref tech_stack) = patch.tech_stack {
            self.tech_stack = tech_stack.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Open,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(format!("unknown project status: {s}")),
        }
    }
}

/// Fields sent to `POST /projects`. The server assigns `id`, `created_by`,
/// and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub budget: u64,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

/// Partial update for `PUT /projects/{id}`. Absent fields are not sent and
/// not merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.budget.is_none()
            && self.tech_stack.is_none()
            && self.status.is_none()
    }
}
