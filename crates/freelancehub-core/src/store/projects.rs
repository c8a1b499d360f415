use tracing::debug;

use super::OpState;
use crate::error::{HubError, Result};
use crate::gateway::Gateway;
use crate::model::{Project, ProjectDraft, ProjectPatch, ProjectStatus};

/// Client cache of the server's project list plus the independently
/// addressable current-project slot.
///
/// The list element and the current-project copy with the same identity are
/// separate values kept in lockstep by the mutation operations here, never
/// aliases. Fields are private so no caller can write around those rules;
/// reads go through the accessors.
#[derive(Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current: Option<Project>,
    status: OpState,
    error: Option<String>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Read access --

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn status(&self) -> OpState {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -- Async operations --

    /// Replace the cached list wholesale with the server's response.
    /// A non-array payload has already been normalized to an empty list by
    /// the gateway, so an empty result still counts as a success.
    pub async fn fetch_all(&mut self, gateway: &impl Gateway) -> Result<&[Project]> {
        self.begin();
        match gateway.fetch_projects().await {
            Ok(projects) => {
                debug!(count = projects.len(), "project list replaced");
                self.projects = projects;
                self.status = OpState::Succeeded;
                Ok(&self.projects)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Create a project on the server and prepend the returned record.
    /// There is no optimistic insert: nothing changes until the server
    /// confirms.
    pub async fn create(&mut self, gateway: &impl Gateway, draft: &ProjectDraft) -> Result<&Project> {
        self.begin();
        match gateway.create_project(draft).await {
            Ok(project) => {
                self.status = OpState::Succeeded;
                self.projects.insert(0, project);
                Ok(&self.projects[0])
            }
            Err(e) => self.fail(e),
        }
    }

    /// Patch a project on the server, then merge the submitted fields into
    /// the matching list element and, independently, into the current slot
    /// if it has the same identity. A missing list element (list not yet
    /// fetched) is not an error; only the copies that exist are touched.
    /// Returns the server's updated record.
    pub async fn update(
        &mut self,
        gateway: &impl Gateway,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<Project> {
        self.begin();
        match gateway.update_project(id, patch).await {
            Ok(updated) => {
                self.status = OpState::Succeeded;
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
                    project.apply_patch(patch);
                }
                if let Some(current) = self.current.as_mut().filter(|c| c.id == id) {
                    current.apply_patch(patch);
                }
                Ok(updated)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Delete on the server, drop the matching element, and clear the
    /// current slot if it pointed at the same identity.
    pub async fn delete(&mut self, gateway: &impl Gateway, id: &str) -> Result<()> {
        self.begin();
        match gateway.delete_project(id).await {
            Ok(()) => {
                self.status = OpState::Succeeded;
                self.projects.retain(|p| p.id != id);
                if self.current.as_ref().is_some_and(|c| c.id == id) {
                    self.current = None;
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Mark a project completed. This is the global lifecycle transition:
    /// `status` flips to COMPLETED on both copies. The viewer-specific
    /// `is_completed` badge is server-derived data and is left to fetches.
    pub async fn complete(&mut self, gateway: &impl Gateway, id: &str) -> Result<()> {
        self.begin();
        match gateway.complete_project(id).await {
            Ok(()) => {
                self.status = OpState::Succeeded;
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
                    project.status = ProjectStatus::Completed;
                }
                if let Some(current) = self.current.as_mut().filter(|c| c.id == id) {
                    current.status = ProjectStatus::Completed;
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Load a single project into the current slot without requiring the
    /// list (direct-link navigation before the list has been fetched).
    pub async fn fetch_current(&mut self, gateway: &impl Gateway, id: &str) -> Result<&Project> {
        self.begin();
        match gateway.fetch_project(id).await {
            Ok(project) => {
                self.status = OpState::Succeeded;
                Ok(self.current.insert(project))
            }
            Err(e) => self.fail(e),
        }
    }

    // -- Synchronous operations --

    /// Set the current slot from an already-known project. No fetch.
    pub fn select_current(&mut self, project: Project) {
        self.current = Some(project);
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Back to initial values. Called on logout so no cached view or
    /// per-viewer badge survives into the next session on this device.
    pub fn reset(&mut self) {
        self.projects.clear();
        self.current = None;
        self.status = OpState::Idle;
        self.error = None;
    }

    // -- Helpers --

    fn begin(&mut self) {
        self.status = OpState::Loading;
        self.error = None;
    }

    fn fail<T>(&mut self, err: HubError) -> Result<T> {
        self.status = OpState::Failed;
        self.error = Some(err.to_string());
        Err(err)
    }
}
