use tracing::{debug, warn};

use super::{OpState, ProjectStore};
use crate::error::Result;
use crate::gateway::{AuthToken, Gateway};
use crate::model::{Credentials, SignupInput, User};
use crate::vault::{PersistedSession, SessionVault};

/// Single source of truth for "who is logged in".
///
/// Durable persistence goes through the vault, and the bearer token is
/// shared with the gateway through the [`AuthToken`] cell, so authenticated
/// requests pick up credentials without the store branching on the
/// transport. Invariant: `is_authenticated()` is true exactly when a user
/// is present.
pub struct SessionStore {
    user: Option<User>,
    access_token: Option<String>,
    status: OpState,
    error: Option<String>,
    vault: Box<dyn SessionVault>,
    token: AuthToken,
}

impl SessionStore {
    pub fn new(vault: Box<dyn SessionVault>, token: AuthToken) -> Self {
        Self {
            user: None,
            access_token: None,
            status: OpState::Idle,
            error: None,
            vault,
            token,
        }
    }

    // -- Read access --

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn status(&self) -> OpState {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -- Operations --

    /// Initialize from the persisted record, once, at startup. A missing or
    /// malformed record means an anonymous session; this never fails.
    pub fn restore(&mut self) {
        match self.vault.load() {
            Ok(Some(record)) => {
                debug!("session restored for {}", record.user.email);
                self.token.set(record.access_token.clone());
                self.access_token = record.access_token;
                self.user = Some(record.user);
            }
            Ok(None) => {}
            Err(e) => warn!("session restore failed, starting anonymous: {e}"),
        }
    }

    /// Authenticate against the server. On success the session is replaced
    /// and persisted. On failure only the status fields change: a rejected
    /// re-login must not tear down an existing session.
    pub async fn login(
        &mut self,
        gateway: &impl Gateway,
        credentials: &Credentials,
    ) -> Result<User> {
        self.status = OpState::Loading;
        self.error = None;
        match gateway.login(credentials).await {
            Ok(payload) => {
                self.status = OpState::Succeeded;
                self.token.set(Some(payload.access_token.clone()));
                self.access_token = Some(payload.access_token.clone());
                self.user = Some(payload.user.clone());

                let record = PersistedSession {
                    user: payload.user.clone(),
                    access_token: Some(payload.access_token),
                };
                if let Err(e) = self.vault.store(&record) {
                    warn!("failed to persist session, it will not survive a restart: {e}");
                }
                Ok(payload.user)
            }
            Err(e) => {
                self.status = OpState::Failed;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Create an account. Signup never authenticates: the created user is
    /// returned to the caller and an explicit [`login`](Self::login)
    /// follows. Session identity and the vault are untouched either way.
    pub async fn signup(&mut self, gateway: &impl Gateway, input: &SignupInput) -> Result<User> {
        self.status = OpState::Loading;
        self.error = None;
        match gateway.signup(input).await {
            Ok(user) => {
                self.status = OpState::Succeeded;
                Ok(user)
            }
            Err(e) => {
                self.status = OpState::Failed;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Tear the session down: clear every field, remove the durable record,
    /// drop the shared token, and reset the project collection so no cached
    /// view or per-viewer flag leaks into the next session on this device.
    pub fn logout(&mut self, projects: &mut ProjectStore) -> Result<()> {
        self.user = None;
        self.access_token = None;
        self.status = OpState::Idle;
        self.error = None;
        self.token.set(None);
        projects.reset();
        self.vault.clear()
    }
}
