use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};
use crate::model::User;

/// The durable session record, JSON-shaped `{ user, accessToken }`, stored
/// under a fixed name and read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: User,
    #[serde(
        default,
        rename = "accessToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
}

/// Durable storage for the session record. The session store is the only
/// component allowed to read or write through this interface, which keeps
/// persistence effects auditable and lets tests substitute [`MemoryVault`].
pub trait SessionVault {
    fn load(&self) -> Result<Option<PersistedSession>>;
    fn store(&mut self, session: &PersistedSession) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// File-backed vault. Default location:
/// `~/.config/freelancehub/session.json`.
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionVault for FileVault {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(HubError::Vault(format!(
                    "failed to read session record: {e}"
                )))
            }
        };

        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt record means an anonymous start, not a crash.
                tracing::warn!("discarding malformed session record: {e}");
                Ok(None)
            }
        }
    }

    fn store(&mut self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HubError::Vault(format!("failed to create vault dir: {e}")))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
            .map_err(|e| HubError::Vault(format!("failed to write session record: {e}")))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HubError::Vault(format!(
                "failed to remove session record: {e}"
            ))),
        }
    }
}

/// Default session record path: `~/.config/freelancehub/session.json`.
pub fn default_session_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("freelancehub").join("session.json"))
        .ok_or_else(|| HubError::Vault("cannot determine config directory".to_string()))
}

/// In-memory vault (useful for tests).
#[derive(Debug, Default)]
pub struct MemoryVault {
    record: Option<PersistedSession>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PersistedSession) -> Self {
        Self {
            record: Some(record),
        }
    }
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.record.clone())
    }

    fn store(&mut self, session: &PersistedSession) -> Result<()> {
        self.record = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.record = None;
        Ok(())
    }
}
