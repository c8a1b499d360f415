use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};

/// Valid credential transports for the API gateway.
pub const VALID_AUTH_TRANSPORTS: &[&str] = &["bearer", "cookie"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HubConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, enforced by the HTTP client. The stores
    /// themselves never time anything out.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Credential transport: "bearer" attaches the stored access token per
    /// request; "cookie" relies on the server-managed session cookie.
    #[serde(default = "default_auth_transport")]
    pub auth: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            auth: default_auth_transport(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Custom path for the session record. Defaults to
    /// `~/.config/freelancehub/session.json`.
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionConfig {
    pub fn vault_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => crate::vault::default_session_path(),
        }
    }
}

impl HubConfig {
    /// Load configuration with a two-layer TOML merge:
    /// 1. `~/.config/freelancehub/config.toml` (global)
    /// 2. `.freelancehub/config.toml` (project)
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".freelancehub").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| HubError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| HubError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Validate config values, fixing what can be fixed and returning
    /// warnings. This is lenient: a bad value falls back to its default
    /// instead of rejecting the whole config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !VALID_AUTH_TRANSPORTS.contains(&self.api.auth.to_lowercase().as_str()) {
            warnings.push(format!(
                "unknown auth transport '{}', valid: {}; falling back to '{}'",
                self.api.auth,
                VALID_AUTH_TRANSPORTS.join(", "),
                default_auth_transport(),
            ));
            self.api.auth = default_auth_transport();
        }

        if self.api.timeout_secs == 0 {
            warnings.push(format!(
                "timeout_secs must be positive; falling back to {}",
                default_timeout_secs()
            ));
            self.api.timeout_secs = default_timeout_secs();
        }

        if self.api.base_url.trim().is_empty() {
            warnings.push(format!(
                "empty base_url; falling back to {}",
                default_base_url()
            ));
            self.api.base_url = default_base_url();
        }

        for warning in &warnings {
            tracing::warn!("config: {warning}");
        }
        warnings
    }

    /// Write this config to the global path, creating the parent directory
    /// if needed. Returns the path written.
    pub fn save_global(&self) -> Result<PathBuf> {
        let path = global_config_path()
            .ok_or_else(|| HubError::Config("cannot determine config directory".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HubError::Config(format!("failed to create config dir: {e}")))?;
        }
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| HubError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(&path, toml_str)
            .map_err(|e| HubError::Config(format!("failed to write config: {e}")))?;
        Ok(path)
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("freelancehub").join("config.toml"))
}

// -- Defaults --

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_auth_transport() -> String {
    "bearer".to_string()
}
