use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("{0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session vault error: {0}")]
    Vault(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HubError {
    /// Returns `true` when the error looks like a credential problem
    /// (expired or missing token, rejected login). Callers can use this to
    /// prompt for a fresh `login` instead of surfacing a raw failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Api(msg) => is_auth_message(msg),
            Self::Http(e) => e
                .status()
                .is_some_and(|s| s.as_u16() == 401 || s.as_u16() == 403),
            _ => false,
        }
    }
}

fn is_auth_message(msg: &str) -> bool {
    let msg_lower = msg.to_lowercase();
    let patterns = [
        "401",
        "403",
        "unauthorized",
        "not authenticated",
        "forbidden",
        "invalid email or password",
        "token expired",
    ];
    patterns.iter().any(|p| msg_lower.contains(p))
}

pub type Result<T> = std::result::Result<T, HubError>;
