use serde::{Deserialize, Serialize};

/// A marketplace account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login payload: the bearer token plus the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub user: User,
}

/// Signup response wrapper. Only `user` is consumed; signup does not
/// authenticate and any token the server may include is deliberately
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupPayload {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}
