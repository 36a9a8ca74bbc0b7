use serde::{Deserialize, Serialize};

use crate::auth::repo_types::PublicUser;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `{ok: true, user}`; `user` is null on `/me` without a session.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub user: Option<PublicUser>,
}

impl UserResponse {
    pub fn new(user: Option<PublicUser>) -> Self {
        Self { ok: true, user }
    }
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Returns both fields only when neither is missing or empty.
pub(crate) fn required_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Option<(String, String)> {
    let email = email.filter(|e| !e.is_empty())?;
    let password = password.filter(|p| !p.is_empty())?;
    Some((email, password))
}
