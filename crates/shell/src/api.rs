//! Boundary to the dashboard's REST API client.
//!
//! The HTTP implementation is not part of this workspace; the shell only needs
//! the login exchange, which is the sole source of session tokens.

use std::future::Future;

use collegedesk_core::{AccessToken, ErrorKind, RefreshToken, RoleTag, UserDetails};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Login form input.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tokens (and optional profile) returned by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default)]
    pub details: Option<UserDetails>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The API rejected the bearer token (expired or revoked).
    #[error("unauthorized")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(String),
}

impl From<ApiError> for ErrorKind {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::InvalidCredentials | ApiError::Unauthorized => ErrorKind::Unauthorized,
            ApiError::Network(_) => ErrorKind::Network,
        }
    }
}

/// Login endpoint of the REST API. Each role logs in through its own variant.
pub trait ApiClient {
    fn login(
        &self,
        credentials: &Credentials,
        role: RoleTag,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;
}
