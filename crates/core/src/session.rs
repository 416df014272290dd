//! Authentication session model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{AccessToken, RefreshToken, RoleTag};

/// Decoded profile data for the logged-in user (name, department, ...).
///
/// The dashboard treats it as an opaque JSON object used only for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDetails(Map<String, Value>);

impl UserDetails {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Decode a persisted details blob. Anything but a JSON object is rejected.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Coarse lifecycle state of a [`Session`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SessionState {
    Anonymous,
    Authenticated { role: RoleTag },
}

/// Current authentication state.
///
/// # Invariants
/// - Authenticated if and only if an access token is present.
/// - A role is present if and only if the session is authenticated.
///
/// Both hold by construction: token and role live together in one optional
/// block, so there is no way to build a half-authenticated session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    auth: Option<Authenticated>,
}

#[derive(Debug, Clone, PartialEq)]
struct Authenticated {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    role: RoleTag,
    details: Option<UserDetails>,
}

impl Session {
    /// The empty session (nobody logged in).
    pub fn anonymous() -> Self {
        Self { auth: None }
    }

    pub fn authenticated(
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        role: RoleTag,
        details: Option<UserDetails>,
    ) -> Self {
        Self {
            auth: Some(Authenticated {
                access_token,
                refresh_token,
                role,
                details,
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.auth.as_ref().map(|a| &a.access_token)
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.auth.as_ref().and_then(|a| a.refresh_token.as_ref())
    }

    pub fn role(&self) -> Option<RoleTag> {
        self.auth.as_ref().map(|a| a.role)
    }

    pub fn user_details(&self) -> Option<&UserDetails> {
        self.auth.as_ref().and_then(|a| a.details.as_ref())
    }

    pub fn state(&self) -> SessionState {
        match &self.auth {
            None => SessionState::Anonymous,
            Some(a) => SessionState::Authenticated { role: a.role },
        }
    }
}
