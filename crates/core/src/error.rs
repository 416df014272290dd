//! Error taxonomy shared across the dashboard crates.

use serde::{Deserialize, Serialize};

/// Classification of failures that reach the UI shell.
///
/// Crate-local error enums (storage, session, API) map into one of these so the
/// shell can decide how to present a failure without knowing where it came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A write to the persistent store failed while logging in.
    PersistenceFailure,

    /// The persisted user-details blob could not be decoded.
    MalformedUserDetails,

    /// The API rejected the credentials or the session token.
    Unauthorized,

    /// The API could not be reached.
    Network,

    /// A different role is already logged in on this device.
    RoleConflict,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PersistenceFailure => "persistence_failure",
            ErrorKind::MalformedUserDetails => "malformed_user_details",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Network => "network",
            ErrorKind::RoleConflict => "role_conflict",
        }
    }

    /// Whether the user can reasonably retry the action that failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::PersistenceFailure | ErrorKind::Network)
    }

    /// Generic, user-facing message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::PersistenceFailure | ErrorKind::Network => {
                "Something went wrong. Please try again."
            }
            ErrorKind::Unauthorized => "Invalid credentials or session expired.",
            ErrorKind::RoleConflict => "Log out before signing in with a different role.",
            // Degrades silently; never shown.
            ErrorKind::MalformedUserDetails => "",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
