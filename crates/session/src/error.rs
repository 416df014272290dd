use std::path::PathBuf;

use collegedesk_core::{ErrorKind, RoleTag};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path:?} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// A required key could not be written; nothing was applied.
    #[error("failed to persist session")]
    Persistence(#[from] StorageError),

    #[error("already logged in as {current}; log out before switching to {requested}")]
    RoleSwitch { current: RoleTag, requested: RoleTag },

    #[error("access token is empty")]
    EmptyAccessToken,

    /// The access token could not be removed; the session is still active.
    #[error("failed to clear session")]
    LogoutIncomplete(#[source] StorageError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Persistence(_) | SessionError::LogoutIncomplete(_) => {
                ErrorKind::PersistenceFailure
            }
            SessionError::RoleSwitch { .. } => ErrorKind::RoleConflict,
            SessionError::EmptyAccessToken => ErrorKind::Unauthorized,
        }
    }
}

impl From<SessionError> for ErrorKind {
    fn from(value: SessionError) -> Self {
        value.kind()
    }
}
