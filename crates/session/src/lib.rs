//! `collegedesk-session`: client-side authentication session lifecycle.
//!
//! [`SessionStore`] is the only writer of authentication keys in the
//! persistent key-value store; everything else reads [`Session`] snapshots.
//!
//! [`Session`]: collegedesk_core::Session

pub mod error;
pub mod storage;
pub mod store;

pub use error::{SessionError, StorageError};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    ACCESS_TOKEN_KEY, AUTH_KEYS, REFRESH_TOKEN_KEY, ROLE_KEY, SessionStore, USER_DETAILS_KEY,
};
