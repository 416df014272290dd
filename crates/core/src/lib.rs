//! `collegedesk-core` — data model shared by the dashboard crates.
//!
//! This crate contains **pure data** (no storage, no logging, no transport).

pub mod error;
pub mod fetch;
pub mod role;
pub mod route;
pub mod session;
pub mod token;

pub use error::ErrorKind;
pub use fetch::FetchState;
pub use role::{RoleTag, UnknownRole};
pub use route::Route;
pub use session::{Session, SessionState, UserDetails};
pub use token::{AccessToken, RefreshToken};
