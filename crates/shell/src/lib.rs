//! Dashboard application controller (`collegedesk-shell`).
//!
//! Wires the session store, the access gate and the role resolver together
//! the way the UI consumes them. Rendering lives elsewhere; this crate only
//! produces what a view needs (target route, palette, menu, login state).

pub mod api;
pub mod config;
pub mod shell;

pub use api::{ApiClient, ApiError, Credentials, LoginResponse};
pub use config::{ConfigError, ConfiguredStore, ShellConfig, StorageBackend};
pub use shell::{Navigation, Shell, ShellView, bootstrap};
