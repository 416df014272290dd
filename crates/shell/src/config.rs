//! Shell configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use collegedesk_observability::{LogFormat, UnknownLogFormat};
use collegedesk_session::{FileStore, KeyValueStore, MemoryStore, StorageError};
use thiserror::Error;

pub const STORAGE_VAR: &str = "COLLEGEDESK_STORAGE";
pub const SPLASH_MS_VAR: &str = "COLLEGEDESK_SPLASH_MS";
pub const LOG_FORMAT_VAR: &str = "COLLEGEDESK_LOG_FORMAT";

/// Startup delay that lets the loading animation finish.
pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(800);

/// Where authentication keys are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Nothing survives a restart.
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub storage: StorageBackend,
    pub splash_delay: Duration,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("COLLEGEDESK_SPLASH_MS must be a whole number of milliseconds, got '{value}'")]
    InvalidSplashDelay {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid COLLEGEDESK_LOG_FORMAT")]
    InvalidLogFormat(#[from] UnknownLogFormat),

    #[error("no storage location: {0}")]
    DataDir(String),
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            splash_delay: DEFAULT_SPLASH_DELAY,
            log_format: LogFormat::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the environment in production).
    ///
    /// - `COLLEGEDESK_STORAGE`: `memory`, or a file path. Defaults to the
    ///   per-user data directory.
    /// - `COLLEGEDESK_SPLASH_MS`: startup delay; `0` disables it.
    /// - `COLLEGEDESK_LOG_FORMAT`: `json` or `pretty`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup(STORAGE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(v) if v.trim().eq_ignore_ascii_case("memory") => StorageBackend::Memory,
            Some(v) => StorageBackend::File(PathBuf::from(v.trim())),
            None => {
                let path = FileStore::default_path()
                    .map_err(|err| ConfigError::DataDir(format!("{err:#}")))?;
                StorageBackend::File(path)
            }
        };

        let splash_delay = match lookup(SPLASH_MS_VAR) {
            Some(value) => {
                let ms = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidSplashDelay { value, source })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_SPLASH_DELAY,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            storage,
            splash_delay,
            log_format,
        })
    }

    /// Open the configured store. A corrupt session file is reset rather
    /// than blocking startup.
    pub fn open_store(&self) -> Result<ConfiguredStore, StorageError> {
        match &self.storage {
            StorageBackend::Memory => Ok(ConfiguredStore::Memory(MemoryStore::new())),
            StorageBackend::File(path) => {
                Ok(ConfiguredStore::File(FileStore::open_or_reset(path)?))
            }
        }
    }
}

/// Store selected at runtime by [`ShellConfig::storage`].
#[derive(Debug)]
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl KeyValueStore for ConfiguredStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            ConfiguredStore::Memory(s) => s.get(key),
            ConfiguredStore::File(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            ConfiguredStore::Memory(s) => s.set(key, value),
            ConfiguredStore::File(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            ConfiguredStore::Memory(s) => s.remove(key),
            ConfiguredStore::File(s) => s.remove(key),
        }
    }
}
