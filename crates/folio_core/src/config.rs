//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_dir`, when set, is absolute (checked again by `init_logging`).

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FOLIO_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FOLIO_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FOLIO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "folio_cms.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Storage and logging settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CmsConfig {
    /// Reads `FOLIO_DB_PATH`, `FOLIO_LOG_LEVEL` and `FOLIO_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(db_path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(log_dir) = read(LOG_DIR_ENV) {
            let log_dir = PathBuf::from(log_dir);
            if !log_dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(log_dir));
            }
            config.log_dir = Some(log_dir);
        }
        Ok(config)
    }
}
