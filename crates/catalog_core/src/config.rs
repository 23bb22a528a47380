//! Runtime configuration for catalog front ends.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file in the working directory:
//!
//! | variable            | meaning                               | default         |
//! |---------------------|---------------------------------------|-----------------|
//! | `CATALOG_DB_PATH`   | SQLite database file                  | in-memory store |
//! | `CATALOG_LOG_LEVEL` | `trace\|debug\|info\|warn\|error`     | build mode      |
//! | `CATALOG_LOG_DIR`   | absolute directory for rolling logs   | logging off     |

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CATALOG_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CATALOG_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CATALOG_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "invalid logging configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// `None` keeps the store in memory for the lifetime of the process.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Loads `.env` (when present) and reads settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_VAR).map(PathBuf::from);
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(LoggingError::RelativeDirectory(dir.clone()).into());
            }
        }

        Ok(Self {
            db_path: read(DB_PATH_VAR).map(PathBuf::from),
            log_level,
            log_dir,
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging is active afterwards.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        match &self.log_dir {
            Some(dir) => {
                init_logging(self.log_level, dir)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Opens the configured store with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ConfigError, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn reads_and_normalizes_values() {
        let config = CatalogConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/tmp/catalog.sqlite3"),
            (LOG_LEVEL_VAR, " WARNING "),
            (LOG_DIR_VAR, "/tmp/catalog-logs"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/catalog.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/catalog-logs")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            CatalogConfig::from_lookup(lookup(&[(DB_PATH_VAR, "  "), (LOG_DIR_VAR, "")])).unwrap();
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let err = CatalogConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "verbose")])).unwrap_err();
        assert!(matches!(err, ConfigError::Logging(_)));

        let err = CatalogConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "logs")])).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn default_config_opens_in_memory_store() {
        let conn = CatalogConfig::default().open_db().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
