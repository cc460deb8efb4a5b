//! Runtime configuration for hosts embedding the core.
//!
//! # Invariants
//! - `CoreConfig::default()` needs no filesystem access: in-memory database,
//!   no file logging.
//! - Paths are used as given; `init_logging` enforces absolute log dirs.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level};
use rusqlite::Connection;
use std::path::PathBuf;

/// Storage and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// SQLite database file; `None` keeps data in memory only.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Checks settings that can be verified without side effects.
    pub fn validate(&self) -> Result<(), String> {
        normalize_level(&self.log_level)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    /// Starts file logging when `log_dir` is set; no-op otherwise.
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(dir) = &self.log_dir else {
            return Ok(());
        };
        let dir = dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", dir.display()))?;
        init_logging(&self.log_level, dir)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
