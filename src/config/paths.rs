//! Path resolution for focusflow configuration and data files.
//!
//! All focusflow data is stored in `~/.focusflow/` (or `$FOCUSFLOW_HOME`):
//! - `config.yaml` - Main configuration file
//! - `focusflow.db` - SQLite key-value store for session history
//! - `sessions.json` - Session history when the file backend is selected
//! - `focusflow.log` - Log output of the full-screen timer

use std::path::PathBuf;

use crate::error::FocusError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "FOCUSFLOW_HOME";

/// Paths to focusflow configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusflow/`
    pub root: PathBuf,
    /// Config file: `~/.focusflow/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focusflow/focusflow.db`
    pub database: PathBuf,
    /// Session document for the file backend: `~/.focusflow/sessions.json`
    pub sessions_file: PathBuf,
    /// Log file: `~/.focusflow/focusflow.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$FOCUSFLOW_HOME`, falling back to `~/.focusflow`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, FocusError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            FocusError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusflow")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focusflow.db"),
            sessions_file: root.join("sessions.json"),
            log_file: root.join("focusflow.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
