//! Command implementations for focusflow.
//!
//! Each handler takes already-parsed arguments and returns the text to print.

mod config;
mod focus;
mod history;
mod stats;

pub use config::config;
pub use focus::{clear, delete, edit, plan_start, presets, start, StartPlan};
pub use history::history;
pub use stats::stats;

use clap::CommandFactory;
use clap_complete::Shell;
use log::debug;

use crate::cli::args::Cli;
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::features::focus::{FocusEngine, SessionCategory, SessionStore};
use crate::storage::open_backend;

/// Open the configured session store and wrap it in an idle engine.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be opened.
pub fn open_engine(
    config: &Config,
    paths: &Paths,
    category: SessionCategory,
) -> Result<FocusEngine, FocusError> {
    let backend = open_backend(paths, config.storage.backend)?;
    let store = SessionStore::open(backend);
    debug!(
        "Opened {:?} store with {} session(s)",
        config.storage.backend,
        store.len()
    );
    Ok(FocusEngine::with_category(store, category))
}

/// Generate a shell completion script.
///
/// # Errors
///
/// Returns an error if the script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, FocusError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "focusflow", &mut buf);
    String::from_utf8(buf).map_err(|e| FocusError::Parse(format!("UTF-8 error: {e}")))
}
