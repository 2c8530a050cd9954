//! Logger setup.
//!
//! Logs go to stderr by default. The full-screen timer owns the terminal, so
//! it passes a file to receive them instead.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::error::FocusError;

/// Level used when neither `--verbose` nor `RUST_LOG` asks for more.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Level for `--verbose`.
#[must_use]
pub const fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        DEFAULT_LEVEL
    }
}

/// Install the global logger. `RUST_LOG` takes precedence over `verbose`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is
/// already installed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), FocusError> {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbose)).parse_default_env();

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    }

    builder
        .try_init()
        .map_err(|e| FocusError::Config(format!("Failed to initialize logging: {e}")))
}
