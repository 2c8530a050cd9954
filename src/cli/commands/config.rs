//! Configuration command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths, StorageBackend};
use crate::error::FocusError;
use crate::output::to_json;

/// Execute config subcommands against the file at `paths.config_file`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the new value is
/// invalid, or the file cannot be written.
pub fn config(
    cmd: ConfigCommands,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let mut config = Config::load_from_path(&paths.config_file)?;

    let message = match cmd {
        ConfigCommands::Show => {
            return match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => serde_yaml::to_string(&config)
                    .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}"))),
            };
        }
        ConfigCommands::Path => {
            return match format {
                OutputFormat::Json => to_json(&paths.config_file),
                OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
            };
        }
        ConfigCommands::SetGoal { minutes } => {
            config.set_daily_goal(minutes)?;
            format!("Daily goal set to {minutes} minutes")
        }
        ConfigCommands::Notifications { state } => {
            config.notifications.enabled = state.into();
            format!("Notifications {}", on_off(config.notifications.enabled))
        }
        ConfigCommands::Sound { state } => {
            config.notifications.sound = state.into();
            format!("Sound {}", on_off(config.notifications.sound))
        }
        ConfigCommands::Backend { backend } => {
            config.storage.backend = backend;
            let name = match backend {
                StorageBackend::Sqlite => "sqlite",
                StorageBackend::File => "file",
            };
            format!("Storage backend set to {name}")
        }
    };

    paths.ensure_dirs()?;
    config.save_to_path(&paths.config_file)?;

    match format {
        OutputFormat::Json => to_json(&config),
        OutputFormat::Pretty => Ok(format!("{} {message}", "✓".green())),
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
