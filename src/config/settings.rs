//! Configuration settings for focusflow.
//!
//! Settings are loaded from `~/.focusflow/config.yaml`. The timer engine never
//! reads them; the command line and full-screen timer do.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FocusError;
use crate::features::focus::SessionCategory;

/// Smallest daily goal in minutes.
pub const DAILY_GOAL_MIN: u32 = 30;
/// Largest daily goal in minutes.
pub const DAILY_GOAL_MAX: u32 = 480;
/// Daily goal granularity in minutes.
pub const DAILY_GOAL_STEP: u32 = 15;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Goal settings.
    pub goals: GoalConfig,
    /// Notification settings.
    pub notifications: NotificationConfig,
    /// Timer defaults.
    pub timer: TimerConfig,
    /// Storage settings.
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Goal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Daily focus goal in minutes (30-480, multiples of 15).
    #[serde(default = "default_daily_goal")]
    pub daily_goal_minutes: u32,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Announce completed sessions.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell on completion.
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Category selected when the timer opens.
    #[serde(default = "default_category")]
    pub default_category: SessionCategory,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Where session history is kept.
    pub backend: StorageBackend,
}

/// Session history backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite key-value table.
    #[default]
    Sqlite,
    /// Plain JSON file.
    File,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_daily_goal() -> u32 {
    120
}

const fn default_true() -> bool {
    true
}

const fn default_category() -> SessionCategory {
    SessionCategory::Work
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_goal_minutes: default_daily_goal(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sound: default_true(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
        }
    }
}

/// Check a daily goal against the allowed range and step.
///
/// # Errors
///
/// Returns `FocusError::InvalidInput` if the goal is out of range or not a
/// multiple of the step above the minimum.
pub fn validate_daily_goal(minutes: u32) -> Result<u32, FocusError> {
    if !(DAILY_GOAL_MIN..=DAILY_GOAL_MAX).contains(&minutes) {
        return Err(FocusError::InvalidInput(format!(
            "Daily goal must be between {DAILY_GOAL_MIN} and {DAILY_GOAL_MAX} minutes, got {minutes}"
        )));
    }
    if (minutes - DAILY_GOAL_MIN) % DAILY_GOAL_STEP != 0 {
        return Err(FocusError::InvalidInput(format!(
            "Daily goal must be a multiple of {DAILY_GOAL_STEP} minutes, got {minutes}"
        )));
    }
    Ok(minutes)
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, FocusError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds an invalid daily goal.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        validate_daily_goal(config.goals.daily_goal_minutes)
            .map_err(|e| FocusError::Config(format!("{}: {e}", path.display())))?;

        Ok(config)
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), FocusError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Set the daily goal after validating it.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidInput` for an out-of-range goal.
    pub fn set_daily_goal(&mut self, minutes: u32) -> Result<(), FocusError> {
        self.goals.daily_goal_minutes = validate_daily_goal(minutes)?;
        Ok(())
    }
}
