//! Configuration management for focusflow.
//!
//! This module handles loading and saving configuration from `~/.focusflow/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    validate_daily_goal, ColorSetting, Config, GeneralConfig, GoalConfig, NotificationConfig,
    StorageBackend, StorageConfig, TimerConfig, DAILY_GOAL_MAX, DAILY_GOAL_MIN, DAILY_GOAL_STEP,
};
