//! Output formatting for focusflow.
//!
//! This module provides formatters for displaying sessions and statistics in various formats.

mod json;
mod pretty;

use chrono::{DateTime, Local};

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::features::focus::{group_by_day, FocusPreset, FocusSession, HistoryFilter};
use crate::features::stats::{FocusStats, Insight};

pub use json::*;
pub use pretty::*;

/// Format a history listing based on output format
///
/// Pretty output groups sessions by day; JSON keeps the flat, newest-first list.
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_history(
    sessions: &[&FocusSession],
    filter: HistoryFilter,
    now: DateTime<Local>,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(&group_by_day(sessions, now), filter)),
        OutputFormat::Json => format_history_json(sessions, filter),
    }
}

/// Format a single session based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_session(session: &FocusSession, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session)),
        OutputFormat::Json => to_json(session),
    }
}

/// Format statistics based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_stats(
    stats: &FocusStats,
    insights: &[Insight],
    goal_minutes: u32,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats, insights, goal_minutes)),
        OutputFormat::Json => format_stats_json(stats, insights, goal_minutes),
    }
}

/// Format presets based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_presets(presets: &[FocusPreset], format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_presets_pretty(presets)),
        OutputFormat::Json => format_presets_json(presets),
    }
}
