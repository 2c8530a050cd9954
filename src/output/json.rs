//! JSON output formatting for focusflow.
//!
//! This module provides functions for formatting sessions and statistics as JSON.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusError;
use crate::features::focus::{FocusPreset, FocusSession, HistoryFilter};
use crate::features::stats::{daily_goal_progress, FocusStats, Insight};

/// Format a history listing as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_history_json(
    sessions: &[&FocusSession],
    filter: HistoryFilter,
) -> Result<String, FocusError> {
    let total_seconds: f64 = sessions.iter().map(|s| s.duration).sum();
    let output = json!({
        "filter": filter,
        "count": sessions.len(),
        "total_seconds": total_seconds,
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format statistics, goal progress and insights as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_stats_json(
    stats: &FocusStats,
    insights: &[Insight],
    goal_minutes: u32,
) -> Result<String, FocusError> {
    let output = json!({
        "stats": stats,
        "goal": {
            "daily_minutes": goal_minutes,
            "progress": daily_goal_progress(stats.today_seconds, goal_minutes),
        },
        "insights": insights
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format presets as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_presets_json(presets: &[FocusPreset]) -> Result<String, FocusError> {
    let items: Vec<_> = presets
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "slug": p.slug(),
                "duration": p.duration,
                "category": p.category,
            })
        })
        .collect();
    let output = json!({
        "count": presets.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(value)?)
}
