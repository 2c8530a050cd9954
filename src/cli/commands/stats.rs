//! Statistics command implementation.

use chrono::{DateTime, Local};

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::FocusError;
use crate::features::focus::FocusEngine;
use crate::features::stats::generate_insights;
use crate::output::format_stats;

/// Show totals, streak, category breakdown, goal progress and insights.
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn stats(
    engine: &FocusEngine,
    config: &Config,
    now: DateTime<Local>,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let stats = engine.stats(now);
    let insights = generate_insights(&stats);
    format_stats(&stats, &insights, config.goals.daily_goal_minutes, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::engine_with;
    use crate::features::focus::{FocusSession, SessionCategory};

    #[test]
    fn test_stats_json_empty() {
        let engine = engine_with(&[]);
        let output = stats(&engine, &Config::default(), Local::now(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["stats"]["session_count"], 0);
        assert_eq!(value["stats"]["average_seconds"], 0.0);
        assert_eq!(value["goal"]["daily_minutes"], 120);
    }

    #[test]
    fn test_stats_json_goal_progress() {
        let engine = engine_with(&[
            FocusSession::new(1800.0, SessionCategory::Work, None),
            FocusSession::new(1800.0, SessionCategory::Coding, None),
        ]);
        let mut config = Config::default();
        config.set_daily_goal(120).unwrap();

        let output = stats(&engine, &config, Local::now(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["stats"]["today_seconds"], 3600.0);
        assert_eq!(value["goal"]["progress"], 0.5);
        assert_eq!(value["stats"]["streak_days"], 1);
    }

    #[test]
    fn test_stats_pretty_lists_categories() {
        let engine = engine_with(&[FocusSession::new(600.0, SessionCategory::Reading, None)]);
        let output = stats(&engine, &Config::default(), Local::now(), OutputFormat::Pretty).unwrap();

        assert!(output.contains("Reading"));
        assert!(output.contains("Insights"));
    }
}
