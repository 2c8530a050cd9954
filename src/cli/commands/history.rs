//! History command implementation.

use chrono::{DateTime, Local};

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::error::FocusError;
use crate::features::focus::{FocusEngine, HistoryFilter};
use crate::output::format_history;

/// Show recorded sessions, newest first.
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn history(
    engine: &FocusEngine,
    args: &HistoryArgs,
    now: DateTime<Local>,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let filter = HistoryFilter::from(args.filter);
    let mut sessions = filter.apply(engine.sessions(), now);
    if let Some(limit) = args.limit {
        sessions.truncate(limit);
    }

    format_history(&sessions, filter, now, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::HistoryFilterArg;
    use crate::cli::commands::test_support::engine_with;
    use crate::features::focus::{FocusSession, SessionCategory};
    use chrono::{Duration, Utc};

    fn args(filter: HistoryFilterArg, limit: Option<usize>) -> HistoryArgs {
        HistoryArgs { filter, limit }
    }

    fn sessions() -> Vec<FocusSession> {
        let now = Utc::now();
        vec![
            FocusSession::with_date(600.0, SessionCategory::Work, None, now),
            FocusSession::with_date(900.0, SessionCategory::Study, None, now - Duration::days(3)),
            FocusSession::with_date(300.0, SessionCategory::Other, None, now - Duration::days(30)),
        ]
    }

    fn count(output: &str) -> u64 {
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        value["count"].as_u64().unwrap()
    }

    #[test]
    fn test_history_all() {
        let engine = engine_with(&sessions());
        let output = history(&engine, &args(HistoryFilterArg::All, None), Local::now(), OutputFormat::Json).unwrap();
        assert_eq!(count(&output), 3);
    }

    #[test]
    fn test_history_week() {
        let engine = engine_with(&sessions());
        let output = history(&engine, &args(HistoryFilterArg::Week, None), Local::now(), OutputFormat::Json).unwrap();
        assert_eq!(count(&output), 2);
    }

    #[test]
    fn test_history_today() {
        let engine = engine_with(&sessions());
        let output = history(&engine, &args(HistoryFilterArg::Today, None), Local::now(), OutputFormat::Json).unwrap();
        assert_eq!(count(&output), 1);
    }

    #[test]
    fn test_history_limit_keeps_newest() {
        let all = sessions();
        let engine = engine_with(&all);
        let output = history(&engine, &args(HistoryFilterArg::All, Some(1)), Local::now(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["id"], all[0].id.to_string());
    }

    #[test]
    fn test_history_pretty_empty() {
        let engine = engine_with(&[]);
        let output = history(&engine, &args(HistoryFilterArg::All, None), Local::now(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("No sessions yet"));
    }
}
