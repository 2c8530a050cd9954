//! Focus session commands.
//!
//! Handles the timer and the correction path for recorded sessions.

use colored::Colorize;
use log::info;

use crate::cli::args::{EditArgs, OutputFormat, StartArgs};
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::features::focus::{
    format_short, parse_duration, FocusEngine, FocusPreset, FocusSession, SessionCategory,
};
use crate::output::{format_presets, format_session, to_json};

use super::open_engine;

/// What the timer should run with, resolved from flags and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPlan {
    /// Target in seconds; `None` runs as a stopwatch
    pub target: Option<u64>,
    /// Category preselected on the timer
    pub category: SessionCategory,
    /// Note staged for the recorded session
    pub note: Option<String>,
}

/// Resolve `--target`, `--preset`, `--category` and `--note`.
///
/// An explicit category wins over the preset's, which wins over the
/// configured default.
///
/// # Errors
///
/// Returns an error for an unknown preset or category, or an unparseable target.
pub fn plan_start(args: &StartArgs, config: &Config) -> Result<StartPlan, FocusError> {
    let preset = args.preset.as_deref().map(FocusPreset::find).transpose()?;

    let target = match (&args.target, preset) {
        (Some(raw), _) => Some(parse_duration(raw).ok_or_else(|| {
            FocusError::InvalidInput(format!(
                "Invalid target duration: {raw}. Use e.g. 25, 25m, 1h30m or 90s"
            ))
        })?),
        (None, Some(p)) => Some(p.duration),
        (None, None) => None,
    };

    let category = match (&args.category, preset) {
        (Some(raw), _) => SessionCategory::parse(raw)?,
        (None, Some(p)) => p.category,
        (None, None) => config.timer.default_category,
    };

    Ok(StartPlan {
        target,
        category,
        note: args.note.clone(),
    })
}

/// Run the full-screen timer and report what was recorded.
///
/// # Errors
///
/// Returns an error if arguments are invalid, storage cannot be opened, or
/// the terminal cannot be driven.
pub fn start(
    args: &StartArgs,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let plan = plan_start(args, config)?;
    let mut engine = open_engine(config, paths, plan.category)?;
    if let Some(note) = &plan.note {
        engine.set_note(note.as_str());
    }

    info!(
        "Opening timer: target {:?}, category {}",
        plan.target, plan.category
    );
    let recorded = crate::tui::run(engine, plan.target, &config.notifications)?;

    match format {
        OutputFormat::Json => to_json(&recorded),
        OutputFormat::Pretty => Ok(format_recorded(&recorded)),
    }
}

fn format_recorded(recorded: &[FocusSession]) -> String {
    if recorded.is_empty() {
        return "No session recorded.".dimmed().to_string();
    }

    let total: f64 = recorded.iter().map(|s| s.duration).sum();
    let mut output = vec![format!(
        "✅ Recorded {} session(s), {} total",
        recorded.len(),
        format_short(total)
    )
    .green()
    .to_string()];

    for session in recorded {
        output.push(format!(
            "   {} {} {}  {}",
            session.category.glyph(),
            session.category.label(),
            session.formatted_duration(),
            session.short_id().dimmed()
        ));
    }

    output.join("\n")
}

/// Correct the category or note of a recorded session.
///
/// # Errors
///
/// Returns an error if the id does not resolve, nothing would change, or the
/// write fails.
pub fn edit(
    engine: &mut FocusEngine,
    args: &EditArgs,
    format: OutputFormat,
) -> Result<String, FocusError> {
    if args.category.is_none() && args.note.is_none() && !args.clear_note {
        return Err(FocusError::InvalidInput(
            "Nothing to change. Pass --category, --note or --clear-note".to_string(),
        ));
    }

    let category = args.category.as_deref().map(SessionCategory::parse).transpose()?;
    let id = engine.store().find_by_prefix(&args.id)?.id;

    let note = if args.clear_note {
        Some(None)
    } else {
        args.note.clone().map(Some)
    };
    engine.amend_session(id, category, note)?;

    let session = engine
        .store()
        .find(id)
        .ok_or_else(|| FocusError::NotFound(format!("No session with id {id}")))?;
    format_session(session, format)
}

/// Delete one recorded session.
///
/// # Errors
///
/// Returns an error if the id does not resolve or the write fails.
pub fn delete(
    engine: &mut FocusEngine,
    id: &str,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let session = engine.store().find_by_prefix(id)?.clone();
    engine.delete_session(session.id)?;

    match format {
        OutputFormat::Json => to_json(&session),
        OutputFormat::Pretty => Ok(format!(
            "🗑️  Deleted {} {} session ({})",
            session.category.glyph(),
            session.category.label(),
            session.short_formatted_duration()
        )),
    }
}

/// Delete every recorded session.
///
/// # Errors
///
/// Returns an error without `--force`, or if the write fails.
pub fn clear(
    engine: &mut FocusEngine,
    force: bool,
    format: OutputFormat,
) -> Result<String, FocusError> {
    if !force {
        return Err(FocusError::InvalidInput(
            "This will delete all focus session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let count = engine.sessions().len();
    engine.clear_sessions()?;

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "deleted": count })),
        OutputFormat::Pretty => Ok(format!("Focus session history cleared ({count} deleted).")),
    }
}

/// List the built-in presets.
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn presets(format: OutputFormat) -> Result<String, FocusError> {
    format_presets(&FocusPreset::DEFAULTS, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::engine_with;
    use crate::features::focus::SessionStore;
    use crate::storage::MockBlobStore;

    fn start_args(target: Option<&str>, preset: Option<&str>, category: Option<&str>) -> StartArgs {
        StartArgs {
            target: target.map(str::to_string),
            preset: preset.map(str::to_string),
            category: category.map(str::to_string),
            note: None,
        }
    }

    fn edit_args(id: &str, category: Option<&str>, note: Option<&str>, clear_note: bool) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            category: category.map(str::to_string),
            note: note.map(str::to_string),
            clear_note,
        }
    }

    #[test]
    fn test_plan_start_defaults_to_stopwatch() {
        let plan = plan_start(&StartArgs::default(), &Config::default()).unwrap();

        assert_eq!(plan.target, None);
        assert_eq!(plan.category, SessionCategory::Work);
        assert_eq!(plan.note, None);
    }

    #[test]
    fn test_plan_start_uses_configured_category() {
        let mut config = Config::default();
        config.timer.default_category = SessionCategory::Meditation;

        let plan = plan_start(&StartArgs::default(), &config).unwrap();

        assert_eq!(plan.category, SessionCategory::Meditation);
    }

    #[test]
    fn test_plan_start_target() {
        let plan = plan_start(&start_args(Some("1h30m"), None, None), &Config::default()).unwrap();
        assert_eq!(plan.target, Some(5400));

        let plan = plan_start(&start_args(Some("25"), None, None), &Config::default()).unwrap();
        assert_eq!(plan.target, Some(1500));
    }

    #[test]
    fn test_plan_start_invalid_target() {
        let result = plan_start(&start_args(Some("soon"), None, None), &Config::default());
        assert!(matches!(result, Err(FocusError::InvalidInput(_))));
    }

    #[test]
    fn test_plan_start_preset() {
        let plan = plan_start(&start_args(None, Some("deep-work"), None), &Config::default()).unwrap();

        assert_eq!(plan.target, Some(90 * 60));
        assert_eq!(plan.category, SessionCategory::Coding);
    }

    #[test]
    fn test_plan_start_category_overrides_preset() {
        let plan = plan_start(
            &start_args(None, Some("pomodoro"), Some("reading")),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(plan.target, Some(25 * 60));
        assert_eq!(plan.category, SessionCategory::Reading);
    }

    #[test]
    fn test_plan_start_unknown_preset() {
        let result = plan_start(&start_args(None, Some("nap"), None), &Config::default());
        assert!(matches!(result, Err(FocusError::NotFound(_))));
    }

    #[test]
    fn test_edit_category_and_note() {
        let session = FocusSession::new(600.0, SessionCategory::Work, None);
        let mut engine = engine_with(&[session.clone()]);

        edit(
            &mut engine,
            &edit_args(&session.short_id(), Some("study"), Some("notes"), false),
            OutputFormat::Json,
        )
        .unwrap();

        let updated = engine.store().find(session.id).unwrap();
        assert_eq!(updated.category, SessionCategory::Study);
        assert_eq!(updated.note.as_deref(), Some("notes"));
        assert!((updated.duration - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edit_failed_write_changes_nothing() {
        let session = FocusSession::new(600.0, SessionCategory::Work, Some("old".to_string()));
        let bytes = serde_json::to_vec(&vec![session.clone()]).unwrap();

        let mut backend = MockBlobStore::new();
        backend.expect_read().returning(move || Ok(Some(bytes.clone())));
        backend
            .expect_write()
            .times(1)
            .returning(|_| Err(FocusError::Storage("disk full".to_string())));
        let mut engine = FocusEngine::new(SessionStore::open(Box::new(backend)));

        let result = edit(
            &mut engine,
            &edit_args(&session.short_id(), Some("study"), Some("new"), false),
            OutputFormat::Pretty,
        );

        assert!(matches!(result, Err(FocusError::Storage(_))));
        let unchanged = engine.store().find(session.id).unwrap();
        assert_eq!(unchanged.category, SessionCategory::Work);
        assert_eq!(unchanged.note.as_deref(), Some("old"));
    }

    #[test]
    fn test_plan_start_overflowing_target() {
        let result = plan_start(
            &start_args(Some("400000000000000000"), None, None),
            &Config::default(),
        );
        assert!(matches!(result, Err(FocusError::InvalidInput(_))));
    }

    #[test]
    fn test_edit_clear_note() {
        let session = FocusSession::new(600.0, SessionCategory::Work, Some("old".to_string()));
        let mut engine = engine_with(&[session.clone()]);

        edit(
            &mut engine,
            &edit_args(&session.id.to_string(), None, None, true),
            OutputFormat::Pretty,
        )
        .unwrap();

        assert_eq!(engine.store().find(session.id).unwrap().note, None);
    }

    #[test]
    fn test_edit_requires_a_change() {
        let session = FocusSession::new(600.0, SessionCategory::Work, None);
        let mut engine = engine_with(&[session.clone()]);

        let result = edit(
            &mut engine,
            &edit_args(&session.short_id(), None, None, false),
            OutputFormat::Pretty,
        );

        assert!(matches!(result, Err(FocusError::InvalidInput(_))));
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut engine = engine_with(&[]);
        let result = edit(
            &mut engine,
            &edit_args("deadbeef", Some("work"), None, false),
            OutputFormat::Pretty,
        );

        assert!(matches!(result, Err(FocusError::NotFound(_))));
    }

    #[test]
    fn test_delete_by_prefix() {
        let keep = FocusSession::new(60.0, SessionCategory::Work, None);
        let gone = FocusSession::new(120.0, SessionCategory::Exercise, None);
        let mut engine = engine_with(&[keep.clone(), gone.clone()]);

        let output = delete(&mut engine, &gone.short_id(), OutputFormat::Pretty).unwrap();

        assert!(output.contains("Exercise"));
        assert_eq!(engine.sessions().len(), 1);
        assert_eq!(engine.sessions()[0].id, keep.id);
    }

    #[test]
    fn test_clear_requires_force() {
        let mut engine = engine_with(&[FocusSession::new(60.0, SessionCategory::Work, None)]);

        assert!(clear(&mut engine, false, OutputFormat::Pretty).is_err());
        assert_eq!(engine.sessions().len(), 1);

        let output = clear(&mut engine, true, OutputFormat::Json).unwrap();
        assert!(output.contains("\"deleted\": 1"));
        assert!(engine.sessions().is_empty());
    }

    #[test]
    fn test_format_recorded() {
        assert!(format_recorded(&[]).contains("No session recorded"));

        let session = FocusSession::new(1500.0, SessionCategory::Coding, None);
        let output = format_recorded(&[session]);
        assert!(output.contains("1 session(s)"));
        assert!(output.contains("25:00"));
    }
}
