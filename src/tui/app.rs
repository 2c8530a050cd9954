//! Application state for the timer screen.

use chrono::Local;
use log::info;

use crate::config::NotificationConfig;
use crate::error::FocusError;
use crate::features::focus::{
    FocusEngine, FocusSession, TickHandle, TickOutcome, TimerPhase, TimerSnapshot,
};
use crate::features::stats::today_focus_time;
use crate::tui::event::Action;

/// Key summary shown in the status bar and help overlay.
pub const KEY_HELP: &str = "space:pause/resume | s:stop | c/C:category | ?:help | q:quit";

/// Application state.
pub struct App {
    /// The engine driving the timer.
    engine: FocusEngine,
    /// Handle for the tick the driver should deliver next.
    tick: Option<TickHandle>,
    /// Target reused when a new session starts from Idle.
    target: Option<u64>,
    /// Notification preferences.
    notifications: NotificationConfig,
    /// Sessions recorded while the screen was open.
    pub recorded: Vec<FocusSession>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// A bell is owed to the terminal.
    bell: bool,
}

impl App {
    /// Create the app and start the first session.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not idle.
    pub fn new(
        mut engine: FocusEngine,
        target: Option<u64>,
        notifications: NotificationConfig,
    ) -> Result<Self, FocusError> {
        let tick = engine.start(target)?;

        Ok(Self {
            engine,
            tick: Some(tick),
            target,
            notifications,
            recorded: Vec::new(),
            status: Some("Press ? for help".to_string()),
            show_help: false,
            should_quit: false,
            bell: false,
        })
    }

    /// Current timer view.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    /// Seconds recorded today, including sessions from earlier runs.
    pub fn today_seconds(&self) -> f64 {
        today_focus_time(self.engine.sessions(), Local::now())
    }

    /// Handle the driver should pass to the next tick.
    pub const fn tick_handle(&self) -> Option<TickHandle> {
        self.tick
    }

    /// Apply a key action.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the timer is left in a consistent state.
    pub fn apply(&mut self, action: Action) -> Result<(), FocusError> {
        if action != Action::Help {
            self.show_help = false;
        }

        match action {
            Action::TogglePause => self.toggle_pause(),
            Action::Stop => self.stop(),
            Action::NextCategory => {
                let next = self.engine.snapshot().category.next();
                self.engine.select_category(next);
                Ok(())
            }
            Action::PreviousCategory => {
                let previous = self.engine.snapshot().category.previous();
                self.engine.select_category(previous);
                Ok(())
            }
            Action::Help => {
                self.show_help = !self.show_help;
                Ok(())
            }
            Action::Quit => self.quit(),
        }
    }

    /// Deliver one second to the engine.
    ///
    /// # Errors
    ///
    /// Returns the store's error if recording a completed session fails.
    pub fn on_tick(&mut self) -> Result<(), FocusError> {
        let Some(handle) = self.tick else {
            return Ok(());
        };

        match self.engine.tick(handle) {
            Ok(TickOutcome::Advanced { .. }) => Ok(()),
            Ok(TickOutcome::Completed(session)) => {
                self.tick = None;
                self.record(session, true);
                Ok(())
            }
            Ok(TickOutcome::Stale) => {
                self.tick = None;
                Ok(())
            }
            Err(e) => {
                self.tick = None;
                Err(e)
            }
        }
    }

    /// Take the pending bell, if any.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Sessions recorded while the screen was open.
    pub fn into_recorded(self) -> Vec<FocusSession> {
        self.recorded
    }

    fn toggle_pause(&mut self) -> Result<(), FocusError> {
        match self.engine.phase() {
            TimerPhase::Running => {
                self.engine.pause()?;
                self.tick = None;
                self.status = Some("Paused".to_string());
            }
            TimerPhase::Paused => {
                self.tick = Some(self.engine.resume()?);
                self.status = Some("Resumed".to_string());
            }
            TimerPhase::Idle => {
                self.tick = Some(self.engine.start(self.target)?);
                self.status = Some("New session started".to_string());
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), FocusError> {
        if self.engine.phase() == TimerPhase::Idle {
            self.status = Some("Timer is not running. Press space to start".to_string());
            return Ok(());
        }

        self.tick = None;
        match self.engine.stop()? {
            Some(session) => self.record(session, false),
            None => self.status = Some("Nothing to save".to_string()),
        }
        Ok(())
    }

    fn quit(&mut self) -> Result<(), FocusError> {
        self.should_quit = true;
        if self.engine.phase() == TimerPhase::Idle {
            return Ok(());
        }
        self.stop()
    }

    fn record(&mut self, session: FocusSession, reached_target: bool) {
        info!(
            "Recorded {} session of {}s",
            session.category, session.duration
        );

        self.status = Some(if reached_target && self.notifications.enabled {
            format!(
                "Focus session complete! You focused for {}",
                session.formatted_duration()
            )
        } else {
            format!("Saved {} {}", session.category.label(), session.formatted_duration())
        });
        if reached_target && self.notifications.sound {
            self.bell = true;
        }

        self.recorded.push(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::{SessionCategory, SessionStore};
    use crate::storage::{MemoryBlobStore, MockBlobStore};

    fn engine() -> FocusEngine {
        FocusEngine::new(SessionStore::open(Box::new(MemoryBlobStore::new())))
    }

    fn app(target: Option<u64>) -> App {
        App::new(engine(), target, NotificationConfig::default()).unwrap()
    }

    #[test]
    fn test_new_starts_running() {
        let app = app(None);
        assert_eq!(app.snapshot().phase, TimerPhase::Running);
        assert!(app.tick_handle().is_some());
    }

    #[test]
    fn test_pause_drops_tick_handle() {
        let mut app = app(None);
        app.on_tick().unwrap();
        app.apply(Action::TogglePause).unwrap();

        assert_eq!(app.snapshot().phase, TimerPhase::Paused);
        assert!(app.tick_handle().is_none());

        app.on_tick().unwrap();
        assert_eq!(app.snapshot().elapsed, 1);
    }

    #[test]
    fn test_resume_issues_new_handle() {
        let mut app = app(None);
        let first = app.tick_handle().unwrap();
        app.apply(Action::TogglePause).unwrap();
        app.apply(Action::TogglePause).unwrap();

        let second = app.tick_handle().unwrap();
        assert_ne!(first, second);
        assert_eq!(app.snapshot().phase, TimerPhase::Running);
    }

    #[test]
    fn test_stop_records_session() {
        let mut app = app(None);
        for _ in 0..3 {
            app.on_tick().unwrap();
        }
        app.apply(Action::NextCategory).unwrap();
        app.apply(Action::Stop).unwrap();

        assert_eq!(app.snapshot().phase, TimerPhase::Idle);
        assert_eq!(app.recorded.len(), 1);
        assert!((app.recorded[0].duration - 3.0).abs() < f64::EPSILON);
        assert_eq!(app.recorded[0].category, SessionCategory::Work.next());
        assert!(!app.take_bell());
    }

    #[test]
    fn test_stop_without_time_records_nothing() {
        let mut app = app(None);
        app.apply(Action::Stop).unwrap();

        assert!(app.recorded.is_empty());
        assert_eq!(app.status.as_deref(), Some("Nothing to save"));
    }

    #[test]
    fn test_space_from_idle_starts_again() {
        let mut app = app(Some(60));
        app.apply(Action::Stop).unwrap();
        app.apply(Action::TogglePause).unwrap();

        let snapshot = app.snapshot();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.target, Some(60));
    }

    #[test]
    fn test_target_completion_rings_bell() {
        let mut app = app(Some(2));
        app.on_tick().unwrap();
        app.on_tick().unwrap();

        assert_eq!(app.snapshot().phase, TimerPhase::Idle);
        assert!(app.tick_handle().is_none());
        assert_eq!(app.recorded.len(), 1);
        assert!(app.status.as_deref().unwrap().contains("complete"));
        assert!(app.take_bell());
        assert!(!app.take_bell());
    }

    #[test]
    fn test_completion_respects_notification_settings() {
        let quiet = NotificationConfig {
            enabled: false,
            sound: false,
        };
        let mut app = App::new(engine(), Some(1), quiet).unwrap();
        app.on_tick().unwrap();

        assert_eq!(app.recorded.len(), 1);
        assert!(!app.take_bell());
        assert!(app.status.as_deref().unwrap().starts_with("Saved"));
    }

    #[test]
    fn test_quit_saves_running_session() {
        let mut app = app(None);
        app.on_tick().unwrap();
        app.apply(Action::Quit).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.into_recorded().len(), 1);
    }

    #[test]
    fn test_help_toggles() {
        let mut app = app(None);
        app.apply(Action::Help).unwrap();
        assert!(app.show_help);
        app.apply(Action::PreviousCategory).unwrap();
        assert!(!app.show_help);
        assert_eq!(app.snapshot().category, SessionCategory::Work.previous());
    }

    #[test]
    fn test_failed_save_surfaces_error_and_resets() {
        let mut backend = MockBlobStore::new();
        backend.expect_read().returning(|| Ok(None));
        backend
            .expect_write()
            .returning(|_| Err(FocusError::Storage("disk full".to_string())));
        let engine = FocusEngine::new(SessionStore::open(Box::new(backend)));
        let mut app = App::new(engine, None, NotificationConfig::default()).unwrap();
        app.on_tick().unwrap();

        assert!(app.apply(Action::Stop).is_err());
        assert_eq!(app.snapshot().phase, TimerPhase::Idle);
        assert!(app.recorded.is_empty());
        assert!(app.today_seconds().abs() < f64::EPSILON);
    }
}
