//! Full-screen focus timer.
//!
//! Drives a [`FocusEngine`] from the terminal: key presses become engine
//! transitions and the loop delivers one tick per second while running.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::Action;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use ratatui::prelude::*;

use crate::config::NotificationConfig;
use crate::error::FocusError;
use crate::features::focus::{FocusEngine, FocusSession};

/// Interval between ticks.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Run the timer screen until the user quits.
///
/// Returns the sessions recorded while it was open.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the first session
/// cannot start.
pub fn run(
    engine: FocusEngine,
    target: Option<u64>,
    notifications: &NotificationConfig,
) -> Result<Vec<FocusSession>, FocusError> {
    let mut app = App::new(engine, target, notifications.clone())?;

    // Setup terminal
    enable_raw_mode().map_err(|e| FocusError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocusError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocusError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(e) = result {
        // Leaving the screen saves the session in progress.
        app.apply(Action::Quit).ok();
        return Err(e);
    }

    Ok(app.into_recorded())
}

/// Run the main application loop.
fn run_app<B: Backend + io::Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), FocusError> {
    let mut last_tick = Instant::now();

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Config(format!("Failed to draw: {e}")))?;

        if app.take_bell() {
            execute!(terminal.backend_mut(), Print('\u{7}')).ok();
        }

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if let Some(key) = event::next_key(timeout)? {
            if let Some(action) = event::action_for(&key) {
                let before = app.tick_handle();
                let result = app.apply(action);
                report(app, result);
                // A new run of ticks counts its first second from now.
                if app.tick_handle() != before {
                    last_tick = Instant::now();
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            let result = app.on_tick();
            report(app, result);
            last_tick = Instant::now();
        }

        if app.should_quit {
            debug!("Leaving timer with {} recorded session(s)", app.recorded.len());
            return Ok(());
        }
    }
}

/// Show an engine error in the status bar and keep going.
fn report(app: &mut App, result: Result<(), FocusError>) {
    if let Err(e) = result {
        warn!("{e}");
        app.status = Some(format!("Error: {e}"));
    }
}
