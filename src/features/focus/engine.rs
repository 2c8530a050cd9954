//! The focus engine: timer transitions over a session store.
//!
//! All transitions run on the caller's thread. The recurring one-second tick
//! is delivered by a driver through [`FocusEngine::tick`], carrying the
//! [`TickHandle`] issued when the timer entered Running. Pausing or stopping
//! invalidates that handle inside the same call, so a late tick is ignored.

use chrono::{DateTime, Local, Utc};
use log::{debug, info};
use uuid::Uuid;

use super::category::SessionCategory;
use super::events::{EngineEvent, Subscribers, SubscriptionId};
use super::session::{normalize_note, FocusSession};
use super::store::SessionStore;
use super::timer::{TickHandle, TimerPhase, TimerSnapshot, TimerState};
use crate::error::FocusError;
use crate::features::stats::FocusStats;

/// Result of delivering a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The handle was not current; nothing changed.
    Stale,
    /// Elapsed time advanced by one second.
    Advanced {
        /// Elapsed seconds after the tick
        elapsed: u64,
    },
    /// The target was reached and the session was recorded.
    Completed(FocusSession),
}

/// Timer state machine plus the session history it feeds.
pub struct FocusEngine {
    store: SessionStore,
    timer: TimerState,
    active_tick: Option<TickHandle>,
    next_generation: u64,
    subscribers: Subscribers,
}

impl FocusEngine {
    /// Create an idle engine over `store`.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self::with_category(store, SessionCategory::Work)
    }

    /// Create an idle engine with `category` preselected.
    #[must_use]
    pub fn with_category(store: SessionStore, category: SessionCategory) -> Self {
        Self {
            store,
            timer: TimerState::new(category),
            active_tick: None,
            next_generation: 0,
            subscribers: Subscribers::default(),
        }
    }

    // ---- observable state ----

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Current timer view.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.timer.phase
    }

    /// A session is in progress (running or paused).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.phase != TimerPhase::Idle
    }

    /// The session in progress is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.timer.phase == TimerPhase::Paused
    }

    /// Elapsed seconds of the session in progress.
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.timer.elapsed
    }

    /// Target of the session in progress.
    #[must_use]
    pub const fn target(&self) -> Option<u64> {
        self.timer.target
    }

    /// Progress fraction toward the target.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.timer.progress()
    }

    /// The handle ticks must carry, if the timer is running.
    #[must_use]
    pub const fn active_tick(&self) -> Option<TickHandle> {
        self.active_tick
    }

    /// Recorded sessions, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[FocusSession] {
        self.store.sessions()
    }

    /// Statistics over the recorded sessions.
    #[must_use]
    pub fn stats(&self, now: DateTime<Local>) -> FocusStats {
        FocusStats::compute(self.store.sessions(), now)
    }

    // ---- staged metadata ----

    /// Choose the category for the session that will be recorded.
    pub fn select_category(&mut self, category: SessionCategory) {
        if self.timer.selected_category != category {
            self.timer.selected_category = category;
            self.emit_state();
        }
    }

    /// Set the note for the session that will be recorded.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.timer.pending_note = note.into();
        self.emit_state();
    }

    // ---- transitions ----

    /// Start a new session. `target` is in seconds; `None` counts up.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the timer is idle.
    pub fn start(&mut self, target: Option<u64>) -> Result<TickHandle, FocusError> {
        self.require(TimerPhase::Idle, "start")?;
        self.timer.target = target;
        Ok(self.begin_ticking())
    }

    /// Halt ticking, keeping elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the timer is running.
    pub fn pause(&mut self) -> Result<(), FocusError> {
        self.require(TimerPhase::Running, "pause")?;
        self.active_tick = None;
        self.timer.phase = TimerPhase::Paused;
        debug!("Paused at {}s", self.timer.elapsed);
        self.emit_state();
        Ok(())
    }

    /// Continue a paused session with its original target.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the timer is paused.
    pub fn resume(&mut self) -> Result<TickHandle, FocusError> {
        self.require(TimerPhase::Paused, "resume")?;
        Ok(self.begin_ticking())
    }

    /// End the session in progress, recording it if any time elapsed.
    ///
    /// The timer is back to Idle when this returns, even if the write failed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when idle, or the store's write error.
    pub fn stop(&mut self) -> Result<Option<FocusSession>, FocusError> {
        if self.timer.phase == TimerPhase::Idle {
            return Err(self.invalid("stop"));
        }
        self.finish()
    }

    /// Deliver one tick from the driver.
    ///
    /// # Errors
    ///
    /// Returns the store's write error if reaching the target fails to record
    /// the session.
    pub fn tick(&mut self, handle: TickHandle) -> Result<TickOutcome, FocusError> {
        if self.active_tick != Some(handle) || self.timer.phase != TimerPhase::Running {
            debug!("Ignoring stale tick (generation {})", handle.generation());
            return Ok(TickOutcome::Stale);
        }

        self.timer.elapsed += 1;
        let snapshot = self.timer.snapshot();
        self.subscribers.notify(&EngineEvent::Ticked(snapshot));

        if self.timer.target_reached() {
            info!("Target of {}s reached", self.timer.elapsed);
            return match self.finish()? {
                Some(session) => Ok(TickOutcome::Completed(session)),
                None => Ok(TickOutcome::Stale),
            };
        }

        Ok(TickOutcome::Advanced {
            elapsed: self.timer.elapsed,
        })
    }

    // ---- history ----

    /// Delete a recorded session.
    ///
    /// # Errors
    ///
    /// Returns the store's write error.
    pub fn delete_session(&mut self, id: Uuid) -> Result<bool, FocusError> {
        let removed = self.store.delete(id)?;
        if removed {
            self.emit_sessions();
        }
        Ok(removed)
    }

    /// Delete every recorded session.
    ///
    /// # Errors
    ///
    /// Returns the store's write error.
    pub fn clear_sessions(&mut self) -> Result<(), FocusError> {
        self.store.clear()?;
        self.emit_sessions();
        Ok(())
    }

    /// Correct a recorded session's category and note in one write.
    ///
    /// `note` of `None` leaves the note alone; `Some(None)` removes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or the store's write error.
    pub fn amend_session(
        &mut self,
        id: Uuid,
        category: Option<SessionCategory>,
        note: Option<Option<String>>,
    ) -> Result<(), FocusError> {
        self.store.amend(id, category, note)?;
        self.emit_sessions();
        Ok(())
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    // ---- internals ----

    fn require(&self, phase: TimerPhase, action: &'static str) -> Result<(), FocusError> {
        if self.timer.phase == phase {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> FocusError {
        FocusError::InvalidTransition {
            action,
            phase: self.timer.phase,
        }
    }

    fn begin_ticking(&mut self) -> TickHandle {
        let handle = TickHandle::new(self.next_generation);
        self.next_generation += 1;
        self.active_tick = Some(handle);
        self.timer.phase = TimerPhase::Running;
        self.timer.started_at = Some(Utc::now());
        debug!(
            "Ticking with generation {} from {}s (target {:?})",
            handle.generation(),
            self.timer.elapsed,
            self.timer.target
        );
        self.emit_state();
        handle
    }

    /// Shared tail of stop and complete.
    fn finish(&mut self) -> Result<Option<FocusSession>, FocusError> {
        self.active_tick = None;

        let elapsed = self.timer.elapsed;
        let category = self.timer.selected_category;
        let note = normalize_note(Some(std::mem::take(&mut self.timer.pending_note)));
        self.timer.reset();
        self.emit_state();

        if elapsed == 0 {
            debug!("Discarding empty session");
            return Ok(None);
        }

        #[allow(clippy::cast_precision_loss)]
        let session = FocusSession::new(elapsed as f64, category, note);
        self.store.insert(session.clone())?;
        info!(
            "Recorded {} session of {}s ({})",
            session.category,
            elapsed,
            session.id
        );

        self.subscribers
            .notify(&EngineEvent::SessionRecorded(session.clone()));
        self.emit_sessions();
        Ok(Some(session))
    }

    fn emit_state(&mut self) {
        let snapshot = self.timer.snapshot();
        self.subscribers.notify(&EngineEvent::StateChanged(snapshot));
    }

    fn emit_sessions(&mut self) {
        let count = self.store.len();
        self.subscribers
            .notify(&EngineEvent::SessionsChanged { count });
    }
}
