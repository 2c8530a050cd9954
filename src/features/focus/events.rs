//! Change notifications emitted by the focus engine.

use super::session::FocusSession;
use super::timer::TimerSnapshot;

/// Something observable changed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The timer moved between phases or its staged metadata changed.
    StateChanged(TimerSnapshot),
    /// One second was added to the session in progress.
    Ticked(TimerSnapshot),
    /// A finished session was written to the store.
    SessionRecorded(FocusSession),
    /// The stored session list changed.
    SessionsChanged {
        /// Number of sessions now stored
        count: usize,
    },
}

/// Identifies a subscription so it can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&EngineEvent)>;

/// Registered callbacks, notified in subscription order.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    /// Register a callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() < before
    }

    /// Deliver an event to every callback.
    pub fn notify(&mut self, event: &EngineEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
