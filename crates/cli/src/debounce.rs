//! Coalesces bursts of change events into one action per quiet interval.

use std::time::{Duration, Instant};

/// Schedules at most one pending run. Each [`notify`](Self::notify) cancels
/// the pending run and schedules a new one `window` later, so a run only
/// fires once changes stop arriving for a full window.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record a change at `now`.
    pub(crate) fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns `true` exactly once when the pending run is due.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending run, if any.
    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }
}
