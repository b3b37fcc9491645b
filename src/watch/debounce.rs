// src/watch/debounce.rs

//! Leading-edge debounce with a cooldown.
//!
//! The first qualifying event fires immediately; everything that follows
//! within `window` of that emission is dropped. A burst longer than the
//! window therefore fires once per window, not once at its end.

use std::time::Duration;

use tokio::time::Instant;

/// Default minimum time between two change notifications.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    /// `None` until the first emission, i.e. "negative infinity".
    last_fired_at: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired_at: None,
        }
    }

    pub fn last_fired_at(&self) -> Option<Instant> {
        self.last_fired_at
    }

    /// Decide whether an event observed at `now` should fire, recording the
    /// emission if so.
    ///
    /// Fires only when strictly more than `window` has elapsed since the
    /// last emission. A `now` earlier than the last emission never fires.
    pub fn should_fire(&mut self, now: Instant) -> bool {
        let fire = match self.last_fired_at {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed > self.window),
        };
        if fire {
            self.last_fired_at = Some(now);
        }
        fire
    }

    /// Forget the last emission; the next event fires unconditionally.
    pub fn reset(&mut self) {
        self.last_fired_at = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
