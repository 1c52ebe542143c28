// src/search/debounce.rs
// =============================================================================
// Last-write-wins debouncer.
//
// Every push() replaces the pending value and restarts the quiet period.
// The value is released only once the quiet period passes with no new push.
// Intermediate values are dropped, never coalesced.
// =============================================================================

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the timer from `now`.
    pub fn push(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// When the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Takes the settled value once its deadline has passed.
    pub fn take_if_elapsed(&mut self, now: Instant) -> Option<String> {
        let elapsed = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if !elapsed {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }
}
