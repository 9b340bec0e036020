//! Change debouncing.
//!
//! Batches rapid geometry edits so observers hear about a burst of
//! changes once, after the burst settles.

use std::time::Duration;
use web_time::Instant;

/// Tracks the time of the most recent change and reports it once the
/// debounce delay has passed without further changes.
#[derive(Debug)]
pub struct ChangeDebounce {
    /// Wait this long after the last change before reporting.
    delay: Duration,

    /// Time of the last unreported change.
    last_change: Option<Instant>,
}

impl ChangeDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
        }
    }

    /// Record a change. Restarts the delay if one is already pending.
    pub fn mark(&mut self) {
        self.last_change = Some(Instant::now());
    }

    /// Check whether a pending change has settled. Returns `true` at most
    /// once per burst; the pending change is consumed.
    pub fn poll(&mut self) -> bool {
        let Some(last_change) = self.last_change else {
            return false;
        };

        if last_change.elapsed() < self.delay {
            return false;
        }

        self.last_change = None;
        true
    }

    /// Whether a change is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// Drop any pending change without reporting it.
    pub fn reset(&mut self) {
        self.last_change = None;
    }
}
