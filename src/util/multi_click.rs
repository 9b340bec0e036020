//! Multi-click detection.
//!
//! Clicks landing close together in time and position are grouped into one
//! gesture, and the gesture is resolved only once the window closes. That
//! lets a double click be distinguished from two unrelated single clicks
//! without acting on the first click prematurely.

use std::time::Duration;
use web_time::Instant;

use vecmark_display::PointerEvent;

use crate::constants::MULTI_CLICK_SLOP;

/// Groups rapid clicks into a single gesture.
#[derive(Debug)]
pub struct MultiClickDetector {
    /// Clicks closer together than this belong to one gesture.
    window: Duration,

    /// Clicks seen in the current gesture.
    count: u32,

    /// Time of the most recent click.
    last_click: Option<Instant>,

    /// Most recent click event, reported when the gesture resolves.
    last_event: Option<PointerEvent>,
}

impl MultiClickDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            count: 0,
            last_click: None,
            last_event: None,
        }
    }

    /// Record a click. Extends the current gesture when the previous click
    /// is still inside the window and landed nearby, otherwise starts a
    /// new one.
    pub fn click(&mut self, event: PointerEvent) {
        let now = Instant::now();
        let within_window = self
            .last_click
            .is_some_and(|previous| now.duration_since(previous) < self.window);
        let near_previous = self
            .last_event
            .is_some_and(|previous| event.position.distance_to(previous.position) <= MULTI_CLICK_SLOP);

        self.count = if within_window && near_previous {
            self.count + 1
        } else {
            1
        };
        self.last_click = Some(now);
        self.last_event = Some(event);
    }

    /// Resolve the gesture once the window has closed. Returns the click
    /// count and the final click event, then resets.
    pub fn poll(&mut self) -> Option<(u32, PointerEvent)> {
        let last_click = self.last_click?;
        if last_click.elapsed() < self.window {
            return None;
        }

        let resolved = self.last_event.map(|event| (self.count, event));
        self.count = 0;
        self.last_click = None;
        self.last_event = None;
        resolved
    }

    /// Whether a gesture is still accumulating clicks.
    pub fn is_pending(&self) -> bool {
        self.last_click.is_some()
    }
}
