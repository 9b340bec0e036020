//! Subscriber lists, cancelable before-events and the hook surface the
//! hosting editor implements.
//!
//! Before-events follow the DOM convention: subscribers may call
//! `prevent_default` and the engine checks `default_prevented` after
//! firing. Subscriptions live as long as the emitter.

use std::fmt;

use vecmark_display::{PointerEvent, Rect};

use crate::geometry::ShapeKind;
use crate::layer::{Layer, LayerId};

// ============================================================================
// Emitter
// ============================================================================

/// An ordered list of subscribers invoked synchronously on `fire`.
pub struct Emitter<E> {
    subscribers: Vec<Box<dyn FnMut(&mut E)>>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Subscribers run in registration order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&mut E) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Invoke every subscriber with the event.
    pub fn fire(&mut self, event: &mut E) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ============================================================================
// Cancelable events
// ============================================================================

/// Typed reason carried by a prevented layer append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreventReason {
    /// The creation request is invalid in the hosting editor's current
    /// state (wrong tool, locked document, ...).
    Invalid,
}

impl fmt::Display for PreventReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreventReason::Invalid => write!(f, "invalid"),
        }
    }
}

/// Fired before a shape layer is appended to the root group.
#[derive(Debug)]
pub struct BeforeLayerAppendEvent {
    pub kind: ShapeKind,
    pub start: Option<PointerEvent>,
    prevented: bool,
    reason: Option<PreventReason>,
}

impl BeforeLayerAppendEvent {
    pub(crate) fn new(kind: ShapeKind, start: Option<PointerEvent>) -> Self {
        Self {
            kind,
            start,
            prevented: false,
            reason: None,
        }
    }

    pub fn prevent_default(&mut self, reason: PreventReason) {
        self.prevented = true;
        self.reason = Some(reason);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented
    }

    pub fn prevent_reason(&self) -> Option<PreventReason> {
        self.reason
    }
}

/// Fired before (cancelable) and after the current / current-edited layer
/// changes. `layer` is `None` when the slot is being cleared.
#[derive(Debug)]
pub struct CurrentLayerSetEvent {
    pub layer: Option<LayerId>,
    prevented: bool,
}

impl CurrentLayerSetEvent {
    pub(crate) fn new(layer: Option<LayerId>) -> Self {
        Self {
            layer,
            prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented
    }
}

/// Fired before the scene texture changes. `source` is `None` when the
/// texture slot is being cleared.
#[derive(Debug)]
pub struct CurrentTextureSetEvent {
    pub source: Option<String>,
    prevented: bool,
}

impl CurrentTextureSetEvent {
    pub(crate) fn new(source: Option<String>) -> Self {
        Self {
            source,
            prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented
    }
}

/// Fired with fresh rubber-band bounds before each range-select redraw.
/// Preventing skips that frame's redraw only.
#[derive(Debug)]
pub struct RangeSelectEvent {
    pub bounds: Rect,
    prevented: bool,
}

impl RangeSelectEvent {
    pub(crate) fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Structural notifications from the root group.
pub trait RootHooks {
    fn on_add_layer(&mut self, _layer: &Layer) {}
    fn on_remove_layer(&mut self, _layer: &Layer) {}
}

/// Generic notification fired on every observable field write of a
/// non-root layer (and on non-root structural changes).
pub trait LayerHooks {
    fn on_update_layer(&mut self, _layer: &Layer) {}
}

struct NoopHooks;

impl RootHooks for NoopHooks {}
impl LayerHooks for NoopHooks {}

/// The hook bundle installed by the hosting editor.
pub struct Hooks {
    pub root: Box<dyn RootHooks>,
    pub layer: Box<dyn LayerHooks>,
}

impl Hooks {
    pub fn new(root: Box<dyn RootHooks>, layer: Box<dyn LayerHooks>) -> Self {
        Self { root, layer }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            root: Box::new(NoopHooks),
            layer: Box::new(NoopHooks),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_fires_in_order() {
        let mut emitter: Emitter<Vec<u32>> = Emitter::new();
        emitter.subscribe(|log| log.push(1));
        emitter.subscribe(|log| log.push(2));

        let mut log = Vec::new();
        emitter.fire(&mut log);
        assert_eq!(log, vec![1, 2]);
    }

    #[test]
    fn test_prevent_default_carries_reason() {
        let mut event = BeforeLayerAppendEvent::new(ShapeKind::Rectangle, None);
        assert!(!event.default_prevented());

        event.prevent_default(PreventReason::Invalid);
        assert!(event.default_prevented());
        assert_eq!(event.prevent_reason(), Some(PreventReason::Invalid));
    }

    #[test]
    fn test_range_select_event_prevention() {
        let mut event = RangeSelectEvent::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
