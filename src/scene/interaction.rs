//! Interaction policy and pointer rebroadcast.
//!
//! The scene owns the one authoritative pointer pipeline; collaborators that
//! want raw events (side panels, shortcut handlers) subscribe here instead
//! of attaching their own listeners. The policy flags gate what the pipeline
//! is allowed to do: hand the canvas to navigation, make layers current on
//! click, constrain new shapes to equal extents, or move a selection.

use vecmark_display::PointerEvent;

use crate::event::Emitter;
use crate::viewport::Viewport;

pub struct SceneInteraction {
    interactive_children: bool,
    can_navigate: bool,
    equilateral: bool,
    can_move_selected_layers: Box<dyn Fn() -> bool>,
    pointer_down: Emitter<PointerEvent>,
    pointer_up: Emitter<PointerEvent>,
    pointer_move: Emitter<PointerEvent>,
    pointer_over: Emitter<PointerEvent>,
    pointer_out: Emitter<PointerEvent>,
}

impl SceneInteraction {
    pub(crate) fn new() -> Self {
        Self {
            interactive_children: true,
            can_navigate: false,
            equilateral: false,
            can_move_selected_layers: Box::new(|| true),
            pointer_down: Emitter::new(),
            pointer_up: Emitter::new(),
            pointer_move: Emitter::new(),
            pointer_over: Emitter::new(),
            pointer_out: Emitter::new(),
        }
    }

    /// Whether clicks may claim layers as current. While disabled, clicks
    /// still forward to shapes but leave the current layer untouched.
    pub fn interactive_children(&self) -> bool {
        self.interactive_children
    }

    pub fn enable(&mut self) {
        self.interactive_children = true;
    }

    pub fn disable(&mut self) {
        self.interactive_children = false;
    }

    /// Whether the canvas currently belongs to pan/zoom navigation.
    pub fn can_navigate(&self) -> bool {
        self.can_navigate
    }

    /// Hand the canvas to navigation (or take it back). The viewport's drag
    /// gate follows the flag.
    pub fn set_can_navigate(&mut self, value: bool, viewport: &mut Viewport) {
        self.can_navigate = value;
        if value {
            viewport.resume_drag();
        } else {
            viewport.pause_drag();
        }
    }

    /// Whether new extents are constrained to be equal on both axes.
    pub fn equilateral(&self) -> bool {
        self.equilateral
    }

    pub(crate) fn set_equilateral(&mut self, value: bool) {
        self.equilateral = value;
    }

    pub fn can_move_selected_layers(&self) -> bool {
        (self.can_move_selected_layers)()
    }

    pub fn set_can_move_selected_layers(&mut self, permission: impl Fn() -> bool + 'static) {
        self.can_move_selected_layers = Box::new(permission);
    }

    pub fn subscribe_pointer_down(&mut self, subscriber: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_down.subscribe(subscriber);
    }

    pub fn subscribe_pointer_up(&mut self, subscriber: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_up.subscribe(subscriber);
    }

    pub fn subscribe_pointer_move(&mut self, subscriber: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_move.subscribe(subscriber);
    }

    pub fn subscribe_pointer_over(&mut self, subscriber: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_over.subscribe(subscriber);
    }

    pub fn subscribe_pointer_out(&mut self, subscriber: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_out.subscribe(subscriber);
    }

    pub(crate) fn notify_pointer_down(&mut self, event: PointerEvent) {
        let mut event = event;
        self.pointer_down.fire(&mut event);
    }

    pub(crate) fn notify_pointer_up(&mut self, event: PointerEvent) {
        let mut event = event;
        self.pointer_up.fire(&mut event);
    }

    pub(crate) fn notify_pointer_move(&mut self, event: PointerEvent) {
        let mut event = event;
        self.pointer_move.fire(&mut event);
    }

    pub(crate) fn notify_pointer_over(&mut self, event: PointerEvent) {
        let mut event = event;
        self.pointer_over.fire(&mut event);
    }

    pub(crate) fn notify_pointer_out(&mut self, event: PointerEvent) {
        let mut event = event;
        self.pointer_out.fire(&mut event);
    }
}

impl std::fmt::Debug for SceneInteraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneInteraction")
            .field("interactive_children", &self.interactive_children)
            .field("can_navigate", &self.can_navigate)
            .field("equilateral", &self.equilateral)
            .finish_non_exhaustive()
    }
}
