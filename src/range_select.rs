//! Rubber-band range selection.
//!
//! A drag on empty canvas stretches a translucent marquee from the anchor
//! point to the cursor. Every update recomputes the selection bounds and
//! fires a cancelable [`RangeSelectEvent`] before redrawing, so listeners can
//! run their in-bounds checks (and veto the redraw) each frame. A second,
//! longer-lived graphics node draws the border outline around the aggregate
//! of the selected layers and survives past the end of the drag.

use vecmark_display::{DisplayList, HitArea, NodeId, PaintStyle, Point, Rect};

use crate::constants::palette;
use crate::event::{Emitter, RangeSelectEvent};
use crate::viewport::Viewport;

const BAND_FILL_ALPHA: f32 = 0.2;

/// Marquee selection controller.
///
/// Owns two display nodes parented to the screen: the live band drawn during
/// a drag, and the persistent selection-preview border.
pub struct RangeSelect {
    band: NodeId,
    border: NodeId,
    anchor: Point,
    started: bool,
    can_start: Box<dyn Fn() -> bool>,
    bounds_changed: Emitter<RangeSelectEvent>,
    started_events: Emitter<()>,
    ended_events: Emitter<()>,
}

impl RangeSelect {
    pub(crate) fn new(display: &mut DisplayList, screen: NodeId) -> Self {
        let border = display.create_node();
        let band = display.create_node();
        display.append_child(screen, border);
        display.append_child(screen, band);
        Self {
            band,
            border,
            anchor: Point::ZERO,
            started: false,
            can_start: Box::new(|| true),
            bounds_changed: Emitter::new(),
            started_events: Emitter::new(),
            ended_events: Emitter::new(),
        }
    }

    /// Whether a drag is currently stretching the band.
    pub fn is_active(&self) -> bool {
        self.started
    }

    pub(crate) fn band_node(&self) -> NodeId {
        self.band
    }

    pub(crate) fn border_node(&self) -> NodeId {
        self.border
    }

    /// Replace the permission guard consulted by [`RangeSelect::start`].
    pub fn set_can_start(&mut self, permission: impl Fn() -> bool + 'static) {
        self.can_start = Box::new(permission);
    }

    pub fn subscribe_bounds_changed(
        &mut self,
        subscriber: impl FnMut(&mut RangeSelectEvent) + 'static,
    ) {
        self.bounds_changed.subscribe(subscriber);
    }

    pub fn subscribe_started(&mut self, subscriber: impl FnMut(&mut ()) + 'static) {
        self.started_events.subscribe(subscriber);
    }

    pub fn subscribe_ended(&mut self, subscriber: impl FnMut(&mut ()) + 'static) {
        self.ended_events.subscribe(subscriber);
    }

    /// Anchor a new drag at `world`. No-op while the guard denies it or a
    /// drag is already running.
    pub fn start(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        if self.started || !(self.can_start)() {
            return;
        }
        self.started = true;
        self.anchor = world;

        // The band catches pointer traffic over the whole visible canvas for
        // the duration of the drag.
        let top_left = viewport.to_world(Point::ZERO);
        let area = Rect::new(
            top_left.x,
            top_left.y,
            viewport.world_screen_width(),
            viewport.world_screen_height(),
        );
        if let Some(node) = display.node_mut(self.band) {
            node.set_interactive(true);
            node.set_hit_area(Some(HitArea::Rect(area)));
        }
        self.started_events.fire(&mut ());
    }

    /// Stretch the band to `cursor` and report the selection bounds.
    ///
    /// The bounds are announced through a cancelable event before anything is
    /// drawn; a prevented event skips the redraw for this frame but the
    /// returned bounds stay valid. Returns `None` while no drag is running.
    pub fn update(
        &mut self,
        cursor: Point,
        display: &mut DisplayList,
        viewport: &Viewport,
    ) -> Option<Rect> {
        if !self.started {
            return None;
        }
        let span = Rect::from_points(self.anchor, cursor);
        let bounds = span.normalized();

        let mut event = RangeSelectEvent::new(bounds);
        self.bounds_changed.fire(&mut event);
        if event.default_prevented() {
            return Some(bounds);
        }

        if let Some(node) = display.node_mut(self.band) {
            let graphics = node.graphics_mut();
            graphics.clear();
            let style = PaintStyle::fill(palette::select_background().with_alpha(BAND_FILL_ALPHA))
                .with_stroke(viewport.scale(1.0), palette::select_border());
            graphics.draw_rect(span, style);
        }
        Some(bounds)
    }

    /// Finish the drag: drop interactivity and wipe the band.
    pub fn end(&mut self, display: &mut DisplayList) {
        if !self.started {
            return;
        }
        self.started = false;
        if let Some(node) = display.node_mut(self.band) {
            node.set_interactive(false);
            node.set_hit_area(None);
            node.graphics_mut().clear();
        }
        self.ended_events.fire(&mut ());
    }

    /// Outline `bounds` on the persistent border node.
    pub fn draw_border_shape(&mut self, bounds: Rect, display: &mut DisplayList, viewport: &Viewport) {
        if let Some(node) = display.node_mut(self.border) {
            let graphics = node.graphics_mut();
            graphics.clear();
            graphics.draw_rect(
                bounds,
                PaintStyle::stroke(viewport.scale(1.0), palette::select_border()),
            );
        }
    }

    pub fn clear_border_shape(&mut self, display: &mut DisplayList) {
        if let Some(node) = display.node_mut(self.border) {
            node.graphics_mut().clear();
        }
    }
}

impl std::fmt::Debug for RangeSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSelect")
            .field("band", &self.band)
            .field("border", &self.border)
            .field("anchor", &self.anchor)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
