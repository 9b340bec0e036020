//! Rectangle drawing and hit rules.
//!
//! A rectangle is spanned by its two control points as **signed** extents:
//! `width = p1.x - p0.x`, `height = p1.y - p0.y`, stored without
//! normalization. Containment normalizes the span at test time, so a
//! rectangle dragged up-left hits exactly like one dragged down-right.
//! Equilateral mode forces `height = width` in both the preview and the
//! static draw.

use vecmark_display::{DisplayList, HitArea, Point, Rect};

use super::Geometry;
use crate::viewport::Viewport;

impl Geometry {
    pub(super) fn draw_rectangle(&mut self, display: &mut DisplayList, viewport: &Viewport, highlight: bool) {
        let (Some(p0), Some(p1)) = (self.control_position(0), self.control_position(1)) else {
            return;
        };
        let width = p1.x - p0.x;
        let height = if self.equilateral() { width } else { p1.y - p0.y };
        let style = self.style(viewport, highlight);

        let graphics = display[self.node()].graphics_mut();
        graphics.clear();
        graphics.draw_rect(Rect::new(p0.x, p0.y, width, height), style);
    }

    pub(super) fn draw_dynamic_rectangle(&mut self, cursor: Point, display: &mut DisplayList, viewport: &Viewport) {
        if self.control_position(1).is_some() {
            return;
        }
        let Some(p0) = self.control_position(0) else {
            return;
        };
        let width = cursor.x - p0.x;
        let height = if self.equilateral() { width } else { cursor.y - p0.y };
        let style = self.style(viewport, false);

        let graphics = display[self.node()].graphics_mut();
        graphics.clear();
        graphics.draw_rect(Rect::new(p0.x, p0.y, width, height), style);
    }

    pub(super) fn squeeze_rectangle(&mut self, display: &mut DisplayList) {
        let (Some(p0), Some(p1)) = (self.control_position(0), self.control_position(1)) else {
            return;
        };
        display[self.node()].set_hit_area(Some(HitArea::Rect(Rect::from_points(p0, p1))));
    }
}
