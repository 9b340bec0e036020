//! Ellipse drawing and hit rules.
//!
//! An ellipse is centered at its **second** control point with absolute
//! half-extents `|p1 - p0|` per axis, unlike the rectangle's signed span.
//! The asymmetry is deliberate and load-bearing: hit areas are derived
//! with the same formulas, so drawing and hit-testing always agree.
//! Handles are hidden while placing an ellipse, and equilateral mode only
//! affects the live preview.

use vecmark_display::{DisplayList, HitArea, Point};

use super::Geometry;
use crate::viewport::Viewport;

impl Geometry {
    pub(super) fn draw_ellipse_shape(&mut self, display: &mut DisplayList, viewport: &Viewport, highlight: bool) {
        let (Some(p0), Some(p1)) = (self.control_position(0), self.control_position(1)) else {
            return;
        };
        let radius_x = (p1.x - p0.x).abs();
        let radius_y = (p1.y - p0.y).abs();
        let style = self.style(viewport, highlight);

        let node = &mut display[self.node()];
        node.graphics_mut().clear();
        node.graphics_mut().draw_ellipse(p1, radius_x, radius_y, style);
        // The static draw keeps the hit area in lockstep with the pixels.
        node.set_hit_area(Some(HitArea::Ellipse {
            center: p1,
            radius_x,
            radius_y,
        }));
    }

    pub(super) fn draw_dynamic_ellipse(&mut self, cursor: Point, display: &mut DisplayList, viewport: &Viewport) {
        if self.control_position(1).is_some() {
            return;
        }
        let Some(p0) = self.control_position(0) else {
            return;
        };
        let radius_x = (cursor.x - p0.x).abs();
        let radius_y = if self.equilateral() {
            radius_x
        } else {
            (cursor.y - p0.y).abs()
        };
        let style = self.style(viewport, false);

        let graphics = display[self.node()].graphics_mut();
        graphics.clear();
        graphics.draw_ellipse(cursor, radius_x, radius_y, style);
    }

    pub(super) fn squeeze_ellipse(&mut self, display: &mut DisplayList) {
        let (Some(p0), Some(p1)) = (self.control_position(0), self.control_position(1)) else {
            return;
        };
        display[self.node()].set_hit_area(Some(HitArea::Ellipse {
            center: p1,
            radius_x: (p1.x - p0.x).abs(),
            radius_y: (p1.y - p0.y).abs(),
        }));
    }
}
