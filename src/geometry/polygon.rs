//! Polygon drawing, hit rules and shadow-point refinement.
//!
//! Polygons are unbounded vertex sequences closed by a double click. After
//! a handle drag releases in edit mode, a `Shadow` midpoint handle is
//! rebuilt for every edge of the closed loop, including the wrap-around
//! edge back to the first vertex. Each shadow sits in the point sequence
//! immediately after its edge's first endpoint, so the interleaved order
//! is the draw order and promoting one needs no reshuffling.

use vecmark_display::{DisplayList, HitArea, Point};

use super::point::{ControlPoint, PointRole};
use super::Geometry;
use crate::viewport::Viewport;

impl Geometry {
    pub(super) fn draw_polygon_shape(&mut self, display: &mut DisplayList, viewport: &Viewport, highlight: bool) {
        let vertices = self.control_positions();
        if vertices.len() < 2 {
            return;
        }
        let style = self.style(viewport, highlight);

        let graphics = display[self.node()].graphics_mut();
        graphics.clear();
        graphics.draw_polygon(vertices, true, style);
    }

    pub(super) fn draw_dynamic_polygon(&mut self, cursor: Point, display: &mut DisplayList, viewport: &Viewport) {
        let mut vertices = self.control_positions();
        vertices.push(cursor);
        if vertices.len() < 2 {
            return;
        }
        let style = self.style(viewport, false);

        let graphics = display[self.node()].graphics_mut();
        graphics.clear();
        graphics.draw_polygon(vertices, true, style);
    }

    pub(super) fn squeeze_polygon(&mut self, display: &mut DisplayList) {
        let vertices = self.control_positions();
        display[self.node()].set_hit_area(Some(HitArea::Polygon(vertices)));
    }

    /// Rebuild the shadow midpoint handles from the current vertices and
    /// show them. Existing shadows are dropped first, so repeated drags
    /// never accumulate handles.
    pub(super) fn regenerate_shadow_points(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        let mut index = 0;
        while index < self.points.len() {
            if self.points[index].role() == PointRole::Shadow {
                let removed = self.points.remove(index);
                display.dispose(removed.node());
            } else {
                index += 1;
            }
        }

        let count = self.points.len();
        if count < 3 {
            return;
        }

        // Insert back to front so earlier vertex indices stay valid. The
        // node child index is the vector index plus one: child 0 of the
        // frame is the shape body.
        for i in (0..count).rev() {
            let a = self.points[i].position();
            let b = self.points[(i + 1) % count].position();
            let midpoint = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);

            let shadow = ControlPoint::new(
                display,
                self.frame,
                midpoint,
                PointRole::Shadow,
                true,
                i + 2,
            );
            shadow.draw(display, viewport, false);
            self.points.insert(i + 1, shadow);
        }
        log::debug!(
            "geometry {}: rebuilt {} shadow points",
            self.id,
            count
        );
    }
}
