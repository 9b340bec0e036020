//! Pan/zoom transform between screen and world coordinates.
//!
//! The transform is uniform: `world = (screen - offset) / zoom`. Zoom
//! mutations are clamped so the visible world never exceeds
//! 25000 x 20000 world units and never shrinks below 10 x 10; a violating
//! zoom refits so the constraining axis lands exactly on the clamp.
//!
//! Dragging the world (panning) is paused by default; the scene's
//! interaction controller resumes it for navigation mode.

use vecmark_display::Point;

use crate::constants::world;
use crate::event::Emitter;

#[derive(Debug)]
pub struct Viewport {
    screen_width: f32,
    screen_height: f32,
    zoom: f32,
    offset: Point,
    drag_paused: bool,
    zoom_changed: Emitter<f32>,
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            zoom: world::HOME_ZOOM,
            offset: Point::new(world::HOME_OFFSET.0, world::HOME_OFFSET.1),
            drag_paused: true,
            zoom_changed: Emitter::new(),
        }
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Convert a screen position to world coordinates.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world position to screen coordinates.
    pub fn to_screen(&self, position: Point) -> Point {
        Point::new(
            position.x * self.zoom + self.offset.x,
            position.y * self.zoom + self.offset.y,
        )
    }

    /// Convert a desired on-screen length to world units, so strokes and
    /// handles keep a constant visual size across zoom levels.
    pub fn scale(&self, pixels: f32) -> f32 {
        pixels / self.zoom
    }

    /// World units currently visible horizontally.
    pub fn world_screen_width(&self) -> f32 {
        self.screen_width / self.zoom
    }

    /// World units currently visible vertically.
    pub fn world_screen_height(&self) -> f32 {
        self.screen_height / self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.apply_zoom(zoom);
    }

    /// Zoom while keeping the world position under `anchor_screen` fixed
    /// on screen. This is the wheel-zoom entry point.
    pub fn zoom_at(&mut self, anchor_screen: Point, zoom: f32) {
        let world_anchor = self.to_world(anchor_screen);
        self.apply_zoom(zoom);
        self.offset = Point::new(
            anchor_screen.x - world_anchor.x * self.zoom,
            anchor_screen.y - world_anchor.y * self.zoom,
        );
    }

    /// Uniform zoom that fits a `width x height` world box on screen.
    pub fn fit(&mut self, width: f32, height: f32) {
        self.apply_zoom((self.screen_width / width).min(self.screen_height / height));
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        let before = self.zoom;
        self.clamp_zoom();
        if self.zoom != before {
            self.notify_zoom_changed();
        }
    }

    /// Pan by a screen-space delta. Ignored while dragging is paused.
    pub fn pan_by(&mut self, delta: Point) {
        if self.drag_paused {
            return;
        }
        self.offset = self.offset + delta;
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub fn pause_drag(&mut self) {
        self.drag_paused = true;
    }

    pub fn resume_drag(&mut self) {
        self.drag_paused = false;
    }

    pub fn drag_paused(&self) -> bool {
        self.drag_paused
    }

    /// Restore the home transform.
    pub fn reset(&mut self) {
        self.offset = Point::new(world::HOME_OFFSET.0, world::HOME_OFFSET.1);
        self.apply_zoom(world::HOME_ZOOM);
    }

    /// Hear about zoom changes, e.g. to redraw zoom-dependent primitives.
    pub fn subscribe_zoom_changed(&mut self, subscriber: impl FnMut(&mut f32) + 'static) {
        self.zoom_changed.subscribe(subscriber);
    }

    fn apply_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.clamp_zoom();
        self.notify_zoom_changed();
    }

    fn clamp_zoom(&mut self) {
        let visible_width = self.world_screen_width();
        let visible_height = self.world_screen_height();

        if visible_width > world::WIDTH_MAX || visible_height > world::HEIGHT_MAX {
            self.zoom = (self.screen_width / world::WIDTH_MAX)
                .max(self.screen_height / world::HEIGHT_MAX);
            log::debug!("viewport: zoom clamped out to {}", self.zoom);
        } else if visible_width < world::WIDTH_MIN || visible_height < world::HEIGHT_MIN {
            self.zoom = (self.screen_width / world::WIDTH_MIN)
                .min(self.screen_height / world::HEIGHT_MIN);
            log::debug!("viewport: zoom clamped in to {}", self.zoom);
        }
    }

    fn notify_zoom_changed(&mut self) {
        let mut zoom = self.zoom;
        self.zoom_changed.fire(&mut zoom);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_to_world_inverts_pan_and_zoom() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_offset(Point::new(100.0, 50.0));
        viewport.set_zoom(2.0);

        let world = viewport.to_world(Point::new(300.0, 250.0));
        assert_eq!(world, Point::new(100.0, 100.0));
        assert_eq!(viewport.to_screen(world), Point::new(300.0, 250.0));
    }

    #[test]
    fn test_scale_converts_screen_lengths() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_zoom(4.0);
        assert_eq!(viewport.scale(2.0), 0.5);
    }

    #[test]
    fn test_zoom_out_clamps_to_world_maximum() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_zoom(0.001);

        // The width is the constraining axis here and lands exactly on
        // the clamp; the height stays inside it.
        assert!((viewport.world_screen_width() - 25_000.0).abs() < 0.5);
        assert!(viewport.world_screen_height() <= 20_000.0 + 0.5);
    }

    #[test]
    fn test_zoom_in_clamps_to_world_minimum() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_zoom(1_000.0);

        assert_eq!(viewport.world_screen_height(), 10.0);
        assert!(viewport.world_screen_width() >= 10.0);
    }

    #[test]
    fn test_fit_uses_smaller_ratio() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.fit(1600.0, 600.0);
        // 800/1600 = 0.5 is smaller than 600/600 = 1.0.
        assert_eq!(viewport.zoom(), 0.5);
    }

    #[test]
    fn test_pan_is_paused_by_default() {
        let mut viewport = Viewport::new(800.0, 600.0);
        let home = viewport.offset();

        viewport.pan_by(Point::new(10.0, 10.0));
        assert_eq!(viewport.offset(), home);

        viewport.resume_drag();
        viewport.pan_by(Point::new(10.0, 10.0));
        assert_eq!(viewport.offset(), home + Point::new(10.0, 10.0));
    }

    #[test]
    fn test_reset_restores_home_transform() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.resume_drag();
        viewport.pan_by(Point::new(500.0, 500.0));
        viewport.set_zoom(3.0);

        viewport.reset();
        assert_eq!(viewport.offset(), Point::new(40.0, 40.0));
        assert_eq!(viewport.zoom(), 1.0);
    }

    #[test]
    fn test_zoom_change_notifies_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.subscribe_zoom_changed(move |zoom| sink.borrow_mut().push(*zoom));
        viewport.set_zoom(2.0);

        assert_eq!(seen.borrow().as_slice(), &[2.0]);
    }

    #[test]
    fn test_zoom_anchor_stays_fixed() {
        let mut viewport = Viewport::new(800.0, 600.0);
        let anchor = Point::new(400.0, 300.0);
        let before = viewport.to_world(anchor);

        viewport.zoom_at(anchor, 2.0);
        let after = viewport.to_world(anchor);

        assert!((after.x - before.x).abs() < 1e-4);
        assert!((after.y - before.y).abs() < 1e-4);
    }
}
