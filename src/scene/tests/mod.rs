//! Unit tests for the scene dispatcher.
//!
//! These tests drive the scene through the same pointer sequences a user
//! would produce and verify focus bookkeeping, selection semantics, group
//! operations and texture management.

mod dispatch_tests;

use std::time::Duration;

use vecmark_display::{DisplayList, NodeId, Point};

use crate::event::Hooks;
use crate::geometry::GeometryPalette;
use crate::range_select::RangeSelect;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// A scene with its collaborators, wired the way the application wires them.
pub(super) struct SceneFixture {
    pub display: DisplayList,
    pub viewport: Viewport,
    pub scene: Scene,
    pub range: RangeSelect,
    pub hooks: Hooks,
    pub screen: NodeId,
}

/// Build a scene on an 800x600 viewport with the offset zeroed, so world and
/// screen coordinates coincide and pointer math stays readable. Timers run
/// with zero delay so a single `tick` settles them.
pub(super) fn create_scene() -> SceneFixture {
    create_scene_with_click_window(Duration::ZERO)
}

/// Same as [`create_scene`], but with an explicit multi-click window for
/// tests that exercise double-click resolution.
pub(super) fn create_scene_with_click_window(window: Duration) -> SceneFixture {
    let mut display = DisplayList::new();
    let screen = display.create_node();
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_offset(Point::ZERO);

    let scene = Scene::new(
        &mut display,
        screen,
        GeometryPalette::default(),
        Duration::ZERO,
        window,
    );
    let range = RangeSelect::new(&mut display, screen);

    SceneFixture {
        display,
        viewport,
        scene,
        range,
        hooks: Hooks::default(),
        screen,
    }
}

impl SceneFixture {
    /// Draw a complete rectangle spanning `p0` to `p1` through the scene's
    /// own dispatch path and return the new layer's id.
    pub fn draw_rectangle(&mut self, p0: Point, p1: Point) -> crate::layer::LayerId {
        let id = self
            .scene
            .add_shape(
                crate::geometry::ShapeKind::Rectangle,
                None,
                &mut self.display,
                &self.viewport,
                &mut self.hooks,
            )
            .expect("append was not prevented");
        self.pointer_down(p0);
        self.pointer_move(p1);
        self.pointer_up(p1);
        id
    }

    pub fn pointer_down(&mut self, position: Point) {
        let event = vecmark_display::PointerEvent::at(position);
        self.scene.pointer_down(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range,
            &mut self.hooks,
        );
    }

    pub fn pointer_move(&mut self, position: Point) {
        let event = vecmark_display::PointerEvent::at(position);
        self.scene.pointer_move(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range,
            &mut self.hooks,
        );
    }

    pub fn pointer_up(&mut self, position: Point) {
        let event = vecmark_display::PointerEvent::at(position);
        self.scene.pointer_up(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range,
            &mut self.hooks,
        );
    }

    pub fn pointer_out(&mut self, position: Point) {
        let event = vecmark_display::PointerEvent::at(position);
        self.scene
            .pointer_out(event, &mut self.display, &self.viewport, &mut self.range);
    }

    pub fn tick(&mut self) {
        self.scene
            .tick(&mut self.display, &self.viewport, &mut self.hooks);
    }

    /// Control point positions of a shape layer, in vertex order.
    pub fn shape_points(&self, id: crate::layer::LayerId) -> Vec<Point> {
        self.scene
            .store()
            .geometry(id)
            .map(|geometry| geometry.points().iter().map(|p| p.position()).collect())
            .unwrap_or_default()
    }

    /// Interaction stage of a shape layer.
    pub fn shape_stage(&self, id: crate::layer::LayerId) -> Option<crate::geometry::Stage> {
        self.scene.store().geometry(id).map(|g| g.stage())
    }
}
