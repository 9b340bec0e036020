//! Draggable point handles.
//!
//! Every geometry vertex is backed by a `ControlPoint` that owns its own
//! display node, drawn as a circle whose on-screen size stays constant
//! across zoom levels. Polygons additionally interleave `Shadow` points at
//! edge midpoints; clicking one promotes it to a full vertex in place.

use uuid::Uuid;
use vecmark_display::{DisplayList, HitArea, LineStyle, NodeId, PaintStyle, Point};

use crate::constants::{handle, palette};
use crate::viewport::Viewport;

/// What a point handle stands for in the vertex sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    /// A real vertex of the shape.
    Control,
    /// An edge-midpoint candidate vertex (polygon refinement).
    Shadow,
}

/// One vertex handle with its display node.
#[derive(Debug)]
pub struct ControlPoint {
    id: Uuid,
    position: Point,
    visible: bool,
    radius: f32,
    role: PointRole,
    node: NodeId,
}

impl ControlPoint {
    /// Create the handle and insert its node at `child_index` of `frame`
    /// so the node order mirrors the vertex order.
    pub(crate) fn new(
        display: &mut DisplayList,
        frame: NodeId,
        position: Point,
        role: PointRole,
        visible: bool,
        child_index: usize,
    ) -> Self {
        let node = display.create_node();
        display.add_child_at(frame, node, child_index);
        display[node].set_visible(visible);
        display[node].set_interactive(visible);

        Self {
            id: Uuid::new_v4(),
            position,
            visible,
            radius: handle::RADIUS,
            role,
            node,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn role(&self) -> PointRole {
        self.role
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    /// Turn a shadow point into a real vertex in place. The interleaved
    /// order already renders correctly, so nothing moves.
    pub(crate) fn promote(&mut self) {
        self.role = PointRole::Control;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_visible(&mut self, visible: bool, display: &mut DisplayList) {
        self.visible = visible;
        display[self.node].set_visible(visible);
        display[self.node].set_interactive(visible);
    }

    /// Whether a world-space press lands on this handle. The grab radius
    /// is a screen-space constant, so it widens in world units as the
    /// view zooms out.
    pub(crate) fn hits(&self, world: Point, viewport: &Viewport) -> bool {
        self.visible && self.position.distance_to(world) <= viewport.scale(handle::HIT_RADIUS)
    }

    /// Redraw the handle circle and refresh its hit circle. `dragging`
    /// swaps in the drag tint.
    pub(crate) fn draw(&self, display: &mut DisplayList, viewport: &Viewport, dragging: bool) {
        let fill = if dragging {
            palette::point_drag_fill()
        } else {
            match self.role {
                PointRole::Control => palette::control_fill(),
                PointRole::Shadow => palette::shadow_fill(),
            }
        };
        let line = match self.role {
            PointRole::Control => palette::control_line(),
            PointRole::Shadow => palette::shadow_line(),
        };

        let node = &mut display[self.node];
        node.graphics_mut().clear();
        node.graphics_mut().draw_circle(
            self.position,
            viewport.scale(self.radius),
            PaintStyle {
                fill: Some(fill),
                line: Some(LineStyle::new(viewport.scale(handle::LINE_WIDTH), line)),
            },
        );
        node.set_hit_area(Some(HitArea::Circle {
            center: self.position,
            radius: viewport.scale(handle::HIT_RADIUS),
        }));
        node.set_visible(self.visible);
        node.set_interactive(self.visible);
    }
}
