//! Display-tree wrappers for layers.
//!
//! A [`Container`] holds one shape: a frame node parenting the geometry's
//! body node and its point handles. A [`ContainerGroup`] mirrors a layer
//! group, keeping an ordered child-frame list that doubles as z-order.

use std::time::Duration;

use vecmark_display::{DisplayList, NodeId, Point};

use crate::geometry::{Geometry, GeometryPalette, GeometryProjection, ShapeKind};
use crate::viewport::Viewport;

/// Frame node plus the single geometry it parents.
#[derive(Debug)]
pub struct Container {
    frame: NodeId,
    geometry: Geometry,
}

impl Container {
    /// Build the frame and geometry. With a `start` position the geometry
    /// immediately receives the initial click, placing its first vertex.
    pub(crate) fn new(
        kind: ShapeKind,
        palette: GeometryPalette,
        change_delay: Duration,
        display: &mut DisplayList,
        viewport: &Viewport,
        start: Option<Point>,
    ) -> Self {
        let frame = display.create_node();
        let mut geometry = Geometry::new(kind, palette, change_delay, display, viewport, frame);
        if let Some(world) = start {
            geometry.click(world, display, viewport);
        }
        Self { frame, geometry }
    }

    pub fn frame(&self) -> NodeId {
        self.frame
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Cascade the layer's selection flag into the geometry palette.
    /// Stages are untouched; selection is a visual state, not a gesture.
    pub(crate) fn set_selected(&mut self, selected: bool, display: &mut DisplayList, viewport: &Viewport) {
        self.geometry.set_selected(selected, display, viewport);
    }

    pub(crate) fn hide(&self, display: &mut DisplayList) {
        let frame = &mut display[self.frame];
        frame.set_visible(false);
        frame.set_interactive(false);
    }

    pub(crate) fn show(&self, display: &mut DisplayList) {
        let frame = &mut display[self.frame];
        frame.set_visible(true);
        frame.set_interactive(true);
    }

    pub fn serialize(&self) -> GeometryProjection {
        self.geometry.project()
    }

    /// Detach the frame from its owning group frame. Node disposal is the
    /// scene's job, after the layer record is gone.
    pub(crate) fn remove(&self, display: &mut DisplayList, parent_frame: NodeId) {
        display.remove_child(parent_frame, self.frame);
    }
}

/// Ordered list of child frames mirroring a layer group.
#[derive(Debug)]
pub struct ContainerGroup {
    frame: NodeId,
    children: Vec<NodeId>,
}

impl ContainerGroup {
    pub(crate) fn new(display: &mut DisplayList) -> Self {
        Self {
            frame: display.create_node(),
            children: Vec::new(),
        }
    }

    pub fn frame(&self) -> NodeId {
        self.frame
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Append a child frame. Re-appending a present frame is a no-op, so
    /// the order (and therefore the z-order) never shuffles.
    pub(crate) fn append_child(&mut self, display: &mut DisplayList, child: NodeId) {
        if self.children.contains(&child) {
            return;
        }
        self.children.push(child);
        display.append_child(self.frame, child);
    }

    /// Remove a child frame; absent frames are ignored.
    pub(crate) fn remove_child(&mut self, display: &mut DisplayList, child: NodeId) {
        let Some(index) = self.children.iter().position(|c| *c == child) else {
            return;
        };
        self.children.remove(index);
        display.remove_child(self.frame, child);
    }

    pub(crate) fn hide(&self, display: &mut DisplayList) {
        let frame = &mut display[self.frame];
        frame.set_visible(false);
        frame.set_interactive(false);
    }

    pub(crate) fn show(&self, display: &mut DisplayList) {
        let frame = &mut display[self.frame];
        frame.set_visible(true);
        frame.set_interactive(true);
    }
}
