//! Interactive shape geometry.
//!
//! A [`Geometry`] owns the vertex handles and display nodes for one shape
//! and runs the per-shape interaction machine:
//!
//! ```text
//! Drawing -> Unselected <-> Hover -> Selected -> Dragging
//!    ^                                              |
//!    +---------- double click (edit mode) ----------+
//! ```
//!
//! Every shape starts in `Drawing` and places vertices from clicks.
//! Rectangles and ellipses complete on pointer release; polygons close on
//! a double click. A later double click re-enters `Drawing` as edit mode
//! with the handles shown.
//!
//! All positions passed in are world coordinates; the scene converts from
//! screen space once at its boundary. Kind-specific drawing and hit-area
//! rules live in [`rectangle`], [`ellipse`] and [`polygon`].

mod ellipse;
mod point;
mod polygon;
mod rectangle;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vecmark_display::{
    Color, DisplayList, HitArea, LineStyle, NodeId, PaintStyle, Point, Rect,
};

use crate::constants::{palette, DUPLICATE_VERTEX_EPSILON, SHAPE_LINE_WIDTH};
use crate::error::CoreError;
use crate::util::ChangeDebounce;
use crate::viewport::Viewport;

pub use point::{ControlPoint, PointRole};

/// Interaction stage of a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Placing vertices, or re-entered as edit mode.
    Drawing,
    /// Idle.
    Unselected,
    /// Pointer over the shape.
    Hover,
    /// Clicked while hovered; armed for a drag.
    Selected,
    /// Whole-shape translation in progress.
    Dragging,
}

/// The supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polygon,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
        }
    }

    /// Maximum number of control points, if bounded.
    pub fn point_cap(&self) -> Option<usize> {
        match self {
            ShapeKind::Rectangle | ShapeKind::Ellipse => Some(2),
            ShapeKind::Polygon => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            "polygon" => Ok(ShapeKind::Polygon),
            other => Err(CoreError::unknown_shape_kind(other)),
        }
    }
}

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Fill and stroke colors for a shape, with the hover/selection variants.
#[derive(Debug, Clone, Copy)]
pub struct GeometryPalette {
    pub fill: Color,
    pub line: Color,
    pub fill_hover: Color,
    pub line_hover: Color,
}

impl Default for GeometryPalette {
    fn default() -> Self {
        Self {
            fill: palette::shape_fill(),
            line: palette::shape_line(),
            fill_hover: palette::shape_fill_hover(),
            line_hover: palette::shape_line_hover(),
        }
    }
}

/// Serialization projection of a geometry: control points only, in order.
#[derive(Debug, Clone, Serialize)]
pub struct GeometryProjection {
    pub id: Uuid,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub points: Vec<[f32; 2]>,
}

fn color_to_hex(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}

/// One interactive shape: vertex handles, display nodes, stage machine.
#[derive(Debug)]
pub struct Geometry {
    id: Uuid,
    kind: ShapeKind,
    stage: Stage,
    palette: GeometryPalette,
    points: Vec<ControlPoint>,

    /// Body graphics node, child 0 of `frame`.
    node: NodeId,
    /// Owning container frame; point nodes follow the body under it.
    frame: NodeId,

    /// Gesture anchor. Set on every click; `dynamic_move` advances it to
    /// the cursor each frame, so deltas are incremental.
    start: Point,
    /// Index of the handle currently being dragged.
    active_point: Option<usize>,
    /// Whether pointer moves may start or continue a whole-shape drag.
    move_armed: bool,
    selected: bool,
    equilateral: bool,
    /// Whether handles are shown while placing vertices.
    show_creation_points: bool,
    line_width: f32,
    /// Cursor of the last dynamic preview, kept for zoom refreshes.
    last_cursor: Option<Point>,

    change: ChangeDebounce,
}

impl Geometry {
    pub(crate) fn new(
        kind: ShapeKind,
        palette: GeometryPalette,
        change_delay: Duration,
        display: &mut DisplayList,
        viewport: &Viewport,
        frame: NodeId,
    ) -> Self {
        let node = display.create_node();
        display.append_child(frame, node);

        let mut geometry = Self {
            id: Uuid::new_v4(),
            kind,
            stage: Stage::Drawing,
            palette,
            points: Vec::new(),
            node,
            frame,
            start: Point::ZERO,
            active_point: None,
            move_armed: false,
            selected: false,
            equilateral: false,
            show_creation_points: !matches!(kind, ShapeKind::Ellipse),
            line_width: SHAPE_LINE_WIDTH,
            last_cursor: None,
            change: ChangeDebounce::new(change_delay),
        };
        // A fresh shape starts in `Drawing` and must catch clicks anywhere
        // on the canvas before it has any vertices of its own.
        geometry.begin_interaction(display, viewport);
        geometry
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    pub(crate) fn active_point(&self) -> Option<usize> {
        self.active_point
    }

    pub(crate) fn set_equilateral(&mut self, equilateral: bool) {
        self.equilateral = equilateral;
    }

    pub(crate) fn equilateral(&self) -> bool {
        self.equilateral
    }

    fn control_positions(&self) -> Vec<Point> {
        self.points
            .iter()
            .filter(|p| p.role() == PointRole::Control)
            .map(|p| p.position())
            .collect()
    }

    /// Position of the n-th control point, skipping shadows.
    fn control_position(&self, index: usize) -> Option<Point> {
        self.points
            .iter()
            .filter(|p| p.role() == PointRole::Control)
            .nth(index)
            .map(|p| p.position())
    }

    // ------------------------------------------------------------------
    // Pointer entry points
    // ------------------------------------------------------------------

    /// Handle a pointer-down forwarded by the scene. A press that lands on
    /// a visible handle grabs the handle instead of acting on the shape.
    pub(crate) fn click(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        if self.press_point(world, display, viewport) {
            return;
        }
        match self.kind {
            ShapeKind::Rectangle | ShapeKind::Polygon => {
                self.single_click(world, display, viewport);
                if self.kind == ShapeKind::Rectangle {
                    self.add_point_from_click(world, display, viewport);
                }
            }
            // The ellipse places its anchor before the stage switch so the
            // first dynamic preview has a point to measure from.
            ShapeKind::Ellipse => {
                self.add_point_from_click(world, display, viewport);
                self.single_click(world, display, viewport);
            }
        }
    }

    fn single_click(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        self.begin_interaction(display, viewport);
        self.start = world;

        match self.stage {
            Stage::Unselected => self.stop(display, viewport),
            Stage::Hover => {
                log::debug!("geometry {}: hover -> selected", self.id);
                self.stage = Stage::Selected;
                self.move_armed = true;
                self.draw_static(display, viewport);
                self.apply_bounds_hit_area(display);
            }
            Stage::Selected => {
                self.draw_static(display, viewport);
                self.move_armed = true;
            }
            Stage::Drawing => {
                if self.kind == ShapeKind::Polygon {
                    self.add_point_from_click(world, display, viewport);
                }
            }
            Stage::Dragging => {}
        }
    }

    /// Double-click resolution. While drawing it closes a polygon; in any
    /// other stage it enters edit mode.
    pub(crate) fn double_click(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        if self.stage == Stage::Drawing {
            if self.kind == ShapeKind::Polygon {
                log::debug!(
                    "geometry {}: polygon closed with {} points",
                    self.id,
                    self.points.len()
                );
                self.stop(display, viewport);
            }
            return;
        }
        self.enter_edit_mode(display, viewport);
    }

    /// Re-enter `Drawing` as edit mode: show every handle, widen the hit
    /// area to the visible world and arm moves.
    pub(crate) fn enter_edit_mode(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        if self.stage == Stage::Drawing {
            return;
        }
        log::debug!("geometry {}: entering edit mode", self.id);
        self.stage = Stage::Drawing;
        self.show_all_points(display, viewport);
        self.expand_hit_area(display, viewport);
        self.move_armed = true;
    }

    pub(crate) fn pointer_move(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        if let Some(index) = self.active_point {
            self.move_point(index, world, display, viewport);
            return;
        }
        match self.stage {
            Stage::Drawing => self.draw_dynamic(world, display, viewport),
            Stage::Selected if self.move_armed => {
                log::debug!("geometry {}: selected -> dragging", self.id);
                self.stage = Stage::Dragging;
                self.dynamic_move(world, display, viewport);
            }
            Stage::Dragging => self.dynamic_move(world, display, viewport),
            _ => {}
        }
    }

    pub(crate) fn pointer_up(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        match self.stage {
            Stage::Dragging | Stage::Selected => {
                self.squeeze(display);
                self.stage = Stage::Unselected;
                self.move_armed = false;
            }
            Stage::Drawing => self.complete_on_release(world, display, viewport),
            _ => {}
        }
        self.last_cursor = None;
    }

    /// Rectangles and ellipses finish on release: the release position
    /// becomes the second point. Polygons keep drawing until closed.
    fn complete_on_release(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        match self.kind {
            ShapeKind::Rectangle | ShapeKind::Ellipse => {
                let added = self.add_point(world, display, viewport);
                self.hide_all_points(display);
                self.draw_static(display, viewport);
                self.squeeze(display);
                self.stage = Stage::Unselected;
                self.move_armed = false;
                if added {
                    log::debug!("geometry {}: completed on release", self.id);
                    self.change.mark();
                }
            }
            ShapeKind::Polygon => {}
        }
    }

    pub(crate) fn pointer_over(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        if self.stage == Stage::Unselected && self.active_point.is_none() {
            self.draw_highlight(display, viewport);
            self.stage = Stage::Hover;
        }
    }

    pub(crate) fn pointer_out(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        match self.stage {
            Stage::Unselected => self.squeeze(display),
            Stage::Hover => {
                self.draw_static(display, viewport);
                self.stage = Stage::Unselected;
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    fn begin_interaction(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        self.expand_hit_area(display, viewport);
        display[self.node].set_interactive(true);
    }

    /// Return the shape to its idle look: handles hidden, hit area tight,
    /// stage `Unselected`.
    pub(crate) fn stop(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        self.hide_all_points(display);
        self.squeeze(display);
        self.draw_static(display, viewport);
        self.move_armed = false;
        self.stage = Stage::Unselected;
    }

    /// Record where a scene-driven group drag starts.
    pub(crate) fn begin_group_drag(&mut self, world: Point) {
        self.start = world;
    }

    pub(crate) fn set_selected(&mut self, selected: bool, display: &mut DisplayList, viewport: &Viewport) {
        self.selected = selected;
        self.draw_static(display, viewport);
    }

    /// Settle the debounced change notification. `true` at most once per
    /// quiet period.
    pub(crate) fn poll_change(&mut self) -> bool {
        self.change.poll()
    }

    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    /// Append a control point from a click, dropping clicks that land
    /// within epsilon of the previous vertex. That keeps the two clicks of
    /// a closing double-click from stacking duplicate vertices.
    fn add_point_from_click(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) -> bool {
        let duplicate = self
            .points
            .iter()
            .rev()
            .find(|p| p.role() == PointRole::Control)
            .is_some_and(|last| last.position().distance_to(world) < DUPLICATE_VERTEX_EPSILON);
        if duplicate {
            log::trace!("geometry {}: duplicate vertex dropped", self.id);
            return false;
        }
        self.add_point(world, display, viewport)
    }

    /// Append a control point, honoring the shape's point cap.
    pub(crate) fn add_point(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) -> bool {
        if let Some(cap) = self.kind.point_cap() {
            if self.points.len() >= cap {
                return false;
            }
        }
        let child_index = self.points.len() + 1;
        let point = ControlPoint::new(
            display,
            self.frame,
            world,
            PointRole::Control,
            self.show_creation_points,
            child_index,
        );
        if self.show_creation_points {
            point.draw(display, viewport, false);
        }
        log::trace!("geometry {}: point {} at ({}, {})", self.id, self.points.len(), world.x, world.y);
        self.points.push(point);
        true
    }

    /// Grab the topmost handle under a press, promoting a shadow point to
    /// a real vertex first. Returns whether a handle was grabbed.
    fn press_point(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) -> bool {
        let Some(index) = self.points.iter().rposition(|p| p.hits(world, viewport)) else {
            return false;
        };
        if self.points[index].role() == PointRole::Shadow {
            log::debug!("geometry {}: shadow point promoted", self.id);
            self.points[index].promote();
        }
        self.hide_shadow_points(display);
        self.active_point = Some(index);
        self.points[index].draw(display, viewport, true);
        true
    }

    fn move_point(&mut self, index: usize, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        self.points[index].set_position(world);
        self.points[index].draw(display, viewport, true);
        // Redraw live through the moved vertex.
        self.draw_static(display, viewport);
    }

    /// Finish an active handle drag: restore the handle's palette, rebuild
    /// polygon shadows, redraw and schedule the change notification.
    pub(crate) fn end_point_drag(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        let Some(index) = self.active_point.take() else {
            return;
        };
        self.points[index].draw(display, viewport, false);
        if self.kind == ShapeKind::Polygon {
            self.regenerate_shadow_points(display, viewport);
        }
        self.draw_static(display, viewport);
        self.change.mark();
    }

    pub(crate) fn hide_all_points(&mut self, display: &mut DisplayList) {
        for point in &mut self.points {
            point.set_visible(false, display);
        }
    }

    pub(crate) fn show_all_points(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        for point in &mut self.points {
            point.set_visible(true, display);
        }
        for point in &self.points {
            point.draw(display, viewport, false);
        }
    }

    fn hide_shadow_points(&mut self, display: &mut DisplayList) {
        for point in &mut self.points {
            if point.role() == PointRole::Shadow {
                point.set_visible(false, display);
            }
        }
    }

    // ------------------------------------------------------------------
    // Translation
    // ------------------------------------------------------------------

    /// Incremental whole-shape translation: move every point by the delta
    /// from the anchor, then advance the anchor to the cursor.
    pub(crate) fn dynamic_move(&mut self, cursor: Point, display: &mut DisplayList, viewport: &Viewport) {
        let delta = cursor - self.start;
        self.start = cursor;
        self.translate(delta, display, viewport);
    }

    /// Keyboard nudge by one on-screen pixel.
    pub(crate) fn nudge(&mut self, direction: NudgeDirection, display: &mut DisplayList, viewport: &Viewport) {
        let step = viewport.scale(1.0);
        let delta = match direction {
            NudgeDirection::Up => Point::new(0.0, -step),
            NudgeDirection::Down => Point::new(0.0, step),
            NudgeDirection::Left => Point::new(-step, 0.0),
            NudgeDirection::Right => Point::new(step, 0.0),
        };
        self.translate(delta, display, viewport);
    }

    fn translate(&mut self, delta: Point, display: &mut DisplayList, viewport: &Viewport) {
        for point in &mut self.points {
            let moved = point.position() + delta;
            point.set_position(moved);
        }
        for point in &self.points {
            if point.visible() {
                point.draw(display, viewport, false);
            }
        }
        self.change.mark();
        self.draw_static(display, viewport);
    }

    // ------------------------------------------------------------------
    // Drawing and hit areas
    // ------------------------------------------------------------------

    /// Redraw from the current control points with the idle palette (or
    /// the highlight palette while selected).
    pub(crate) fn draw_static(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        self.draw_shape(display, viewport, self.selected);
    }

    fn draw_highlight(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        self.draw_shape(display, viewport, true);
    }

    fn draw_shape(&mut self, display: &mut DisplayList, viewport: &Viewport, highlight: bool) {
        match self.kind {
            ShapeKind::Rectangle => self.draw_rectangle(display, viewport, highlight),
            ShapeKind::Ellipse => self.draw_ellipse_shape(display, viewport, highlight),
            ShapeKind::Polygon => self.draw_polygon_shape(display, viewport, highlight),
        }
    }

    /// Live preview while drawing, treating the cursor as the pending
    /// vertex.
    pub(crate) fn draw_dynamic(&mut self, cursor: Point, display: &mut DisplayList, viewport: &Viewport) {
        self.last_cursor = Some(cursor);
        match self.kind {
            ShapeKind::Rectangle => self.draw_dynamic_rectangle(cursor, display, viewport),
            ShapeKind::Ellipse => self.draw_dynamic_ellipse(cursor, display, viewport),
            ShapeKind::Polygon => self.draw_dynamic_polygon(cursor, display, viewport),
        }
    }

    fn style(&self, viewport: &Viewport, highlight: bool) -> PaintStyle {
        let (fill, line) = if highlight {
            (self.palette.fill_hover, self.palette.line_hover)
        } else {
            (self.palette.fill, self.palette.line)
        };
        PaintStyle {
            fill: Some(fill),
            line: Some(LineStyle::new(viewport.scale(self.line_width), line)),
        }
    }

    /// Recompute the tight, shape-specific hit area.
    pub(crate) fn squeeze(&mut self, display: &mut DisplayList) {
        match self.kind {
            ShapeKind::Rectangle => self.squeeze_rectangle(display),
            ShapeKind::Ellipse => self.squeeze_ellipse(display),
            ShapeKind::Polygon => self.squeeze_polygon(display),
        }
    }

    /// Widen the hit area to the currently visible world, so clicks land
    /// anywhere while drawing or editing.
    pub(crate) fn expand_hit_area(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        let origin = viewport.to_world(Point::ZERO);
        display[self.node].set_hit_area(Some(HitArea::Rect(Rect::new(
            origin.x,
            origin.y,
            viewport.world_screen_width(),
            viewport.world_screen_height(),
        ))));
    }

    /// Hit area covering the axis-aligned bounds of the control points, so
    /// a selected shape accepts drag gestures anywhere inside it.
    fn apply_bounds_hit_area(&mut self, display: &mut DisplayList) {
        if let Some(bounds) = self.points_bounds() {
            display[self.node].set_hit_area(Some(HitArea::Rect(bounds)));
        }
    }

    fn points_bounds(&self) -> Option<Rect> {
        let mut positions = self
            .points
            .iter()
            .filter(|p| p.role() == PointRole::Control)
            .map(|p| p.position());
        let first = positions.next()?;
        let (mut min, mut max) = (first, first);
        for p in positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Raw hit-area containment, independent of node interactivity.
    pub(crate) fn contains(&self, world: Point, display: &DisplayList) -> bool {
        display[self.node]
            .hit_area()
            .is_some_and(|area| area.contains(world))
    }

    /// Redraw zoom-dependent primitives after the viewport zoom changed:
    /// stroke widths, handle sizes, and a pending dynamic preview.
    pub(crate) fn refresh_zoom(&mut self, display: &mut DisplayList, viewport: &Viewport) {
        if self.stage == Stage::Drawing {
            self.expand_hit_area(display, viewport);
            match self.last_cursor {
                Some(cursor) => self.draw_dynamic(cursor, display, viewport),
                None => self.draw_static(display, viewport),
            }
        } else {
            self.draw_static(display, viewport);
        }
        for point in &self.points {
            if point.visible() {
                point.draw(display, viewport, false);
            }
        }
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Project the shape for serialization: control points only.
    pub fn project(&self) -> GeometryProjection {
        GeometryProjection {
            id: self.id,
            color: color_to_hex(self.palette.fill),
            kind: self.kind,
            points: self
                .control_positions()
                .into_iter()
                .map(|p| [p.x, p.y])
                .collect(),
        }
    }
}
