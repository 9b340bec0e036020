//! Scene: the central dispatcher.
//!
//! One scene owns the layer tree, the current/current-edited layer slots and
//! the single authoritative pointer pipeline. Pointer events arrive here in
//! screen coordinates, get converted to world space once, and are routed by
//! priority: navigation wins outright, then an active selection (group drag
//! or deselect), then per-shape interaction, and finally the rubber-band
//! range select on empty canvas.
//!
//! Structural operations (add, group, remove, duplicate) funnel through the
//! scene as well, so collaborators can observe and veto them through the
//! cancelable before-events and the layer hooks.

mod interaction;
mod texture;

#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::Serialize;
use vecmark_display::{DisplayList, NodeId, Point, PointerEvent, Rect};

pub use interaction::SceneInteraction;
pub use texture::{SceneTexture, TextureProjection, VideoSource};

use crate::container::Container;
use crate::error::CoreError;
use crate::event::{
    BeforeLayerAppendEvent, CurrentLayerSetEvent, Emitter, Hooks, PreventReason,
};
use crate::geometry::{Geometry, GeometryPalette, NudgeDirection, ShapeKind, Stage};
use crate::layer::{Layer, LayerGroup, LayerId, LayerProjection, LayerStore, MaskType};
use crate::range_select::RangeSelect;
use crate::util::MultiClickDetector;
use crate::viewport::Viewport;

/// Serialized form of the whole scene: the current texture (if any) plus the
/// layer tree under the root.
#[derive(Debug, Clone, Serialize)]
pub struct SceneProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureProjection>,
    pub layers: Vec<LayerProjection>,
}

pub struct Scene {
    store: LayerStore,
    interaction: SceneInteraction,
    texture: SceneTexture,
    screen: NodeId,
    current_layer: Option<LayerId>,
    current_edited_layer: Option<LayerId>,
    last_focused: Option<LayerId>,
    hovered: Option<LayerId>,
    group_dragging: bool,
    clicks: MultiClickDetector,
    palette: GeometryPalette,
    change_delay: Duration,
    before_layer_append: Emitter<BeforeLayerAppendEvent>,
    before_current_layer_set: Emitter<CurrentLayerSetEvent>,
    current_layer_set: Emitter<CurrentLayerSetEvent>,
    current_edited_layer_set: Emitter<CurrentLayerSetEvent>,
}

impl Scene {
    pub(crate) fn new(
        display: &mut DisplayList,
        screen: NodeId,
        palette: GeometryPalette,
        change_delay: Duration,
        double_click_window: Duration,
    ) -> Self {
        Self {
            store: LayerStore::new(display, screen),
            interaction: SceneInteraction::new(),
            texture: SceneTexture::new(),
            screen,
            current_layer: None,
            current_edited_layer: None,
            last_focused: None,
            hovered: None,
            group_dragging: false,
            clicks: MultiClickDetector::new(double_click_window),
            palette,
            change_delay,
            before_layer_append: Emitter::new(),
            before_current_layer_set: Emitter::new(),
            current_layer_set: Emitter::new(),
            current_edited_layer_set: Emitter::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn interaction(&self) -> &SceneInteraction {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut SceneInteraction {
        &mut self.interaction
    }

    pub fn texture(&self) -> &SceneTexture {
        &self.texture
    }

    pub fn texture_mut(&mut self) -> &mut SceneTexture {
        &mut self.texture
    }

    pub fn current_layer(&self) -> Option<LayerId> {
        self.current_layer
    }

    pub fn current_edited_layer(&self) -> Option<LayerId> {
        self.current_edited_layer
    }

    /// The layer that most recently held either current slot.
    pub fn last_focused(&self) -> Option<LayerId> {
        self.last_focused
    }

    pub fn subscribe_before_layer_append(
        &mut self,
        subscriber: impl FnMut(&mut BeforeLayerAppendEvent) + 'static,
    ) {
        self.before_layer_append.subscribe(subscriber);
    }

    pub fn subscribe_before_current_layer_set(
        &mut self,
        subscriber: impl FnMut(&mut CurrentLayerSetEvent) + 'static,
    ) {
        self.before_current_layer_set.subscribe(subscriber);
    }

    pub fn subscribe_current_layer_set(
        &mut self,
        subscriber: impl FnMut(&mut CurrentLayerSetEvent) + 'static,
    ) {
        self.current_layer_set.subscribe(subscriber);
    }

    pub fn subscribe_current_edited_layer_set(
        &mut self,
        subscriber: impl FnMut(&mut CurrentLayerSetEvent) + 'static,
    ) {
        self.current_edited_layer_set.subscribe(subscriber);
    }

    // ------------------------------------------------------------------
    // Layer operations
    // ------------------------------------------------------------------

    /// Create a shape layer and append it to the root.
    ///
    /// Fires a cancelable before-event first; a prevented append fails with
    /// the collaborator-supplied reason. With a `start` event the shape
    /// immediately receives its first click, so a toolbar press-drag places
    /// the first vertex in the same gesture.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        start: Option<PointerEvent>,
        display: &mut DisplayList,
        viewport: &Viewport,
        hooks: &mut Hooks,
    ) -> Result<LayerId, CoreError> {
        let mut event = BeforeLayerAppendEvent::new(kind, start);
        self.before_layer_append.fire(&mut event);
        if event.default_prevented() {
            let reason = event.prevent_reason().unwrap_or(PreventReason::Invalid);
            log::debug!("scene: {kind} append prevented: {reason}");
            return Err(CoreError::prevented(reason));
        }

        let world = start.map(|event| viewport.to_world(event.position));
        let name = format!("Layer {}", self.store.root_children().len());
        let mut container =
            Container::new(kind, self.palette, self.change_delay, display, viewport, world);
        container
            .geometry_mut()
            .set_equilateral(self.interaction.equilateral());

        let id = self.store.insert(Layer::shape(name, container));
        self.store.append_child(self.store.root(), id, display, hooks);
        self.set_current_edited_layer(Some(id));
        log::debug!("scene: added {kind} layer {id}");
        Ok(id)
    }

    /// Move every selected root layer under a new group and append the group
    /// to the root.
    ///
    /// With a mask, every grouped layer except the last carries it; the last
    /// one stays unmasked as the base the others apply against. Policy
    /// checks (minimum selection size, no nested groups) belong to the
    /// calling collaborator.
    pub fn create_group_with_selected_layers(
        &mut self,
        mask: Option<MaskType>,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) -> LayerId {
        let selected = self.store.selected_root_layers();
        let group = self
            .store
            .insert(Layer::group("Group 1", LayerGroup::new(display)));

        let last = selected.len().saturating_sub(1);
        for (index, id) in selected.iter().copied().enumerate() {
            self.store.set_parent(id, group, display, hooks);
            if let Some(mask) = mask {
                if index != last {
                    self.store.set_mask(id, Some(mask), hooks);
                }
            }
        }

        self.store.append_child(self.store.root(), group, display, hooks);
        self.set_current_edited_layer(Some(group));
        log::debug!("scene: grouped {} selected layers into {group}", selected.len());
        group
    }

    /// Remove a layer and its whole subtree: render nodes, store records and
    /// any current/hover reference into the subtree.
    pub fn remove_layer(
        &mut self,
        id: LayerId,
        display: &mut DisplayList,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        if self.store.is_root(id) {
            log::warn!("scene: refusing to remove the root layer");
            return;
        }
        let Some(frame) = self.store.get(id).map(Layer::frame) else {
            return;
        };

        let subtree = self.store.collect_subtree(id);
        self.store.detach(id, display, hooks);
        display.dispose(frame);
        for member in &subtree {
            self.store.remove_record(*member);
        }

        if self.current_layer.is_some_and(|current| subtree.contains(&current)) {
            // Cancelable; a veto leaves the stale id behind, which is
            // harmless because every lookup goes through the store.
            self.set_current_layer(None);
        }
        if self
            .current_edited_layer
            .is_some_and(|edited| subtree.contains(&edited))
        {
            self.set_current_edited_layer(None);
        }
        if self.hovered.is_some_and(|hovered| subtree.contains(&hovered)) {
            self.hovered = None;
        }
        range_select.clear_border_shape(display);
        log::debug!("scene: removed layer {id} ({} records)", subtree.len());
    }

    /// Clone a shape layer: same name, same control points, appended to the
    /// root in the idle stage. Groups are not cloned; the same layer comes
    /// back.
    pub fn duplicate_layer(
        &mut self,
        id: LayerId,
        display: &mut DisplayList,
        viewport: &Viewport,
        hooks: &mut Hooks,
    ) -> Option<LayerId> {
        let (name, kind, points) = {
            let layer = self.store.get(id)?;
            match layer.as_shape() {
                None => return Some(id),
                Some(container) => (
                    layer.name().to_string(),
                    container.geometry().kind(),
                    container.geometry().project().points,
                ),
            }
        };

        let mut copy =
            Container::new(kind, self.palette, self.change_delay, display, viewport, None);
        copy.geometry_mut()
            .set_equilateral(self.interaction.equilateral());
        for point in points {
            copy.geometry_mut()
                .add_point(Point::new(point[0], point[1]), display, viewport);
        }
        copy.geometry_mut().stop(display, viewport);

        let duplicate = self.store.insert(Layer::shape(name, copy));
        self.store
            .append_child(self.store.root(), duplicate, display, hooks);
        log::debug!("scene: duplicated layer {id} as {duplicate}");
        Some(duplicate)
    }

    /// Make `layer` current. Fires the cancelable before-event first and
    /// reports whether the change went through.
    pub fn set_current_layer(&mut self, layer: Option<LayerId>) -> bool {
        let mut event = CurrentLayerSetEvent::new(layer);
        self.before_current_layer_set.fire(&mut event);
        if event.default_prevented() {
            log::debug!("scene: current layer change prevented");
            return false;
        }

        self.current_layer = layer;
        self.last_focused = layer;
        let mut did = CurrentLayerSetEvent::new(layer);
        self.current_layer_set.fire(&mut did);
        true
    }

    /// Unconditional focus variant used during active editing.
    pub fn set_current_edited_layer(&mut self, layer: Option<LayerId>) -> bool {
        self.current_edited_layer = layer;
        self.last_focused = layer;
        let mut event = CurrentLayerSetEvent::new(layer);
        self.current_edited_layer_set.fire(&mut event);
        true
    }

    // ------------------------------------------------------------------
    // Layer field writes
    // ------------------------------------------------------------------

    pub fn set_layer_name(&mut self, id: LayerId, name: impl Into<String>, hooks: &mut Hooks) {
        self.store.set_name(id, name, hooks);
    }

    pub fn set_layer_hidden(
        &mut self,
        id: LayerId,
        hidden: bool,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) {
        self.store.set_hidden(id, hidden, display, hooks);
    }

    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool, hooks: &mut Hooks) {
        self.store.set_locked(id, locked, hooks);
    }

    pub fn set_layer_mask(&mut self, id: LayerId, mask: Option<MaskType>, hooks: &mut Hooks) {
        self.store.set_mask(id, mask, hooks);
    }

    pub fn set_layer_parent(
        &mut self,
        child: LayerId,
        parent: LayerId,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) {
        self.store.set_parent(child, parent, display, hooks);
    }

    /// Write the selected flag (cascading into the shape palette) and keep
    /// the aggregate selection outline in step.
    pub fn set_layer_selected(
        &mut self,
        id: LayerId,
        selected: bool,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        self.store.set_selected(id, selected, display, viewport, hooks);
        self.draw_select_preview_shape(display, viewport, range_select);
    }

    /// Redraw the outline around the union of all selected root layers, or
    /// clear it when nothing is selected.
    pub fn draw_select_preview_shape(
        &mut self,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
    ) {
        let selected = self.store.selected_root_layers();
        if selected.is_empty() {
            range_select.clear_border_shape(display);
            return;
        }

        let mut bounds: Option<Rect> = None;
        for id in selected {
            let Some(frame) = self.store.get(id).map(Layer::frame) else {
                continue;
            };
            let Some(layer_bounds) = display.local_bounds(frame) else {
                continue;
            };
            bounds = Some(match bounds {
                Some(acc) => acc.union(layer_bounds),
                None => layer_bounds,
            });
        }
        match bounds {
            Some(bounds) => range_select.draw_border_shape(bounds, display, viewport),
            None => range_select.clear_border_shape(display),
        }
    }

    // ------------------------------------------------------------------
    // Interaction policy
    // ------------------------------------------------------------------

    pub fn set_can_navigate(&mut self, value: bool, viewport: &mut Viewport) {
        self.interaction.set_can_navigate(value, viewport);
    }

    /// Toggle the equal-extents constraint on every geometry, current and
    /// future.
    pub fn set_can_equilateral(&mut self, value: bool) {
        self.interaction.set_equilateral(value);
        let ids = self.store.collect_subtree(self.store.root());
        for id in ids {
            if let Some(geometry) = self.store.geometry_mut(id) {
                geometry.set_equilateral(value);
            }
        }
    }

    /// Re-derive every zoom-dependent size (stroke widths, handle radii,
    /// viewport-sized hit areas) and the selection outline after the zoom
    /// changed.
    pub(crate) fn refresh_zoom(
        &mut self,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
    ) {
        let ids = self.store.collect_subtree(self.store.root());
        for id in ids {
            if let Some(geometry) = self.store.geometry_mut(id) {
                geometry.refresh_zoom(display, viewport);
            }
        }
        self.draw_select_preview_shape(display, viewport, range_select);
    }

    /// Keyboard nudge of the focused layer by one on-screen pixel.
    pub fn nudge_current(
        &mut self,
        direction: NudgeDirection,
        display: &mut DisplayList,
        viewport: &Viewport,
    ) {
        let Some(id) = self.current_layer.or(self.current_edited_layer) else {
            return;
        };
        if let Some(geometry) = self.store.geometry_mut(id) {
            geometry.nudge(direction, display, viewport);
        }
    }

    /// Programmatic edit-mode entry, the layer-panel counterpart of a
    /// double click on the canvas.
    pub fn enter_edit_mode(&mut self, id: LayerId, display: &mut DisplayList, viewport: &Viewport) {
        if let Some(geometry) = self.store.geometry_mut(id) {
            geometry.enter_edit_mode(display, viewport);
            self.set_current_edited_layer(Some(id));
        }
    }

    // ------------------------------------------------------------------
    // Texture
    // ------------------------------------------------------------------

    pub fn render_image(
        &mut self,
        path: &str,
        display: &mut DisplayList,
        viewport: &Viewport,
    ) -> Result<bool, CoreError> {
        self.texture.render_image(path, display, self.screen, viewport)
    }

    pub fn render_video(
        &mut self,
        video: Box<dyn VideoSource>,
        display: &mut DisplayList,
        viewport: &Viewport,
    ) -> Result<bool, CoreError> {
        self.texture.render_video(video, display, self.screen, viewport)
    }

    pub fn reset_texture(&mut self, display: &mut DisplayList) {
        self.texture.reset(display);
    }

    // ------------------------------------------------------------------
    // Pointer dispatch
    // ------------------------------------------------------------------

    /// Route a pointer press.
    ///
    /// Navigation swallows the press. A geometry mid-draw or in edit mode
    /// owns it outright, so vertex placement and handle grabs keep working
    /// when other shapes sit under the cursor. An existing selection turns
    /// the press into a group-drag start (inside) or a deselect plus fresh
    /// range-select (outside). Otherwise the topmost shape under the cursor
    /// receives the click, and a miss anchors the rubber band.
    pub fn pointer_down(
        &mut self,
        event: PointerEvent,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        self.interaction.notify_pointer_down(event);
        self.clicks.click(event);
        if self.interaction.can_navigate() {
            return;
        }

        let world = viewport.to_world(event.position);
        if let Some(id) = self.current_edited_layer {
            let drawing = self
                .store
                .geometry(id)
                .is_some_and(|geometry| geometry.stage() == Stage::Drawing);
            if drawing {
                if self.ensure_current(id) {
                    if let Some(geometry) = self.store.geometry_mut(id) {
                        geometry.click(world, display, viewport);
                    }
                }
                return;
            }
        }

        let selected = self.store.selected_root_layers();
        if !selected.is_empty() {
            let inside = selected.iter().any(|id| {
                self.store
                    .geometry(*id)
                    .is_some_and(|geometry| geometry.contains(world, display))
            });
            if inside {
                for id in &selected {
                    if let Some(geometry) = self.store.geometry_mut(*id) {
                        geometry.begin_group_drag(world);
                    }
                }
                self.group_dragging = true;
                return;
            }

            for id in &selected {
                self.store.set_selected(*id, false, display, viewport, hooks);
            }
            self.draw_select_preview_shape(display, viewport, range_select);
            range_select.start(world, display, viewport);
            return;
        }

        if let Some(id) = self.find_geometry_by_coordinate(world, display) {
            if self.ensure_current(id) {
                if let Some(geometry) = self.store.geometry_mut(id) {
                    geometry.click(world, display, viewport);
                }
            }
            return;
        }
        range_select.start(world, display, viewport);
    }

    /// Route a pointer move: group drag, rubber band, or the focused shape.
    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        self.interaction.notify_pointer_move(event);
        let world = viewport.to_world(event.position);

        if !self.interaction.can_navigate() && !range_select.is_active() && !self.group_dragging {
            self.synthesize_hover(world, display, viewport);
        }

        if self.group_dragging
            && self.interaction.can_move_selected_layers()
            && !range_select.is_active()
        {
            let selected = self.store.selected_root_layers();
            for id in selected {
                if let Some(geometry) = self.store.geometry_mut(id) {
                    geometry.dynamic_move(world, display, viewport);
                }
            }
            self.draw_select_preview_shape(display, viewport, range_select);
            return;
        }

        if let Some(bounds) = range_select.update(world, display, viewport) {
            self.handle_select_bounds(bounds, display, viewport, range_select, hooks);
            return;
        }

        if let Some(id) = self.current_edited_layer.or(self.current_layer) {
            if let Some(geometry) = self.store.geometry_mut(id) {
                geometry.pointer_move(world, display, viewport);
            }
        }
    }

    /// Route a pointer release.
    ///
    /// Every selected layer settles first so the release hit-test runs
    /// against fresh hit areas. A release outside the whole selection
    /// deselects it and clears focus; an active rubber band ends; and the
    /// focused geometry (the edited layer first, then the current one)
    /// finishes its own gesture last.
    pub fn pointer_up(
        &mut self,
        event: PointerEvent,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        self.interaction.notify_pointer_up(event);
        self.group_dragging = false;

        let world = viewport.to_world(event.position);
        let selected = self.store.selected_root_layers();
        for id in &selected {
            if let Some(geometry) = self.store.geometry_mut(*id) {
                geometry.stop(display, viewport);
            }
        }

        let inside_any = selected.iter().any(|id| {
            self.store
                .geometry(*id)
                .is_some_and(|geometry| geometry.contains(world, display))
        });
        if !selected.is_empty() && !range_select.is_active() && !inside_any {
            for id in &selected {
                self.store.set_selected(*id, false, display, viewport, hooks);
            }
            self.draw_select_preview_shape(display, viewport, range_select);
            self.set_current_layer(None);
            self.set_current_edited_layer(None);
        }

        if range_select.is_active() {
            range_select.end(display);
            return;
        }

        // Handle drags can outlive the current slot, so settle them wherever
        // they are before the focused shape resolves its own release.
        let ids = self.store.collect_subtree(self.store.root());
        for id in ids {
            let dragging = self
                .store
                .geometry(id)
                .is_some_and(|geometry| geometry.active_point().is_some());
            if dragging {
                if let Some(geometry) = self.store.geometry_mut(id) {
                    geometry.end_point_drag(display, viewport);
                }
            }
        }

        if let Some(id) = self.current_edited_layer.or(self.current_layer) {
            let stage = self.store.geometry(id).map(Geometry::stage);
            if let Some(geometry) = self.store.geometry_mut(id) {
                geometry.pointer_up(world, display, viewport);
            }
            if stage == Some(Stage::Dragging) {
                if let Some(geometry) = self.store.geometry_mut(id) {
                    geometry.hide_all_points(display);
                }
                self.set_current_layer(None);
                self.set_current_edited_layer(None);
            }
        }
    }

    /// The pointer left the canvas: finish any rubber band and drop hover.
    pub fn pointer_out(
        &mut self,
        event: PointerEvent,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
    ) {
        self.interaction.notify_pointer_out(event);
        range_select.end(display);
        if let Some(previous) = self.hovered.take() {
            if let Some(geometry) = self.store.geometry_mut(previous) {
                geometry.pointer_out(display, viewport);
            }
        }
    }

    pub fn pointer_over(&mut self, event: PointerEvent) {
        self.interaction.notify_pointer_over(event);
    }

    /// Advance the scene's timers: resolve pending multi-clicks and settle
    /// debounced change notifications.
    pub fn tick(
        &mut self,
        display: &mut DisplayList,
        viewport: &Viewport,
        hooks: &mut Hooks,
    ) {
        if let Some((count, event)) = self.clicks.poll() {
            if count == 2 {
                let world = viewport.to_world(event.position);
                if let Some(id) = self.find_geometry_by_coordinate(world, display) {
                    if self.ensure_current(id) {
                        if let Some(geometry) = self.store.geometry_mut(id) {
                            geometry.double_click(display, viewport);
                        }
                        self.set_current_edited_layer(Some(id));
                    }
                }
            }
        }

        let ids = self.store.collect_subtree(self.store.root());
        for id in ids {
            let settled = self
                .store
                .geometry_mut(id)
                .is_some_and(Geometry::poll_change);
            if settled {
                if let Some(layer) = self.store.get(id) {
                    hooks.layer.on_update_layer(layer);
                }
            }
        }
    }

    /// Select every root layer whose bounds overlap the rubber band, and
    /// deselect the ones that no longer do. Overlap needs an edge strictly
    /// inside the band's span on both axes; touching a boundary does not
    /// count.
    pub(crate) fn handle_select_bounds(
        &mut self,
        bounds: Rect,
        display: &mut DisplayList,
        viewport: &Viewport,
        range_select: &mut RangeSelect,
        hooks: &mut Hooks,
    ) {
        let ids = self.store.root_children().to_vec();
        for id in ids {
            let Some(frame) = self.store.get(id).map(Layer::frame) else {
                continue;
            };
            let Some(layer_bounds) = display.local_bounds(frame) else {
                continue;
            };

            let horizontal = strictly_within(layer_bounds.left(), bounds.left(), bounds.right())
                || strictly_within(layer_bounds.right(), bounds.left(), bounds.right());
            let vertical = strictly_within(layer_bounds.top(), bounds.top(), bounds.bottom())
                || strictly_within(layer_bounds.bottom(), bounds.top(), bounds.bottom());
            let overlap = horizontal && vertical;

            let selected = self.store.get(id).is_some_and(Layer::selected);
            if overlap != selected {
                self.store.set_selected(id, overlap, display, viewport, hooks);
            }
        }
        self.draw_select_preview_shape(display, viewport, range_select);
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    pub fn project(&self) -> SceneProjection {
        SceneProjection {
            texture: self.texture.projection(),
            layers: self
                .store
                .root_children()
                .iter()
                .filter_map(|id| self.store.project(*id))
                .collect(),
        }
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    /// Topmost visible shape whose hit area contains `world`. Z-order is
    /// insertion order, so the scan runs back to front.
    fn find_geometry_by_coordinate(&self, world: Point, display: &DisplayList) -> Option<LayerId> {
        self.store.root_children().iter().rev().copied().find(|&id| {
            let Some(layer) = self.store.get(id) else {
                return false;
            };
            !layer.hidden()
                && layer
                    .geometry()
                    .is_some_and(|geometry| geometry.contains(world, display))
        })
    }

    /// A shape only receives clicks once it holds the current slot (or the
    /// scene has current-claiming disabled). Collaborators can veto the
    /// claim, which swallows the click.
    fn ensure_current(&mut self, id: LayerId) -> bool {
        if self.current_layer == Some(id) || !self.interaction.interactive_children() {
            return true;
        }
        self.set_current_layer(Some(id))
    }

    fn synthesize_hover(&mut self, world: Point, display: &mut DisplayList, viewport: &Viewport) {
        let hit = self.find_geometry_by_coordinate(world, display);
        if hit == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            if let Some(geometry) = self.store.geometry_mut(previous) {
                geometry.pointer_out(display, viewport);
            }
        }
        if let Some(next) = hit {
            if let Some(geometry) = self.store.geometry_mut(next) {
                geometry.pointer_over(display, viewport);
            }
        }
        self.hovered = hit;
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("current_layer", &self.current_layer)
            .field("current_edited_layer", &self.current_edited_layer)
            .field("last_focused", &self.last_focused)
            .field("group_dragging", &self.group_dragging)
            .finish_non_exhaustive()
    }
}

fn strictly_within(value: f32, low: f32, high: f32) -> bool {
    value > low && value < high
}
