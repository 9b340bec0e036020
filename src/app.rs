//! Application: the composition root.
//!
//! Owns the display list, viewport, scene and range select, and wires them
//! together under one screen node. Hosts feed raw pointer events and a
//! periodic [`Application::tick`] into it, subscribe to the scene's events,
//! and rasterize from the display list it exposes. Everything else — layer
//! management, textures, zoom — goes through the methods here, which exist
//! mostly to spare hosts the collaborator plumbing the scene requires.

use std::time::Duration;

use vecmark_display::{DisplayList, NodeId, Point, PointerEvent};

use crate::constants::timing;
use crate::error::CoreError;
use crate::event::Hooks;
use crate::geometry::{GeometryPalette, NudgeDirection, ShapeKind};
use crate::layer::{LayerId, MaskType};
use crate::range_select::RangeSelect;
use crate::scene::{Scene, SceneProjection, VideoSource};
use crate::viewport::Viewport;

/// Construction-time knobs. The defaults match the interactive tool this
/// engine was built for; tests mostly shrink the timing windows.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationOptions {
    pub screen_width: f32,
    pub screen_height: f32,
    pub palette: GeometryPalette,
    pub change_delay: Duration,
    pub double_click_window: Duration,
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            palette: GeometryPalette::default(),
            change_delay: timing::CHANGE_GEOMETRY_DELAY,
            double_click_window: timing::DOUBLE_CLICK_DELAY,
        }
    }
}

impl ApplicationOptions {
    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub fn with_palette(mut self, palette: GeometryPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_change_delay(mut self, delay: Duration) -> Self {
        self.change_delay = delay;
        self
    }

    pub fn with_double_click_window(mut self, window: Duration) -> Self {
        self.double_click_window = window;
        self
    }
}

pub struct Application {
    display: DisplayList,
    viewport: Viewport,
    scene: Scene,
    range_select: RangeSelect,
    hooks: Hooks,
    screen: NodeId,
}

impl Application {
    /// Build the engine: screen node, root layer group, range-select nodes.
    /// The texture sprite, when one is installed, slots in under the root
    /// group so annotations always draw above it.
    pub fn new(options: ApplicationOptions, hooks: Hooks) -> Self {
        let mut display = DisplayList::new();
        let screen = display.create_node();
        let viewport = Viewport::new(options.screen_width, options.screen_height);
        let scene = Scene::new(
            &mut display,
            screen,
            options.palette,
            options.change_delay,
            options.double_click_window,
        );
        let range_select = RangeSelect::new(&mut display, screen);
        log::debug!(
            "application: created {}x{} screen",
            options.screen_width,
            options.screen_height
        );

        Self {
            display,
            viewport,
            scene,
            range_select,
            hooks,
            screen,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The recorded node tree. Hosts rasterize from this after each event
    /// batch.
    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn range_select(&self) -> &RangeSelect {
        &self.range_select
    }

    pub fn range_select_mut(&mut self) -> &mut RangeSelect {
        &mut self.range_select
    }

    pub fn screen(&self) -> NodeId {
        self.screen
    }

    /// Replace the host hooks installed at construction.
    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
    }

    pub fn subscribe_zoom_changed(&mut self, subscriber: impl FnMut(&mut f32) + 'static) {
        self.viewport.subscribe_zoom_changed(subscriber);
    }

    // ------------------------------------------------------------------
    // Pointer + timer entry points
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.scene.pointer_down(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range_select,
            &mut self.hooks,
        );
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.scene.pointer_move(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range_select,
            &mut self.hooks,
        );
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.scene.pointer_up(
            event,
            &mut self.display,
            &self.viewport,
            &mut self.range_select,
            &mut self.hooks,
        );
    }

    pub fn pointer_over(&mut self, event: PointerEvent) {
        self.scene.pointer_over(event);
    }

    pub fn pointer_out(&mut self, event: PointerEvent) {
        self.scene
            .pointer_out(event, &mut self.display, &self.viewport, &mut self.range_select);
    }

    /// Advance timers. Call once per host frame.
    pub fn tick(&mut self) {
        self.scene
            .tick(&mut self.display, &self.viewport, &mut self.hooks);
    }

    // ------------------------------------------------------------------
    // Layer operations
    // ------------------------------------------------------------------

    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        start: Option<PointerEvent>,
    ) -> Result<LayerId, CoreError> {
        self.scene
            .add_shape(kind, start, &mut self.display, &self.viewport, &mut self.hooks)
    }

    pub fn create_group_with_selected_layers(&mut self, mask: Option<MaskType>) -> LayerId {
        self.scene
            .create_group_with_selected_layers(mask, &mut self.display, &mut self.hooks)
    }

    pub fn remove_layer(&mut self, id: LayerId) {
        self.scene
            .remove_layer(id, &mut self.display, &mut self.range_select, &mut self.hooks);
    }

    pub fn duplicate_layer(&mut self, id: LayerId) -> Option<LayerId> {
        self.scene
            .duplicate_layer(id, &mut self.display, &self.viewport, &mut self.hooks)
    }

    pub fn set_current_layer(&mut self, layer: Option<LayerId>) -> bool {
        self.scene.set_current_layer(layer)
    }

    pub fn set_current_edited_layer(&mut self, layer: Option<LayerId>) -> bool {
        self.scene.set_current_edited_layer(layer)
    }

    pub fn set_layer_selected(&mut self, id: LayerId, selected: bool) {
        self.scene.set_layer_selected(
            id,
            selected,
            &mut self.display,
            &self.viewport,
            &mut self.range_select,
            &mut self.hooks,
        );
    }

    pub fn set_layer_name(&mut self, id: LayerId, name: impl Into<String>) {
        self.scene.set_layer_name(id, name, &mut self.hooks);
    }

    pub fn set_layer_hidden(&mut self, id: LayerId, hidden: bool) {
        self.scene
            .set_layer_hidden(id, hidden, &mut self.display, &mut self.hooks);
    }

    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) {
        self.scene.set_layer_locked(id, locked, &mut self.hooks);
    }

    pub fn set_layer_mask(&mut self, id: LayerId, mask: Option<MaskType>) {
        self.scene.set_layer_mask(id, mask, &mut self.hooks);
    }

    pub fn set_layer_parent(&mut self, child: LayerId, parent: LayerId) {
        self.scene
            .set_layer_parent(child, parent, &mut self.display, &mut self.hooks);
    }

    pub fn enter_edit_mode(&mut self, id: LayerId) {
        self.scene
            .enter_edit_mode(id, &mut self.display, &self.viewport);
    }

    pub fn nudge(&mut self, direction: NudgeDirection) {
        self.scene
            .nudge_current(direction, &mut self.display, &self.viewport);
    }

    // ------------------------------------------------------------------
    // Interaction policy
    // ------------------------------------------------------------------

    pub fn set_can_navigate(&mut self, value: bool) {
        self.scene.set_can_navigate(value, &mut self.viewport);
    }

    pub fn set_can_equilateral(&mut self, value: bool) {
        self.scene.set_can_equilateral(value);
    }

    pub fn enable_interaction(&mut self) {
        self.scene.interaction_mut().enable();
    }

    pub fn disable_interaction(&mut self) {
        self.scene.interaction_mut().disable();
    }

    pub fn set_can_move_selected_layers(&mut self, permission: impl Fn() -> bool + 'static) {
        self.scene
            .interaction_mut()
            .set_can_move_selected_layers(permission);
    }

    pub fn set_can_start_select(&mut self, permission: impl Fn() -> bool + 'static) {
        self.range_select.set_can_start(permission);
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn set_zoom(&mut self, zoom: f32) {
        self.viewport.set_zoom(zoom);
        self.refresh_after_zoom();
    }

    pub fn zoom_at(&mut self, anchor_screen: Point, zoom: f32) {
        self.viewport.zoom_at(anchor_screen, zoom);
        self.refresh_after_zoom();
    }

    pub fn fit(&mut self, width: f32, height: f32) {
        self.viewport.fit(width, height);
        self.refresh_after_zoom();
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(delta);
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.viewport.set_screen_size(width, height);
        self.refresh_after_zoom();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.refresh_after_zoom();
    }

    fn refresh_after_zoom(&mut self) {
        self.scene
            .refresh_zoom(&mut self.display, &self.viewport, &mut self.range_select);
    }

    // ------------------------------------------------------------------
    // Texture
    // ------------------------------------------------------------------

    pub fn render_image(&mut self, path: &str) -> Result<bool, CoreError> {
        self.scene
            .render_image(path, &mut self.display, &self.viewport)
    }

    pub fn render_video(&mut self, video: Box<dyn VideoSource>) -> Result<bool, CoreError> {
        self.scene
            .render_video(video, &mut self.display, &self.viewport)
    }

    pub fn reset_texture(&mut self) {
        self.scene.reset_texture(&mut self.display);
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    pub fn project(&self) -> SceneProjection {
        self.scene.project()
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("screen", &self.screen)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
