//! Background texture management.
//!
//! At most one texture is on the canvas at a time: the image or video frame
//! being annotated. The engine records its world footprint as a sprite node
//! at the bottom of the screen's child list and leaves rasterization to the
//! host. Installing a new texture fires a cancelable "before set" event and
//! then tears the previous one down, so two textures are never current at
//! once.

use serde::Serialize;
use vecmark_display::{Color, DisplayList, NodeId, PaintStyle, Rect};

use crate::error::CoreError;
use crate::event::{CurrentTextureSetEvent, Emitter};
use crate::viewport::Viewport;

/// Host-side video handle. The engine needs its pixel dimensions, a source
/// identifier for serialization, and the ability to pause playback during
/// teardown.
pub trait VideoSource {
    fn dimensions(&self) -> (u32, u32);
    fn source(&self) -> String;
    fn pause(&mut self);
}

/// Serialized form of the current texture.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureProjection {
    pub source: String,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub original_width: u32,
    pub original_height: u32,
}

struct InstalledTexture {
    sprite: NodeId,
    source: String,
    original_width: u32,
    original_height: u32,
    viewport_width: f32,
    viewport_height: f32,
    video: Option<Box<dyn VideoSource>>,
}

pub struct SceneTexture {
    current: Option<InstalledTexture>,
    before_texture_set: Emitter<CurrentTextureSetEvent>,
    texture_set: Emitter<Option<String>>,
}

impl SceneTexture {
    pub(crate) fn new() -> Self {
        Self {
            current: None,
            before_texture_set: Emitter::new(),
            texture_set: Emitter::new(),
        }
    }

    pub fn has_texture(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_source(&self) -> Option<&str> {
        self.current.as_ref().map(|texture| texture.source.as_str())
    }

    pub(crate) fn sprite(&self) -> Option<NodeId> {
        self.current.as_ref().map(|texture| texture.sprite)
    }

    pub fn subscribe_before_texture_set(
        &mut self,
        subscriber: impl FnMut(&mut CurrentTextureSetEvent) + 'static,
    ) {
        self.before_texture_set.subscribe(subscriber);
    }

    /// Fired with `Some(source)` after an install and `None` after a reset.
    pub fn subscribe_texture_set(&mut self, subscriber: impl FnMut(&mut Option<String>) + 'static) {
        self.texture_set.subscribe(subscriber);
    }

    /// Probe the image at `path` and install it as the current texture.
    ///
    /// Returns `Ok(false)` when a collaborator prevents the install; the
    /// previous texture stays untouched in that case.
    pub fn render_image(
        &mut self,
        path: &str,
        display: &mut DisplayList,
        screen: NodeId,
        viewport: &Viewport,
    ) -> Result<bool, CoreError> {
        let (width, height) = image::image_dimensions(path)?;
        self.install(path.to_string(), width, height, None, display, screen, viewport)
    }

    /// Install a host-provided video as the current texture. The host must
    /// only hand over a video whose data has loaded, so its dimensions are
    /// known.
    pub fn render_video(
        &mut self,
        video: Box<dyn VideoSource>,
        display: &mut DisplayList,
        screen: NodeId,
        viewport: &Viewport,
    ) -> Result<bool, CoreError> {
        let (width, height) = video.dimensions();
        let source = video.source();
        self.install(source, width, height, Some(video), display, screen, viewport)
    }

    /// Clear the current texture without installing a replacement.
    pub fn reset(&mut self, display: &mut DisplayList) {
        if self.current.is_none() {
            return;
        }
        self.teardown(display);
        self.texture_set.fire(&mut None);
    }

    pub(crate) fn projection(&self) -> Option<TextureProjection> {
        self.current.as_ref().map(|texture| TextureProjection {
            source: texture.source.clone(),
            viewport_width: texture.viewport_width,
            viewport_height: texture.viewport_height,
            original_width: texture.original_width,
            original_height: texture.original_height,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn install(
        &mut self,
        source: String,
        original_width: u32,
        original_height: u32,
        video: Option<Box<dyn VideoSource>>,
        display: &mut DisplayList,
        screen: NodeId,
        viewport: &Viewport,
    ) -> Result<bool, CoreError> {
        if original_width == 0 || original_height == 0 {
            return Err(CoreError::texture_failed(format!(
                "texture {source} reports zero dimensions"
            )));
        }

        let mut event = CurrentTextureSetEvent::new(Some(source.clone()));
        self.before_texture_set.fire(&mut event);
        if event.default_prevented() {
            log::debug!("texture install prevented: source = {source}");
            return Ok(false);
        }

        self.teardown(display);

        // The sprite fills the screen's width in world units; height keeps
        // the source aspect.
        let viewport_width = viewport.screen_width();
        let viewport_height = viewport_width * original_height as f32 / original_width as f32;

        let sprite = display.create_node();
        if let Some(node) = display.node_mut(sprite) {
            node.graphics_mut().draw_rect(
                Rect::new(0.0, 0.0, viewport_width, viewport_height),
                PaintStyle::fill(Color::TRANSPARENT),
            );
        }
        display.add_child_at(screen, sprite, 0);

        log::debug!(
            "texture installed: source = {source}, original = {original_width}x{original_height}"
        );
        self.current = Some(InstalledTexture {
            sprite,
            source: source.clone(),
            original_width,
            original_height,
            viewport_width,
            viewport_height,
            video,
        });
        self.texture_set.fire(&mut Some(source));
        Ok(true)
    }

    fn teardown(&mut self, display: &mut DisplayList) {
        if let Some(mut installed) = self.current.take() {
            if let Some(video) = installed.video.as_mut() {
                video.pause();
            }
            display.dispose(installed.sprite);
        }
    }
}

impl std::fmt::Debug for SceneTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneTexture")
            .field("source", &self.current_source())
            .finish_non_exhaustive()
    }
}
