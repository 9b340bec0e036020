//! Vecmark - interactive annotation geometry engine
//!
//! Scene-graph core for drawing, editing and selecting vector shapes over
//! an image or video canvas: layered shapes with grouping and masks, a
//! rubber-band range select, and a pannable, zoomable viewport. The crate
//! renders nothing itself; hosts pump pointer events and a frame tick into
//! [`Application`] and rasterize from the recorded display list.

mod app;
pub mod constants;
mod container;
mod error;
mod event;
mod geometry;
mod layer;
mod range_select;
mod scene;
mod util;
mod viewport;

pub use app::{Application, ApplicationOptions};
pub use container::{Container, ContainerGroup};
pub use error::CoreError;
pub use event::{
    BeforeLayerAppendEvent, CurrentLayerSetEvent, CurrentTextureSetEvent, Emitter, Hooks,
    LayerHooks, PreventReason, RangeSelectEvent, RootHooks,
};
pub use geometry::{
    ControlPoint, Geometry, GeometryPalette, GeometryProjection, NudgeDirection, PointRole,
    ShapeKind, Stage,
};
pub use layer::{Layer, LayerGroup, LayerId, LayerKind, LayerProjection, LayerStore, MaskType};
pub use range_select::RangeSelect;
pub use scene::{
    Scene, SceneInteraction, SceneProjection, SceneTexture, TextureProjection, VideoSource,
};
pub use viewport::Viewport;

// Hosts drive the engine with these display-boundary types, so surface them
// here rather than forcing a second dependency edge.
pub use vecmark_display::{
    Color, DisplayList, DisplayNode, DrawCommand, Graphics, LineStyle, NodeId, PaintStyle, Point,
    PointerButton, PointerEvent, Rect,
};
