//! vecmark_display - retained display tree and draw-primitive vocabulary
//!
//! This crate is the render boundary of the vecmark engine: a node arena
//! with recorded draw commands, hit areas and bounds aggregation. It does
//! no rasterization; the hosting renderer walks the recorded primitives.

mod color;
mod event;
mod graphics;
mod hit;
mod math;
mod node;

pub use color::Color;
pub use event::{PointerButton, PointerEvent};
pub use graphics::{DrawCommand, Graphics, LineStyle, PaintStyle};
pub use hit::HitArea;
pub use math::{Point, Rect};
pub use node::{DisplayList, DisplayNode, NodeId};
