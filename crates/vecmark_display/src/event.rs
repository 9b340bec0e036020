//! Pointer events pushed in by the hosting application.

use serde::{Deserialize, Serialize};

use crate::math::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// One pointer sample in *screen* coordinates. The engine converts to
/// world coordinates at its boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self { position, button }
    }

    /// A left-button event at `position`; moves carry the same shape.
    pub fn at(position: Point) -> Self {
        Self::new(position, PointerButton::Left)
    }
}
