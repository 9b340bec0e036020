//! Engine constants: world clamps, gesture timing, palettes, handle
//! metrics. Centralized so interaction code and tests share one source of
//! truth.

use vecmark_display::Color;

/// World-extent clamps applied to the viewport, in world units.
pub mod world {
    /// Largest visible world width after a zoom-out.
    pub const WIDTH_MAX: f32 = 25_000.0;
    /// Largest visible world height after a zoom-out.
    pub const HEIGHT_MAX: f32 = 20_000.0;
    /// Smallest visible world width after a zoom-in.
    pub const WIDTH_MIN: f32 = 10.0;
    /// Smallest visible world height after a zoom-in.
    pub const HEIGHT_MIN: f32 = 10.0;
    /// Home pan offset restored by `Viewport::reset`.
    pub const HOME_OFFSET: (f32, f32) = (40.0, 40.0);
    /// Home zoom restored by `Viewport::reset`.
    pub const HOME_ZOOM: f32 = 1.0;
}

/// Gesture and notification timing.
pub mod timing {
    use std::time::Duration;

    /// Quiet period before a geometry "did update" notification fires.
    pub const CHANGE_GEOMETRY_DELAY: Duration = Duration::from_millis(500);
    /// Window in which pointer-downs count toward a multi-click.
    pub const DOUBLE_CLICK_DELAY: Duration = Duration::from_millis(200);
}

/// Point-handle metrics, in screen units (converted to world units through
/// `Viewport::scale` at draw time).
pub mod handle {
    /// Control/shadow point circle radius.
    pub const RADIUS: f32 = 5.0;
    /// Control/shadow point stroke width.
    pub const LINE_WIDTH: f32 = 3.0;
    /// Grab radius for hitting a point handle.
    pub const HIT_RADIUS: f32 = 10.0;
}

/// Default shape stroke width, screen units.
pub const SHAPE_LINE_WIDTH: f32 = 2.0;

/// Distance under which a new drawing vertex is treated as a duplicate of
/// the previous one, in world units. Keeps the two clicks of a closing
/// double-click from stacking vertices.
pub const DUPLICATE_VERTEX_EPSILON: f32 = 1.0;

/// Screen distance above which a pointer-down starts a new click gesture
/// instead of extending the previous one. A double-click has to land
/// roughly where its first click did.
pub const MULTI_CLICK_SLOP: f32 = 10.0;

/// Default colors.
pub mod palette {
    use super::Color;

    /// Shape fill.
    pub fn shape_fill() -> Color {
        Color::rgb8(3, 132, 252).with_alpha(0.35)
    }

    /// Shape stroke.
    pub fn shape_line() -> Color {
        Color::rgb8(3, 240, 252)
    }

    /// Shape fill while hovered (the highlight overlay).
    pub fn shape_fill_hover() -> Color {
        Color::WHITE
    }

    /// Shape stroke while hovered.
    pub fn shape_line_hover() -> Color {
        Color::rgb8(3, 240, 252)
    }

    /// Control point fill.
    pub fn control_fill() -> Color {
        Color::WHITE
    }

    /// Control point stroke.
    pub fn control_line() -> Color {
        Color::rgb8(3, 132, 252)
    }

    /// Shadow point fill.
    pub fn shadow_fill() -> Color {
        Color::WHITE.with_alpha(0.6)
    }

    /// Shadow point stroke.
    pub fn shadow_line() -> Color {
        Color::rgb8(141, 140, 140)
    }

    /// Point fill while being dragged.
    pub fn point_drag_fill() -> Color {
        Color::rgb8(141, 140, 140)
    }

    /// Range-select rubber-band fill (drawn at 0.2 alpha).
    pub fn select_background() -> Color {
        Color::rgb8(3, 132, 252).with_alpha(0.5)
    }

    /// Range-select rubber-band border.
    pub fn select_border() -> Color {
        Color::rgb8(3, 240, 252)
    }
}
