//! Recorded vector drawing.
//!
//! A `Graphics` is a retained list of draw commands. The engine records
//! shapes into it; the hosting renderer walks `commands()` each frame and
//! rasterizes them with whatever backend it owns. Bounds are geometric
//! (stroke width does not inflate them).

use crate::color::Color;
use crate::math::{Point, Rect};

/// Stroke style for outlined primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Fill + stroke for one primitive. Either part may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaintStyle {
    pub fill: Option<Color>,
    pub line: Option<LineStyle>,
}

impl PaintStyle {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            line: None,
        }
    }

    pub fn stroke(width: f32, color: Color) -> Self {
        Self {
            fill: None,
            line: Some(LineStyle::new(width, color)),
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, width: f32, color: Color) -> Self {
        self.line = Some(LineStyle::new(width, color));
        self
    }
}

/// One recorded primitive, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        style: PaintStyle,
    },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        style: PaintStyle,
    },
    Circle {
        center: Point,
        radius: f32,
        style: PaintStyle,
    },
    Polygon {
        vertices: Vec<Point>,
        closed: bool,
        style: PaintStyle,
    },
    Segment {
        from: Point,
        to: Point,
        style: PaintStyle,
    },
}

impl DrawCommand {
    /// Geometric bounds of this primitive, if it covers any area.
    fn bounds(&self) -> Option<Rect> {
        match self {
            DrawCommand::Rect { rect, .. } => Some(rect.normalized()),
            DrawCommand::Ellipse {
                center,
                radius_x,
                radius_y,
                ..
            } => Some(Rect::new(
                center.x - radius_x.abs(),
                center.y - radius_y.abs(),
                radius_x.abs() * 2.0,
                radius_y.abs() * 2.0,
            )),
            DrawCommand::Circle { center, radius, .. } => Some(Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            )),
            DrawCommand::Polygon { vertices, .. } => bounds_of(vertices),
            DrawCommand::Segment { from, to, .. } => Some(Rect::from_points(*from, *to).normalized()),
        }
    }
}

/// Min/max fold over a vertex list.
fn bounds_of(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// A retained command list owned by one display node.
#[derive(Debug, Clone, Default)]
pub struct Graphics {
    commands: Vec<DrawCommand>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn draw_rect(&mut self, rect: Rect, style: PaintStyle) {
        self.commands.push(DrawCommand::Rect { rect, style });
    }

    pub fn draw_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, style: PaintStyle) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            style,
        });
    }

    pub fn draw_circle(&mut self, center: Point, radius: f32, style: PaintStyle) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style,
        });
    }

    pub fn draw_polygon(&mut self, vertices: Vec<Point>, closed: bool, style: PaintStyle) {
        self.commands.push(DrawCommand::Polygon {
            vertices,
            closed,
            style,
        });
    }

    pub fn draw_segment(&mut self, from: Point, to: Point, style: PaintStyle) {
        self.commands.push(DrawCommand::Segment { from, to, style });
    }

    /// Bounds of all recorded commands, `None` when nothing is drawn.
    pub fn local_bounds(&self) -> Option<Rect> {
        let mut acc: Option<Rect> = None;
        for command in &self.commands {
            if let Some(bounds) = command.bounds() {
                acc = Some(match acc {
                    Some(current) => current.union(bounds),
                    None => bounds,
                });
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_bounds_unions_commands() {
        let mut graphics = Graphics::new();
        graphics.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), PaintStyle::default());
        graphics.draw_circle(Point::new(30.0, 5.0), 5.0, PaintStyle::default());
        let bounds = graphics.local_bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 35.0, 10.0));
    }

    #[test]
    fn test_local_bounds_of_signed_rect() {
        let mut graphics = Graphics::new();
        graphics.draw_rect(
            Rect::new(100.0, 100.0, -40.0, -20.0),
            PaintStyle::default(),
        );
        assert_eq!(
            graphics.local_bounds().unwrap(),
            Rect::new(60.0, 80.0, 40.0, 20.0)
        );
    }

    #[test]
    fn test_empty_graphics_has_no_bounds() {
        assert!(Graphics::new().local_bounds().is_none());
    }

    #[test]
    fn test_clear_drops_commands() {
        let mut graphics = Graphics::new();
        graphics.draw_segment(Point::ZERO, Point::new(1.0, 1.0), PaintStyle::default());
        graphics.clear();
        assert!(graphics.is_empty());
    }
}
