//! Hit areas attached to display nodes.
//!
//! A hit area answers containment queries independently of what the node
//! draws, so interaction code can widen or tighten it over a shape's
//! lifecycle without re-recording graphics.

use crate::math::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum HitArea {
    Rect(Rect),
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
    },
    Circle {
        center: Point,
        radius: f32,
    },
    Polygon(Vec<Point>),
}

impl HitArea {
    pub fn contains(&self, point: Point) -> bool {
        match self {
            HitArea::Rect(rect) => rect.contains(point),
            HitArea::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                if *radius_x == 0.0 || *radius_y == 0.0 {
                    return false;
                }
                let nx = (point.x - center.x) / radius_x;
                let ny = (point.y - center.y) / radius_y;
                nx * nx + ny * ny <= 1.0
            }
            HitArea::Circle { center, radius } => {
                *radius > 0.0 && point.distance_to(*center) <= *radius
            }
            HitArea::Polygon(vertices) => polygon_contains(vertices, point),
        }
    }
}

/// Even-odd ray casting. Fewer than 3 vertices cover nothing.
fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
