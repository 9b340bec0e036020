//! Core 2D math types shared by the display tree and its consumers.
//!
//! `Rect` deliberately allows negative `width`/`height`: shapes dragged
//! up/left keep their signed extents in storage, and only containment and
//! bounds queries normalize the span.

use serde::{Deserialize, Serialize};

/// A 2D point in screen or world coordinates, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle with signed extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The signed rectangle spanned from `a` to `b`.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    /// Leftmost edge of the normalized span.
    pub fn left(&self) -> f32 {
        self.x.min(self.x + self.width)
    }

    /// Rightmost edge of the normalized span.
    pub fn right(&self) -> f32 {
        self.x.max(self.x + self.width)
    }

    /// Topmost edge of the normalized span.
    pub fn top(&self) -> f32 {
        self.y.min(self.y + self.height)
    }

    /// Bottommost edge of the normalized span.
    pub fn bottom(&self) -> f32 {
        self.y.max(self.y + self.height)
    }

    /// The same region with non-negative extents.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            self.left(),
            self.top(),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// Whether the point lies within the normalized span. Degenerate
    /// rectangles (zero width or height) contain nothing.
    pub fn contains(&self, point: Point) -> bool {
        if self.width == 0.0 || self.height == 0.0 {
            return false;
        }
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Smallest normalized rectangle covering both operands.
    pub fn union(&self, other: Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_signed_extents() {
        // Dragged up/left: negative width and height.
        let rect = Rect::from_points(Point::new(110.0, 60.0), Point::new(10.0, 10.0));
        assert!(rect.contains(Point::new(50.0, 30.0)));
        assert!(!rect.contains(Point::new(150.0, 30.0)));
    }

    #[test]
    fn test_rect_degenerate_contains_nothing() {
        let rect = Rect::new(10.0, 10.0, 0.0, 40.0);
        assert!(!rect.contains(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_rect_union_normalizes() {
        let a = Rect::from_points(Point::new(100.0, 100.0), Point::new(0.0, 0.0));
        let b = Rect::new(50.0, 50.0, 100.0, 10.0);
        let union = a.union(b);
        assert_eq!(union, Rect::new(0.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }
}
