//! Axis-aligned rectangle

use serde::{Deserialize, Serialize};

use super::vector::{Point, Vector2};

/// Axis-aligned box with an upper-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const EMPTY: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.half_width(), self.y + self.half_height())
    }

    /// True only when both dimensions are non-positive
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    /// Edge-inclusive point containment
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow (or shrink) the size, never below zero
    pub fn inflate(&mut self, horizontal: f64, vertical: f64) {
        self.width = (self.width + horizontal).max(0.0);
        self.height = (self.height + vertical).max(0.0);
    }

    /// Overlap with another rectangle
    ///
    /// Returns the penetration depth on each axis (both positive), or `None`
    /// when the boxes are separated or only touching.
    pub fn intersects(&self, other: &Rectangle) -> Option<Vector2> {
        let delta = self.center() - other.center();
        let combined_half_widths = self.half_width() + other.half_width();
        let combined_half_heights = self.half_height() + other.half_height();

        if delta.x.abs() < combined_half_widths && delta.y.abs() < combined_half_heights {
            Some(Vector2::new(
                combined_half_widths - delta.x.abs(),
                combined_half_heights - delta.y.abs(),
            ))
        } else {
            None
        }
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap_amount() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersects(&b), Some(Vector2::new(5.0, 5.0)));
        // Symmetric magnitudes
        assert_eq!(b.intersects(&a), Some(Vector2::new(5.0, 5.0)));
    }

    #[test]
    fn test_intersects_separated() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(20.0, 20.0, 5.0, 5.0);
        assert_eq!(a.intersects(&b), None);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersects(&b), None);
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(0.0, 5.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_inflate_clamps_to_zero() {
        let mut r = Rectangle::new(0.0, 0.0, 10.0, 4.0);
        r.inflate(-20.0, 2.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 6.0);
        assert!(!r.is_empty());
        r.inflate(0.0, -10.0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rectangle::new(2.0, 3.0, 10.0, 20.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 23.0);
        assert_eq!(r.center(), Point::new(7.0, 13.0));
    }
}
