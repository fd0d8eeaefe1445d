//! Circle primitive and circle-vs-circle / circle-vs-segment tests

use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::vector::{GeometryError, Point, Vector2, distance, normalize};

/// A circle stored by the upper-left corner of its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    /// Left edge of the bounding box (not the center)
    pub x: f64,
    /// Top edge of the bounding box (not the center)
    pub y: f64,
}

/// Penetration between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOverlap {
    /// Combined radius minus center distance (always positive)
    pub depth: f64,
    /// Vector from the other circle's center to this circle's center
    pub delta: Vector2,
}

impl Circle {
    pub const fn new(radius: f64, x: f64, y: f64) -> Self {
        Self { radius, x, y }
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
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
        self.y + self.diameter()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.diameter()
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.radius, self.y + self.radius)
    }

    /// Move the circle so its center sits at `center`
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.radius;
        self.y = center.y - self.radius;
    }

    /// Edge-inclusive point containment
    pub fn contains(&self, p: Point) -> bool {
        distance(self.center(), p) <= self.radius
    }

    /// Push the edge out by `amount` (radius never goes negative)
    pub fn inflate(&mut self, amount: f64) {
        self.radius = (self.radius + amount).max(0.0);
    }

    /// Push vector for the degenerate containment cases
    ///
    /// - Same center: direction is undefined, push straight down by the
    ///   combined radius.
    /// - `self` entirely inside a larger `other`: push along the center delta
    ///   far enough that `self` ends up externally tangent.
    ///
    /// `other` inside a larger `self` is not handled here; `intersects`
    /// resolves it.
    pub fn is_inside_circle(&self, other: &Circle) -> Option<Vector2> {
        let center_a = self.center();
        let center_b = other.center();

        if center_a == center_b {
            return Some(Vector2::new(0.0, self.radius + other.radius));
        }

        if self.radius < other.radius {
            let dist = distance(center_a, center_b);
            if dist <= (other.radius - self.radius).abs() {
                let push = self.radius + other.radius - dist;
                return match normalize(center_a - center_b) {
                    Ok(d) => Some(d * push),
                    Err(_) => Some(Vector2::new(0.0, self.radius + other.radius)),
                };
            }
        }

        None
    }

    /// Overlap with another circle, `None` when separated or touching
    pub fn intersects(&self, other: &Circle) -> Option<CircleOverlap> {
        let delta = self.center() - other.center();
        let magnitude = delta.length();
        let combined_radius = self.radius + other.radius;

        if magnitude < combined_radius {
            Some(CircleOverlap {
                depth: combined_radius - magnitude,
                delta,
            })
        } else {
            None
        }
    }

    /// Push-out vector when the circle overlaps a line segment
    ///
    /// Uses the closest point on the segment (end caps included). A circle
    /// centered exactly on the segment is pushed along the segment's normal.
    pub fn intersects_segment(&self, segment: &Segment) -> Result<Option<Vector2>, GeometryError> {
        let dir = segment.direction()?;
        let center = self.center();
        let len = segment.length();

        let t = (center - segment.a).dot(dir).clamp(0.0, len);
        let closest = segment.a + dir * t;
        let offset = center - closest;
        let dist = offset.length();

        if dist >= self.radius {
            return Ok(None);
        }

        let push_dir = match normalize(offset) {
            Ok(d) => d,
            Err(_) => dir.perp(),
        };
        Ok(Some(push_dir * (self.radius - dist)))
    }
}
