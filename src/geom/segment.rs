//! Line segments and segment polygons

use serde::{Deserialize, Serialize};

use super::vector::{GeometryError, Point, Vector2, distance, normalize};

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }

    /// Unit direction from `a` to `b`
    pub fn direction(&self) -> Result<Vector2, GeometryError> {
        normalize(self.b - self.a)
    }
}

/// A closed outline made of segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub segments: Vec<Segment>,
}

impl Polygon {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.len()
    }
}
