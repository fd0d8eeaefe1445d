//! Geometry primitives
//!
//! Plain value types shared by the collision kernel and the entities:
//! - `Vector2`/`Point`: `glam::DVec2`
//! - `Rectangle`: axis-aligned box, upper-left origin
//! - `Circle`: circle stored by the upper-left corner of its bounding box
//! - `Segment`/`Polygon`: line segments for circle-vs-edge tests

pub mod circle;
pub mod rect;
pub mod segment;
pub mod vector;

pub use circle::{Circle, CircleOverlap};
pub use rect::Rectangle;
pub use segment::{Polygon, Segment};
pub use vector::{GeometryError, Point, Vector2, distance, normalize};
