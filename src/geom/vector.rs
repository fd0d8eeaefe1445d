//! Vector arithmetic helpers on top of `glam::DVec2`

use glam::DVec2;
use thiserror::Error;

/// 2D vector (f64 components)
pub type Vector2 = DVec2;

/// A location in world space. Same layout as `Vector2`.
pub type Point = DVec2;

/// Geometry that cannot produce a direction
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Normalizing a zero-length (or non-finite) vector
    #[error("degenerate geometry: cannot normalize vector ({x}, {y})")]
    DegenerateGeometry { x: f64, y: f64 },
}

/// Unit vector in the direction of `v`
///
/// Fails instead of producing NaN when `v` has no length.
#[inline]
pub fn normalize(v: Vector2) -> Result<Vector2, GeometryError> {
    v.try_normalize()
        .ok_or(GeometryError::DegenerateGeometry { x: v.x, y: v.y })
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize(Vector2::new(3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_degenerate() {
        let err = normalize(Vector2::ZERO).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateGeometry { x: 0.0, y: 0.0 });
        assert!(normalize(Vector2::new(f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(1.0, 1.0), Point::new(4.0, 5.0)), 5.0);
    }
}
