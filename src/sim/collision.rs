//! Collision kernel
//!
//! Two families of contacts:
//! - circle vs circle for the ball sandbox (penetration, reflection, spin)
//! - axis-aligned hit box vs static platforms for the platformer
//!
//! Everything here is a pure function of its inputs; entities apply the
//! results to their own state.

use crate::geom::{Circle, GeometryError, Rectangle, Vector2, normalize};

/// Spin below this magnitude snaps to zero
pub const MIN_SPIN: f64 = 1.0;

/// How a circle has to move to get out of another one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleContact {
    /// Concentric or fully contained: push by this vector, no bounce
    Contained { push: Vector2 },
    /// Regular overlap
    Overlap {
        /// Penetration depth
        depth: f64,
        /// Unit vector from the other center toward this center
        direction: Vector2,
        /// Unnormalized center delta (the bounce surface is built from it)
        delta: Vector2,
    },
}

/// Classify the contact of `a` against `b`
///
/// Containment is checked first because the regular overlap direction is
/// undefined for concentric circles.
pub fn circle_contact(a: &Circle, b: &Circle) -> Result<Option<CircleContact>, GeometryError> {
    if let Some(push) = a.is_inside_circle(b) {
        return Ok(Some(CircleContact::Contained { push }));
    }

    match a.intersects(b) {
        Some(hit) => Ok(Some(CircleContact::Overlap {
            depth: hit.depth,
            direction: normalize(hit.delta)?,
            delta: hit.delta,
        })),
        None => Ok(None),
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vector2, normal: Vector2) -> Vector2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a velocity off the virtual surface `surface`
///
/// The velocity is split into its projection on the surface and on the
/// surface's left normal; the normal part is reversed and the two are summed.
pub fn bounce_off_surface(velocity: Vector2, surface: Vector2) -> Result<Vector2, GeometryError> {
    let along = normalize(surface)?;
    let left_normal = Vector2::new(surface.y, -surface.x) / surface.length();

    let tangential = velocity.dot(along) * along;
    let normal = velocity.dot(left_normal) * left_normal;

    Ok(tangential - normal)
}

/// Bounce surface for two touching circles: perpendicular to the center line
#[inline]
pub fn contact_surface(delta: Vector2) -> Vector2 {
    Vector2::new(delta.y, -delta.x)
}

/// Spin handed to two balls after they touch
///
/// The approach angle of `direction` (degrees) and the sign of the first
/// ball's horizontal velocity decide who spins which way. Each ball spins at
/// its own speed capped by its own transmission limit. Returns
/// `(spin_a, spin_b)`.
pub fn contact_spin(
    direction: Vector2,
    vel_a: Vector2,
    vel_b: Vector2,
    max_a: f64,
    max_b: f64,
) -> (f64, f64) {
    let angle = direction.y.atan2(direction.x).to_degrees();
    let speed_a = vel_a.length().min(max_a);
    let speed_b = vel_b.length().min(max_b);

    let clockwise = (angle >= 0.0 && angle <= 90.0 && vel_a.x > 0.0)
        || (angle > 90.0 && angle <= 180.0 && vel_a.x >= 0.0)
        || (angle < 0.0 && angle >= -90.0 && vel_a.x <= 0.0)
        || (angle < -90.0 && angle >= -180.0 && vel_a.x < 0.0);

    let (spin_a, spin_b) = if clockwise {
        (speed_a, -speed_b)
    } else {
        (-speed_a, speed_b)
    };

    (snap_spin(spin_a), snap_spin(spin_b))
}

#[inline]
fn snap_spin(spin: f64) -> f64 {
    if spin.abs() < MIN_SPIN { 0.0 } else { spin }
}

/// Space above an actor's hit box inside its sprite (hair, ears, headroom)
pub const HIT_BOX_TOP_INSET: f64 = 20.0;

/// Hit box of a walking actor: the middle half horizontally, minus the top inset
pub fn actor_hit_box(sprite: &Rectangle) -> Rectangle {
    Rectangle::new(
        sprite.x + sprite.half_width() / 2.0,
        sprite.y + HIT_BOX_TOP_INSET,
        sprite.half_width(),
        sprite.height - HIT_BOX_TOP_INSET,
    )
}

/// Outcome of resolving a hit box against the platforms
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlatformContact {
    /// Distance to move the actor up (subtract from its Y position)
    pub lift: f64,
    /// At least one platform caught the actor this tick
    pub landed: bool,
}

/// Resolve vertical penetration between a hit box and static platforms
///
/// Every platform is tested against the same `bounds` snapshot, in order.
/// A platform catches the actor when they overlap, the actor is falling or
/// resting (`vel.y >= 0`), and the actor's bottom edge lies within the
/// platform's vertical span. A caught actor is lifted by the vertical
/// overlap, marked on ground, and gets `vel.y = -gravity` so the next
/// gravity step nets to zero. A missed platform while moving down clears the
/// ground flag.
pub fn resolve_platforms(
    bounds: &Rectangle,
    vel: &mut Vector2,
    on_ground: &mut bool,
    platforms: &[Rectangle],
    gravity: f64,
) -> PlatformContact {
    let mut contact = PlatformContact::default();

    for platform in platforms {
        match bounds.intersects(platform) {
            Some(overlap) if vel.y >= 0.0 => {
                if bounds.bottom() >= platform.top() && bounds.bottom() <= platform.bottom() {
                    contact.lift += overlap.y;
                    contact.landed = true;
                    *on_ground = true;
                    vel.y = -gravity;
                }
            }
            None if vel.y > 0.0 => {
                *on_ground = false;
            }
            _ => {}
        }
    }

    contact
}

/// Position fix-up that keeps a hit box inside the level
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeCorrection {
    /// Offset to add to the owner's position
    pub offset: Vector2,
    /// Horizontal velocity must be zeroed
    pub stop_x: bool,
    /// Vertical velocity must be zeroed
    pub stop_y: bool,
}

/// Clamp a hit box against the left, top and right level edges
///
/// The bottom stays open so actors can fall out of the level.
pub fn level_edge_correction(bounds: &Rectangle, level_width: f64) -> EdgeCorrection {
    let mut fix = EdgeCorrection::default();

    if bounds.left() < 0.0 {
        fix.offset.x = -bounds.left();
        fix.stop_x = true;
    }
    if bounds.top() < 0.0 {
        fix.offset.y = -bounds.top();
        fix.stop_y = true;
    }
    if bounds.right() > level_width {
        fix.offset.x = level_width - bounds.right();
        fix.stop_x = true;
    }

    fix
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GRAVITY: f64 = 0.3;

    #[test]
    fn test_reflect_velocity() {
        // Moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vector2::new(100.0, 0.0), Vector2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 1e-9);
        assert!(reflected.y.abs() < 1e-9);
    }

    #[test]
    fn test_bounce_off_surface_matches_reflection() {
        let delta = Vector2::new(3.0, 4.0);
        let vel = Vector2::new(-2.0, 1.5);
        let bounced = bounce_off_surface(vel, contact_surface(delta)).unwrap();
        let normal = normalize(delta).unwrap();
        let expected = reflect_velocity(vel, normal);
        assert!((bounced - expected).length() < 1e-12);
    }

    #[test]
    fn test_bounce_preserves_normal_energy() {
        let delta = Vector2::new(-7.0, 2.0);
        let normal = normalize(delta).unwrap();
        let vel = Vector2::new(4.0, -3.0);
        let bounced = bounce_off_surface(vel, contact_surface(delta)).unwrap();
        let before = vel.dot(normal).powi(2);
        let after = bounced.dot(normal).powi(2);
        assert!((before - after).abs() < 1e-9);
        assert!((vel.length() - bounced.length()).abs() < 1e-9);
    }

    #[test]
    fn test_bounce_off_zero_surface_is_degenerate() {
        assert!(bounce_off_surface(Vector2::new(1.0, 0.0), Vector2::ZERO).is_err());
    }

    #[test]
    fn test_circle_contact_overlap() {
        let a = Circle::new(10.0, 0.0, 0.0);
        let b = Circle::new(10.0, 15.0, 0.0);
        match circle_contact(&a, &b).unwrap() {
            Some(CircleContact::Overlap {
                depth, direction, ..
            }) => {
                assert!((depth - 5.0).abs() < 1e-12);
                assert_eq!(direction, Vector2::new(-1.0, 0.0));
            }
            other => panic!("unexpected contact {other:?}"),
        }
    }

    #[test]
    fn test_circle_contact_concentric() {
        let a = Circle::new(10.0, 0.0, 0.0);
        let b = Circle::new(10.0, 0.0, 0.0);
        assert_eq!(
            circle_contact(&a, &b).unwrap(),
            Some(CircleContact::Contained {
                push: Vector2::new(0.0, 20.0)
            })
        );
    }

    #[test]
    fn test_contact_spin_snaps_small_speeds() {
        let (a, b) = contact_spin(
            Vector2::new(1.0, 0.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(0.2, 0.0),
            25.0,
            25.0,
        );
        assert_eq!(a, 0.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_contact_spin_capped_and_opposite() {
        let (a, b) = contact_spin(
            Vector2::new(1.0, 0.0),
            Vector2::new(40.0, 0.0),
            Vector2::new(-3.0, 0.0),
            25.0,
            25.0,
        );
        assert_eq!(a, 25.0);
        assert_eq!(b, -3.0);
    }

    #[test]
    fn test_player_lands_on_platform() {
        // Bottom at 103 after a 3 px fall onto a platform whose top is at 100
        let bounds = Rectangle::new(50.0, 43.0, 20.0, 60.0);
        let platform = Rectangle::new(0.0, 100.0, 200.0, 20.0);
        let mut vel = Vector2::new(0.0, 3.0);
        let mut on_ground = false;

        let contact = resolve_platforms(&bounds, &mut vel, &mut on_ground, &[platform], GRAVITY);
        assert!(contact.landed);
        assert!((contact.lift - 3.0).abs() < 1e-12);
        assert!(on_ground);
        assert_eq!(vel.y, -GRAVITY);
    }

    #[test]
    fn test_rising_actor_passes_through_platform() {
        let bounds = Rectangle::new(50.0, 43.0, 20.0, 60.0);
        let platform = Rectangle::new(0.0, 100.0, 200.0, 20.0);
        let mut vel = Vector2::new(0.0, -5.0);
        let mut on_ground = true;

        let contact = resolve_platforms(&bounds, &mut vel, &mut on_ground, &[platform], GRAVITY);
        assert!(!contact.landed);
        assert_eq!(vel.y, -5.0);
        assert!(on_ground);
    }

    #[test]
    fn test_falling_without_support_leaves_ground() {
        let bounds = Rectangle::new(500.0, 0.0, 20.0, 60.0);
        let platform = Rectangle::new(0.0, 100.0, 200.0, 20.0);
        let mut vel = Vector2::new(0.0, 1.0);
        let mut on_ground = true;

        resolve_platforms(&bounds, &mut vel, &mut on_ground, &[platform], GRAVITY);
        assert!(!on_ground);
    }

    #[test]
    fn test_bottom_below_platform_span_is_ignored() {
        // Overlapping from below: bottom edge is under the platform
        let bounds = Rectangle::new(50.0, 110.0, 20.0, 60.0);
        let platform = Rectangle::new(0.0, 100.0, 200.0, 20.0);
        let mut vel = Vector2::new(0.0, 1.0);
        let mut on_ground = false;

        let contact = resolve_platforms(&bounds, &mut vel, &mut on_ground, &[platform], GRAVITY);
        assert!(!contact.landed);
        assert!(!on_ground);
    }

    #[test]
    fn test_actor_hit_box() {
        let hit = actor_hit_box(&Rectangle::new(100.0, 50.0, 80.0, 80.0));
        assert_eq!(hit, Rectangle::new(120.0, 70.0, 40.0, 60.0));
    }

    #[test]
    fn test_level_edge_correction() {
        let fix = level_edge_correction(&Rectangle::new(-4.0, -2.0, 10.0, 10.0), 100.0);
        assert_eq!(fix.offset, Vector2::new(4.0, 2.0));
        assert!(fix.stop_x && fix.stop_y);

        let fix = level_edge_correction(&Rectangle::new(95.0, 10.0, 10.0, 10.0), 100.0);
        assert_eq!(fix.offset, Vector2::new(-5.0, 0.0));
        assert!(fix.stop_x && !fix.stop_y);

        let fix = level_edge_correction(&Rectangle::new(10.0, 10.0, 10.0, 10.0), 100.0);
        assert_eq!(fix, EdgeCorrection::default());
    }

    proptest! {
        #[test]
        fn prop_bounce_keeps_speed_and_tangent(
            vx in -50.0f64..50.0,
            vy in -50.0f64..50.0,
            sx in -10.0f64..10.0,
            sy in -10.0f64..10.0,
        ) {
            let surface = Vector2::new(sx, sy);
            prop_assume!(surface.length() > 1e-3);
            let vel = Vector2::new(vx, vy);
            let bounced = bounce_off_surface(vel, surface).unwrap();
            let along = surface / surface.length();

            prop_assert!((bounced.length() - vel.length()).abs() < 1e-9);
            prop_assert!((bounced.dot(along) - vel.dot(along)).abs() < 1e-9);
        }

        #[test]
        fn prop_landing_lifts_onto_platform_top(
            x in 0.0f64..150.0,
            sink in 0.01f64..10.0,
            vy in 0.0f64..8.0,
        ) {
            let platform = Rectangle::new(0.0, 100.0, 200.0, 20.0);
            let bounds = Rectangle::new(x, 100.0 + sink - 60.0, 40.0, 60.0);
            let mut vel = Vector2::new(0.0, vy);
            let mut on_ground = false;

            let contact = resolve_platforms(&bounds, &mut vel, &mut on_ground, &[platform], GRAVITY);

            prop_assert!(contact.landed);
            prop_assert!(on_ground);
            prop_assert_eq!(vel.y, -GRAVITY);
            prop_assert!((bounds.bottom() - contact.lift - platform.top()).abs() < 1e-9);
        }
    }
}
