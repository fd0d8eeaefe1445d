//! Ball entity for the sandbox demo
//!
//! A ball owns its circle (the authoritative position), a velocity, a spin
//! and a sprite that mirrors the circle for drawing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{CircleContact, bounce_off_surface, circle_contact, contact_spin, contact_surface};
use super::sprite::Sprite;
use crate::geom::{Circle, GeometryError, Point, Vector2};
use crate::settings::SandboxTuning;

/// Stable ball identifier
pub type BallId = u32;

/// Resting contact tolerance against the floor edge
const FLOOR_EPSILON: f64 = 1e-6;

/// Which level edge gravity pulls toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl GravityDirection {
    /// Unit vector gravity pulls along (screen coordinates, +Y down)
    pub fn axis(self) -> Vector2 {
        match self {
            GravityDirection::Down => Vector2::new(0.0, 1.0),
            GravityDirection::Up => Vector2::new(0.0, -1.0),
            GravityDirection::Left => Vector2::new(-1.0, 0.0),
            GravityDirection::Right => Vector2::new(1.0, 0.0),
        }
    }

    /// Unit vector across the gravity axis
    pub fn lateral(self) -> Vector2 {
        match self {
            GravityDirection::Down | GravityDirection::Up => Vector2::new(1.0, 0.0),
            GravityDirection::Left | GravityDirection::Right => Vector2::new(0.0, 1.0),
        }
    }
}

/// Level edges, in the order they are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The gravity direction that turns this edge into a floor
    fn floor_for(self) -> GravityDirection {
        match self {
            Edge::Left => GravityDirection::Left,
            Edge::Top => GravityDirection::Up,
            Edge::Right => GravityDirection::Right,
            Edge::Bottom => GravityDirection::Down,
        }
    }
}

/// Level parameters a ball needs each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallWorld {
    pub width: f64,
    pub height: f64,
    /// `None` when gravity is switched off
    pub gravity: Option<GravityDirection>,
    pub gravity_force: f64,
}

/// A ball in the sandbox
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub circle: Circle,
    pub sprite: Sprite,
    pub vel: Vector2,
    /// Rotation added to the sprite every tick
    pub spin: f64,

    pub ground_friction: f64,
    pub ball_bounce_friction: f64,
    pub wall_bounce_friction: f64,
    pub max_rotation_transmission: f64,
    pub random_impulse: f64,

    pub is_on_ground: bool,
    pub draggable: bool,
    pub dragged: bool,
    pub bounce_on: bool,
    pub rotation_on: bool,
}

impl Ball {
    /// Create a ball whose bounding box starts at `position`
    pub fn new(id: BallId, radius: f64, position: Point, tuning: &SandboxTuning) -> Self {
        let circle = Circle::new(radius, position.x, position.y);
        let diameter = circle.diameter();
        Self {
            id,
            circle,
            sprite: Sprite::new(position, Vector2::splat(diameter)),
            vel: Vector2::ZERO,
            spin: 0.0,
            ground_friction: tuning.ground_friction,
            ball_bounce_friction: tuning.ball_bounce_friction,
            wall_bounce_friction: tuning.wall_bounce_friction,
            max_rotation_transmission: tuning.max_rotation_transmission,
            random_impulse: tuning.random_impulse,
            is_on_ground: false,
            draggable: true,
            dragged: false,
            bounce_on: true,
            rotation_on: true,
        }
    }

    /// Start dragging: the ball stops dead
    pub fn grab(&mut self) {
        self.dragged = true;
        self.spin = 0.0;
        self.vel = Vector2::ZERO;
    }

    pub fn release(&mut self) {
        self.dragged = false;
    }

    /// How far the ball sticks out past `edge` (positive = outside)
    fn penetration(&self, edge: Edge, world: &BallWorld) -> f64 {
        match edge {
            Edge::Left => -self.circle.left(),
            Edge::Top => -self.circle.top(),
            Edge::Right => self.circle.right() - world.width,
            Edge::Bottom => self.circle.bottom() - world.height,
        }
    }

    fn clamp_to(&mut self, edge: Edge, world: &BallWorld) {
        match edge {
            Edge::Left => self.circle.x = 0.0,
            Edge::Top => self.circle.y = 0.0,
            Edge::Right => self.circle.x = world.width - self.circle.diameter(),
            Edge::Bottom => self.circle.y = world.height - self.circle.diameter(),
        }
    }

    /// Touching or past the edge gravity pulls toward
    fn touching_floor(&self, world: &BallWorld) -> bool {
        world.gravity.is_some_and(|dir| {
            Edge::ALL
                .iter()
                .any(|&e| e.floor_for() == dir && self.penetration(e, world) >= -FLOOR_EPSILON)
        })
    }

    /// Gravity step, skipped while dragged or when gravity is off
    ///
    /// A ball in the air with exactly zero velocity gets a small random
    /// sideways nudge so spawned balls do not stack in a perfect column.
    pub fn apply_gravity<R: Rng>(&mut self, world: &BallWorld, rng: &mut R) {
        let Some(dir) = world.gravity else {
            return;
        };
        if self.dragged {
            return;
        }

        let lateral = dir.lateral();
        if !self.is_on_ground && self.vel == Vector2::ZERO {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.vel += lateral * self.random_impulse * sign;
        }

        self.vel += dir.axis() * world.gravity_force;

        self.is_on_ground = self.touching_floor(world);
        if self.is_on_ground {
            let along = self.vel.dot(lateral);
            self.set_component(lateral, along * self.ground_friction);
        }
    }

    /// Overwrite the velocity component along a cardinal axis
    fn set_component(&mut self, axis: Vector2, value: f64) {
        if axis.x != 0.0 {
            self.vel.x = value * axis.x;
        } else {
            self.vel.y = value * axis.y;
        }
    }

    /// Move by the current velocity unless dragged
    pub fn integrate(&mut self) {
        if !self.dragged {
            self.circle.x += self.vel.x;
            self.circle.y += self.vel.y;
        }
    }

    /// Resolve contact with one other ball
    ///
    /// Only this ball is moved out of the overlap; `other` gets corrected on
    /// its own turn. With bounce on, `other` receives the mirrored velocity
    /// unless it is being dragged. Returns whether the balls touched.
    pub fn collide_with(&mut self, other: &mut Ball) -> Result<bool, GeometryError> {
        let Some(contact) = circle_contact(&self.circle, &other.circle)? else {
            return Ok(false);
        };

        match contact {
            CircleContact::Contained { push } => {
                self.circle.x += push.x;
                self.circle.y += push.y;
            }
            CircleContact::Overlap {
                depth,
                direction,
                delta,
            } => {
                if self.rotation_on {
                    let (spin_self, spin_other) = contact_spin(
                        direction,
                        self.vel,
                        other.vel,
                        self.max_rotation_transmission,
                        other.max_rotation_transmission,
                    );
                    self.spin = spin_self;
                    other.spin = spin_other;
                }

                self.circle.x += depth * direction.x;
                self.circle.y += depth * direction.y;

                if self.bounce_on {
                    let bounced = bounce_off_surface(self.vel, contact_surface(delta))?;
                    self.vel = bounced * self.ball_bounce_friction;
                    if !other.dragged {
                        other.vel = -bounced * other.ball_bounce_friction;
                    }
                }
            }
        }

        Ok(true)
    }

    /// Keep the ball inside the level
    ///
    /// Ordinary edges clamp and, with bounce on, reverse and damp the normal
    /// velocity. The floor (the edge gravity pulls toward) also catches a
    /// ball that is resting on it: a rebound weaker than one gravity step
    /// turns into the ground-rest convention, normal velocity = -gravity.
    pub fn resolve_edges(&mut self, world: &BallWorld) {
        for edge in Edge::ALL {
            let floor = world.gravity == Some(edge.floor_for());
            let penetration = self.penetration(edge, world);
            let axis = edge.floor_for().axis();
            let into_edge = self.vel.dot(axis);

            if floor && !self.dragged && penetration >= -FLOOR_EPSILON && into_edge >= 0.0 {
                self.clamp_to(edge, world);
                self.is_on_ground = true;

                let rebound = into_edge * self.wall_bounce_friction;
                let normal_after = if self.bounce_on && rebound > world.gravity_force {
                    -rebound
                } else {
                    -world.gravity_force
                };
                self.set_component(axis, normal_after);
            } else if penetration > 0.0 {
                self.clamp_to(edge, world);
                if self.bounce_on && into_edge > 0.0 {
                    self.set_component(axis, -into_edge * self.wall_bounce_friction);
                }
            }
        }
    }

    /// Copy the circle into the sprite and apply spin
    pub fn sync_sprite(&mut self) {
        self.sprite.position = self.circle.location();
        self.sprite.rotation += self.spin;
        self.spin *= self.ground_friction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world(gravity: Option<GravityDirection>) -> BallWorld {
        BallWorld {
            width: 800.0,
            height: 600.0,
            gravity,
            gravity_force: 0.4,
        }
    }

    fn ball_at(id: BallId, radius: f64, x: f64, y: f64) -> Ball {
        Ball::new(id, radius, Point::new(x, y), &SandboxTuning::default())
    }

    fn tick(ball: &mut Ball, w: &BallWorld, rng: &mut Pcg32) {
        ball.apply_gravity(w, rng);
        ball.integrate();
        ball.resolve_edges(w);
        ball.sync_sprite();
    }

    #[test]
    fn test_falling_ball_comes_to_rest() {
        let w = world(Some(GravityDirection::Down));
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = ball_at(1, 10.0, 100.0, 100.0);
        ball.bounce_on = false;

        // Falls 480 px: g * n(n+1)/2 >= 480 within 50 ticks
        let rest_height = w.height - ball.circle.bottom();
        let bound = (2.0 * rest_height / w.gravity_force).sqrt().ceil() as usize + 1;
        let mut landed_at = None;
        for t in 0..bound {
            tick(&mut ball, &w, &mut rng);
            if ball.is_on_ground {
                landed_at = Some(t);
                break;
            }
        }
        assert!(landed_at.is_some(), "ball never reached the floor");

        for _ in 0..20 {
            tick(&mut ball, &w, &mut rng);
            assert!(ball.is_on_ground);
            assert_eq!(ball.vel.y, -w.gravity_force);
            assert!((ball.circle.bottom() - w.height).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bouncing_ball_settles() {
        let w = world(Some(GravityDirection::Down));
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ball = ball_at(1, 10.0, 100.0, 100.0);

        for _ in 0..1000 {
            tick(&mut ball, &w, &mut rng);
        }
        assert!(ball.is_on_ground);
        assert_eq!(ball.vel.y, -w.gravity_force);
    }

    #[test]
    fn test_random_impulse_only_at_rest_in_air() {
        let w = world(Some(GravityDirection::Down));
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = ball_at(1, 10.0, 100.0, 100.0);

        ball.apply_gravity(&w, &mut rng);
        assert!((ball.vel.x.abs() - 0.1).abs() < 1e-12);
        let vx = ball.vel.x;

        // Moving now, no further nudges
        ball.apply_gravity(&w, &mut rng);
        assert_eq!(ball.vel.x, vx);
    }

    #[test]
    fn test_no_gravity_when_dragged_or_off() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut ball = ball_at(1, 10.0, 100.0, 100.0);
        ball.apply_gravity(&world(None), &mut rng);
        assert_eq!(ball.vel, Vector2::ZERO);

        ball.grab();
        ball.apply_gravity(&world(Some(GravityDirection::Down)), &mut rng);
        ball.integrate();
        assert_eq!(ball.vel, Vector2::ZERO);
        assert_eq!(ball.circle.location(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_side_wall_bounce_damps() {
        let w = world(None);
        let mut ball = ball_at(1, 10.0, 785.0, 100.0);
        ball.vel = Vector2::new(10.0, 0.0);
        ball.integrate();
        ball.resolve_edges(&w);
        assert_eq!(ball.circle.right(), 800.0);
        assert!((ball.vel.x + 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_wall_clamp_without_bounce_keeps_velocity() {
        let w = world(None);
        let mut ball = ball_at(1, 10.0, 2.0, 100.0);
        ball.bounce_on = false;
        ball.vel = Vector2::new(-5.0, 0.0);
        ball.integrate();
        ball.resolve_edges(&w);
        assert_eq!(ball.circle.x, 0.0);
        assert_eq!(ball.vel.x, -5.0);
    }

    #[test]
    fn test_gravity_left_rests_on_left_wall() {
        let w = world(Some(GravityDirection::Left));
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ball = ball_at(1, 10.0, 50.0, 100.0);
        ball.bounce_on = false;
        for _ in 0..200 {
            tick(&mut ball, &w, &mut rng);
        }
        assert!(ball.is_on_ground);
        assert_eq!(ball.circle.x, 0.0);
        assert_eq!(ball.vel.x, w.gravity_force);
    }

    #[test]
    fn test_collision_moves_only_self() {
        let mut a = ball_at(1, 10.0, 0.0, 0.0);
        let mut b = ball_at(2, 10.0, 15.0, 0.0);
        a.bounce_on = false;
        a.rotation_on = false;

        assert!(a.collide_with(&mut b).unwrap());
        assert!((a.circle.x + 5.0).abs() < 1e-12);
        assert_eq!(b.circle.x, 15.0);
        // Now exactly touching: no further contact
        assert!(!a.collide_with(&mut b).unwrap());
    }

    #[test]
    fn test_collision_head_on_elastic() {
        let tuning = SandboxTuning {
            ball_bounce_friction: 1.0,
            ..SandboxTuning::default()
        };
        let mut a = Ball::new(1, 10.0, Point::new(0.0, 0.0), &tuning);
        let mut b = Ball::new(2, 10.0, Point::new(18.0, 0.0), &tuning);
        a.vel = Vector2::new(3.0, 0.0);
        b.vel = Vector2::new(-3.0, 0.0);
        let normal = Vector2::new(1.0, 0.0);
        let before = a.vel.dot(normal).powi(2) + b.vel.dot(normal).powi(2);

        a.collide_with(&mut b).unwrap();
        let after = a.vel.dot(normal).powi(2) + b.vel.dot(normal).powi(2);
        assert!((before - after).abs() < 1e-9);
        assert!((a.vel.x + 3.0).abs() < 1e-12);
        assert!((b.vel.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_dragged_other_keeps_velocity() {
        let mut a = ball_at(1, 10.0, 0.0, 0.0);
        let mut b = ball_at(2, 10.0, 15.0, 0.0);
        a.vel = Vector2::new(4.0, 0.0);
        b.grab();
        a.collide_with(&mut b).unwrap();
        assert_eq!(b.vel, Vector2::ZERO);
        assert!(a.vel.x < 0.0);
    }

    #[test]
    fn test_concentric_push() {
        let mut a = ball_at(1, 10.0, 50.0, 50.0);
        let mut b = ball_at(2, 10.0, 50.0, 50.0);
        assert!(a.collide_with(&mut b).unwrap());
        assert_eq!(a.circle.location(), Point::new(50.0, 70.0));
    }

    #[test]
    fn test_sync_sprite_applies_spin() {
        let mut ball = ball_at(1, 10.0, 5.0, 6.0);
        ball.spin = 10.0;
        ball.sync_sprite();
        assert_eq!(ball.sprite.position, Point::new(5.0, 6.0));
        assert_eq!(ball.sprite.rotation, 10.0);
        assert!((ball.spin - 9.75).abs() < 1e-12);
    }
}
