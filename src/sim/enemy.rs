//! Patrolling enemy
//!
//! Enemies wander by themselves: a periodic timer picks Idle or Moving at
//! random and the per-tick update turns that state into velocity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{actor_hit_box, level_edge_correction, resolve_platforms};
use super::sprite::{Animation, AnimationType, Sprite};
use super::timers::EnemyId;
use crate::geom::{Point, Rectangle, Vector2};

/// Idle animation frames
const IDLE_FRAMES: u32 = 20;
/// Walk animation frames
const MOVING_FRAMES: u32 = 14;
/// Sheet frame period
const FRAME_MS: f64 = 35.0;

/// Enemy behaviour state; the discriminant is the sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle = 0,
    Moving = 1,
    Hitted = 2,
}

impl EnemyState {
    pub fn row(self) -> u32 {
        self as u32
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub sprite: Sprite,
    pub vel: Vector2,
    /// Walk speed for the current state
    pub speed: f64,
    pub on_ground: bool,
    pub state: EnemyState,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Point, size: Vector2) -> Self {
        Self {
            id,
            sprite: Sprite::animated(
                position,
                size,
                Animation::new(AnimationType::Loop, IDLE_FRAMES, FRAME_MS),
            ),
            vel: Vector2::ZERO,
            speed: 0.0,
            on_ground: false,
            state: EnemyState::Idle,
        }
    }

    /// Collision rectangle
    pub fn bounds(&self) -> Rectangle {
        actor_hit_box(&self.sprite.bounds())
    }

    pub fn is_hit(&self) -> bool {
        self.state == EnemyState::Hitted
    }

    /// Per-tick update
    ///
    /// A hit enemy skips walking, platforms and edges and only keeps
    /// moving with the velocity it was knocked away with.
    pub fn update(&mut self, level_width: f64, platforms: &[Rectangle], gravity: f64, walk_speed: f64) {
        if !self.is_hit() {
            let frames = match self.state {
                EnemyState::Moving => {
                    self.speed = walk_speed;
                    MOVING_FRAMES
                }
                _ => {
                    self.speed = 0.0;
                    IDLE_FRAMES
                }
            };
            if let Some(anim) = self.sprite.animation_mut() {
                anim.set_frame_count(frames);
            }

            self.vel.x = self.speed * self.sprite.effects.direction();
            self.vel.y += gravity;

            let bounds = self.bounds();
            let contact = resolve_platforms(&bounds, &mut self.vel, &mut self.on_ground, platforms, gravity);
            self.sprite.position.y -= contact.lift;

            let fix = level_edge_correction(&bounds, level_width);
            self.sprite.position += fix.offset;
            if fix.stop_x {
                self.vel.x = 0.0;
            }
            if fix.stop_y {
                self.vel.y = 0.0;
            }
        }

        self.sprite.position += self.vel;

        let row = self.state.row();
        if let Some(anim) = self.sprite.animation_mut() {
            anim.row = row;
        }
    }

    /// Pick a new random state; starting to walk turns the enemy around
    pub fn change_state<R: Rng>(&mut self, rng: &mut R) {
        if self.is_hit() {
            return;
        }
        self.state = if rng.random_range(0..2u32) == 1 {
            EnemyState::Moving
        } else {
            EnemyState::Idle
        };
        if self.state == EnemyState::Moving {
            self.sprite.effects = self.sprite.effects.flipped();
        }
        if let Some(anim) = self.sprite.animation_mut() {
            anim.current_frame = 0;
        }
        log::trace!("Enemy {} now {:?}", self.id, self.state);
    }

    /// Knock the enemy out; it stops walking and pops upward
    pub fn knock_out(&mut self, knock_up: f64) {
        self.state = EnemyState::Hitted;
        self.vel.y = knock_up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::SpriteEffects;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const GRAVITY: f64 = 0.3;

    fn enemy_on_floor() -> (Enemy, Vec<Rectangle>) {
        // Sprite 80x80 standing on y = 200
        let enemy = Enemy::new(1, Point::new(100.0, 120.0), Vector2::splat(80.0));
        (enemy, vec![Rectangle::new(0.0, 200.0, 1000.0, 40.0)])
    }

    #[test]
    fn test_idle_enemy_stands_still() {
        let (mut enemy, platforms) = enemy_on_floor();
        let mut landed = false;
        for _ in 0..50 {
            enemy.update(1000.0, &platforms, GRAVITY, 1.5);
            landed |= enemy.on_ground;
        }
        assert!(landed);
        assert_eq!(enemy.sprite.position.x, 100.0);
        assert!((enemy.bounds().bottom() - 200.0).abs() < 1.0);
        assert_eq!(enemy.sprite.animation().unwrap().frame_count, IDLE_FRAMES);
    }

    #[test]
    fn test_moving_enemy_walks_by_facing() {
        let (mut enemy, platforms) = enemy_on_floor();
        enemy.state = EnemyState::Moving;
        enemy.sprite.effects = SpriteEffects::FlipHorizontally;
        enemy.update(1000.0, &platforms, GRAVITY, 1.5);
        assert_eq!(enemy.vel.x, -1.5);
        assert_eq!(enemy.sprite.position.x, 98.5);
        let anim = enemy.sprite.animation().unwrap();
        assert_eq!(anim.frame_count, MOVING_FRAMES);
        assert_eq!(anim.row, 1);
    }

    #[test]
    fn test_left_edge_stops_enemy() {
        let (mut enemy, platforms) = enemy_on_floor();
        // Hit box starts 20 px into the sprite
        enemy.sprite.position.x = -25.0;
        enemy.state = EnemyState::Moving;
        enemy.sprite.effects = SpriteEffects::FlipHorizontally;
        enemy.update(1000.0, &platforms, GRAVITY, 1.5);
        assert_eq!(enemy.vel.x, 0.0);
        assert_eq!(enemy.bounds().left(), 0.0);
    }

    #[test]
    fn test_hit_enemy_ignores_platforms() {
        let (mut enemy, platforms) = enemy_on_floor();
        enemy.knock_out(-4.0);
        let y = enemy.sprite.position.y;
        enemy.update(1000.0, &platforms, GRAVITY, 1.5);
        assert_eq!(enemy.sprite.position.y, y - 4.0);
        assert_eq!(enemy.sprite.animation().unwrap().row, 2);
    }

    #[test]
    fn test_change_state_flips_when_moving() {
        let mut rng = Pcg32::seed_from_u64(7);
        let (mut enemy, _) = enemy_on_floor();
        for _ in 0..20 {
            let facing = enemy.sprite.effects;
            enemy.change_state(&mut rng);
            match enemy.state {
                EnemyState::Moving => assert_ne!(enemy.sprite.effects, facing),
                EnemyState::Idle => assert_eq!(enemy.sprite.effects, facing),
                EnemyState::Hitted => unreachable!(),
            }
            assert_eq!(enemy.sprite.animation().unwrap().current_frame, 0);
        }
    }

    #[test]
    fn test_change_state_ignored_when_hit() {
        let mut rng = Pcg32::seed_from_u64(7);
        let (mut enemy, _) = enemy_on_floor();
        enemy.knock_out(-4.0);
        enemy.change_state(&mut rng);
        assert_eq!(enemy.state, EnemyState::Hitted);
    }
}
