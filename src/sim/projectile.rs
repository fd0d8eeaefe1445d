//! The player's boomerang punch
//!
//! Lifecycle: hidden, outbound along the owner's facing, returning toward
//! the owner's current center, hidden again once the world sees it touch
//! the owner.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::sprite::Sprite;
use super::state::GameEvent;
use super::timers::{TimerTask, Timers};
use crate::geom::{Point, Rectangle, Vector2, normalize};
use crate::settings::PlatformerTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub sprite: Sprite,
    pub speed: f64,
    /// Outbound travel before the punch turns around
    pub max_scope: f64,
    /// Outbound distance travelled so far
    pub scope: f64,
    pub returning: bool,
    pub power: f64,
    pub vel: Vector2,
}

impl Projectile {
    /// A hidden punch of the given drawn size
    pub fn new(size: Vector2, tuning: &PlatformerTuning) -> Self {
        let mut sprite = Sprite::new(Point::ZERO, size);
        sprite.visible = false;
        Self {
            sprite,
            speed: tuning.punch_speed,
            max_scope: tuning.punch_max_scope,
            scope: 0.0,
            returning: false,
            power: tuning.punch_power,
            vel: Vector2::ZERO,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.sprite.bounds()
    }

    /// Faster, longer-reaching punch
    pub fn improve_speed(&mut self, tuning: &PlatformerTuning) {
        self.speed = tuning.punch_improved_speed;
        self.max_scope = tuning.punch_improved_max_scope;
    }

    /// The owner caught the punch
    pub fn catch(&mut self) {
        self.sprite.visible = false;
        self.returning = false;
        self.scope = 0.0;
        self.vel = Vector2::ZERO;
    }

    fn turn_around(&mut self) {
        self.scope = 0.0;
        self.returning = true;
        self.sprite.effects = self.sprite.effects.flipped();
    }

    /// Advance one tick while the punch is active
    ///
    /// A hidden punch only appears at the owner's center this tick. Enemies
    /// are tested in collection order; each fresh hit turns the punch around,
    /// knocks the enemy out, cancels its wandering and schedules its removal.
    pub fn update(
        &mut self,
        owner: &Sprite,
        level_width: f64,
        enemies: &mut [Enemy],
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
        tuning: &PlatformerTuning,
    ) {
        if !self.sprite.visible {
            self.sprite.visible = true;
            self.sprite.position = owner.center() - self.sprite.size / 2.0;
            self.sprite.effects = owner.effects;
            return;
        }

        let bounds = self.bounds();
        if self.scope >= self.max_scope
            || bounds.left() < 0.0
            || bounds.top() < 0.0
            || bounds.right() > level_width
        {
            self.turn_around();
        }

        if self.returning {
            if let Ok(toward_owner) = normalize(owner.center() - self.sprite.center()) {
                self.vel += toward_owner;
            }
            if let Ok(heading) = normalize(self.vel) {
                self.vel = heading * self.speed;
            }
            self.sprite.position += self.vel;
        } else {
            self.sprite.position.x += self.speed * self.sprite.effects.direction();
            self.scope += self.speed;
        }

        for enemy in enemies.iter_mut() {
            if enemy.is_hit() || self.bounds().intersects(&enemy.bounds()).is_none() {
                continue;
            }
            self.turn_around();

            let id = enemy.id;
            enemy.knock_out(tuning.enemy_knock_up);
            timers.cancel_where(|task| *task == TimerTask::EnemyStateChange(id));
            timers.schedule(tuning.enemy_remove_delay_ms, TimerTask::EnemyRemove(id));
            events.push(GameEvent::PunchHitEnemy);
            log::debug!("Punch hit enemy {id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::actor_hit_box;
    use crate::sim::enemy::EnemyState;
    use crate::sim::sprite::SpriteEffects;

    fn owner() -> Sprite {
        Sprite::new(Point::new(100.0, 100.0), Vector2::splat(80.0))
    }

    fn punch() -> Projectile {
        Projectile::new(Vector2::new(40.0, 20.0), &PlatformerTuning::default())
    }

    #[test]
    fn test_first_update_shows_punch_at_owner() {
        let mut p = punch();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        let mut o = owner();
        o.effects = SpriteEffects::FlipHorizontally;

        p.update(&o, 1000.0, &mut [], &mut timers, &mut events, &PlatformerTuning::default());
        assert!(p.sprite.visible);
        assert_eq!(p.sprite.center(), o.center());
        assert_eq!(p.sprite.effects, SpriteEffects::FlipHorizontally);
        assert_eq!(p.scope, 0.0);
    }

    #[test]
    fn test_punch_round_trip() {
        let tuning = PlatformerTuning::default();
        let mut p = punch();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        let o = owner();
        let owner_box = actor_hit_box(&o.bounds());

        // Appear, then ceil(200 / 6) outbound steps, then the turn
        let outbound = (tuning.punch_max_scope / tuning.punch_speed).ceil() as usize;
        for _ in 0..=outbound {
            p.update(&o, 1000.0, &mut [], &mut timers, &mut events, &tuning);
            assert!(!p.returning);
        }
        p.update(&o, 1000.0, &mut [], &mut timers, &mut events, &tuning);
        assert!(p.returning);
        assert_eq!(p.sprite.effects, SpriteEffects::FlipHorizontally);

        let mut distance = p.sprite.center().distance(o.center());
        let mut caught = false;
        for _ in 0..100 {
            if p.bounds().intersects(&owner_box).is_some() {
                p.catch();
                caught = true;
                break;
            }
            p.update(&o, 1000.0, &mut [], &mut timers, &mut events, &tuning);
            let now = p.sprite.center().distance(o.center());
            assert!(now < distance);
            distance = now;
        }
        assert!(caught);
        assert!(!p.sprite.visible);
        assert!(!p.returning);
    }

    #[test]
    fn test_level_edge_turns_punch() {
        let tuning = PlatformerTuning::default();
        let mut p = punch();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        let o = Sprite::new(Point::new(900.0, 100.0), Vector2::splat(80.0));

        for _ in 0..20 {
            p.update(&o, 1000.0, &mut [], &mut timers, &mut events, &tuning);
            if p.returning {
                break;
            }
        }
        assert!(p.returning);
        assert!(p.scope == 0.0);
    }

    #[test]
    fn test_enemy_hit() {
        let tuning = PlatformerTuning::default();
        let mut p = punch();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        let o = owner();
        // Enemy hit box starts right where the punch ends up after one step
        let mut enemies = vec![Enemy::new(9, Point::new(140.0, 80.0), Vector2::splat(80.0))];
        timers.schedule_every(tuning.enemy_state_period_ms, TimerTask::EnemyStateChange(9));

        p.update(&o, 1000.0, &mut enemies, &mut timers, &mut events, &tuning);
        p.update(&o, 1000.0, &mut enemies, &mut timers, &mut events, &tuning);

        assert!(p.returning);
        assert_eq!(enemies[0].state, EnemyState::Hitted);
        assert_eq!(enemies[0].vel.y, tuning.enemy_knock_up);
        assert_eq!(events, vec![GameEvent::PunchHitEnemy]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(tuning.enemy_remove_delay_ms), vec![TimerTask::EnemyRemove(9)]);

        // Already hit: no second knock-out
        p.update(&o, 1000.0, &mut enemies, &mut timers, &mut events, &tuning);
        assert_eq!(events.len(), 1);
    }
}
