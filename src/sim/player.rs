//! The player character
//!
//! Input, gravity and friction build the velocity; then the body moves, the
//! punch flies, and the result is checked against platforms, pickups,
//! enemies and the level edges, in that order.

use serde::{Deserialize, Serialize};

use super::collision::{actor_hit_box, level_edge_correction, resolve_platforms};
use super::enemy::Enemy;
use super::pickup::{Pickup, PickupKind};
use super::projectile::Projectile;
use super::sprite::{Animation, AnimationType, Sprite, SpriteEffects};
use super::state::GameEvent;
use super::timers::{TimerTask, Timers};
use crate::geom::{Point, Rectangle, Vector2};
use crate::settings::PlatformerTuning;

/// Player sheet frames per row
const FRAMES: u32 = 11;
const FRAME_MS: f64 = 45.0;
/// Vertical speed while gliding, as a fraction of the speed limit
const FLY_SPEED_DIVISOR: f64 = 3.2;

/// Player behaviour state; the discriminant is the sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle = 0,
    Moving = 3,
    Jumping = 4,
    Hitted = 5,
    Flying = 10,
}

impl PlayerState {
    pub fn row(self) -> u32 {
        self as u32
    }
}

/// Movement keys held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Everything outside the player that one update reads or writes
pub struct PlayerWorld<'a> {
    pub level_width: f64,
    pub platforms: &'a [Rectangle],
    pub pickups: &'a mut Vec<Pickup>,
    pub enemies: &'a mut [Enemy],
    pub timers: &'a mut Timers,
    pub events: &'a mut Vec<GameEvent>,
    pub tuning: &'a PlatformerTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub sprite: Sprite,
    pub vel: Vector2,
    pub accel: Vector2,
    pub speed_limit: f64,
    pub jump_force: f64,
    pub walk_acceleration: f64,
    /// X damping while on the ground
    pub ground_friction: f64,
    pub on_ground: bool,
    pub state: PlayerState,

    pub pearls: u32,
    pub lives: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub can_fly: bool,
    pub punch_improved: bool,
    pub punch: Projectile,

    /// Set while airborne; the next landing plays the landing cue
    landing_cue_armed: bool,
}

impl Player {
    pub fn new(position: Point, size: Vector2, punch_size: Vector2, tuning: &PlatformerTuning) -> Self {
        Self {
            sprite: Sprite::animated(
                position,
                size,
                Animation::new(AnimationType::Loop, FRAMES, FRAME_MS),
            ),
            vel: Vector2::ZERO,
            accel: Vector2::ZERO,
            speed_limit: tuning.player_speed_limit,
            jump_force: tuning.player_jump_force,
            walk_acceleration: tuning.player_walk_acceleration,
            ground_friction: 1.0,
            on_ground: false,
            state: PlayerState::Idle,
            pearls: 0,
            lives: tuning.player_start_lives,
            shield: tuning.player_max_shield,
            max_shield: tuning.player_max_shield,
            can_fly: false,
            punch_improved: false,
            punch: Projectile::new(punch_size, tuning),
            landing_cue_armed: false,
        }
    }

    /// Collision rectangle
    pub fn bounds(&self) -> Rectangle {
        actor_hit_box(&self.sprite.bounds())
    }

    pub fn is_hit(&self) -> bool {
        self.state == PlayerState::Hitted
    }

    /// Turn input into acceleration, facing and state
    fn steer(&mut self, input: &PlayerInput, tuning: &PlatformerTuning) {
        if input.move_left && !input.move_right {
            self.accel.x = -self.walk_acceleration;
            self.ground_friction = 1.0;
            self.state = PlayerState::Moving;
            self.sprite.effects = SpriteEffects::FlipHorizontally;
        }
        if input.move_right && !input.move_left {
            self.accel.x = self.walk_acceleration;
            self.ground_friction = 1.0;
            self.state = PlayerState::Moving;
            self.sprite.effects = SpriteEffects::None;
        }
        if input.jump && self.on_ground {
            self.vel.y += self.jump_force;
            self.on_ground = false;
            self.ground_friction = 1.0;
        }
        if !input.move_left && !input.move_right {
            self.accel.x = 0.0;
            self.ground_friction = tuning.player_idle_friction;
            self.state = PlayerState::Idle;
        }
        if !self.on_ground {
            self.state = PlayerState::Jumping;
            self.landing_cue_armed = true;
        }
    }

    /// Acceleration, friction, gliding or gravity, then the speed caps
    fn integrate_velocity(&mut self, input: &PlayerInput, gravity: f64, events: &mut Vec<GameEvent>) {
        self.vel += self.accel;

        if self.on_ground {
            self.vel.x *= self.ground_friction;
        }

        if self.can_fly && input.jump && !self.on_ground && self.vel.y > 0.0 {
            self.state = PlayerState::Flying;
            self.vel.x /= 2.0;
            self.vel.y = self.speed_limit / FLY_SPEED_DIVISOR;
            events.push(GameEvent::Fly);
        } else {
            self.vel.y += gravity;
        }

        // Upward speed stays uncapped so the jump keeps its height
        self.vel.x = self.vel.x.clamp(-self.speed_limit, self.speed_limit);
        self.vel.y = self.vel.y.min(self.speed_limit * 2.0);
    }

    /// One tick of player logic
    pub fn update(&mut self, input: &PlayerInput, punch_active: bool, world: PlayerWorld<'_>) {
        let tuning = world.tuning;

        if !self.is_hit() {
            self.steer(input, tuning);
            self.integrate_velocity(input, tuning.gravity_force, world.events);
        }

        self.sprite.position += self.vel;

        if punch_active {
            self.punch.update(
                &self.sprite,
                world.level_width,
                world.enemies,
                world.timers,
                world.events,
                tuning,
            );
        }

        let bounds = self.bounds();

        let contact = resolve_platforms(
            &bounds,
            &mut self.vel,
            &mut self.on_ground,
            world.platforms,
            tuning.gravity_force,
        );
        self.sprite.position.y -= contact.lift;
        if contact.landed && self.landing_cue_armed {
            self.landing_cue_armed = false;
            world.events.push(GameEvent::Landed);
        }

        let mut picked = Vec::new();
        world.pickups.retain(|pickup| {
            let hit = bounds.intersects(&pickup.bounds()).is_some();
            if hit {
                picked.push(pickup.kind);
            }
            !hit
        });
        for kind in picked {
            self.pick(kind, world.events, tuning);
        }

        if !self.is_hit() {
            for enemy in world.enemies.iter() {
                if enemy.is_hit() || bounds.intersects(&enemy.bounds()).is_none() {
                    continue;
                }
                self.take_hit(world.timers, world.events, tuning);
            }
        }

        let fix = level_edge_correction(&self.bounds(), world.level_width);
        self.sprite.position += fix.offset;
        if fix.stop_x {
            self.vel.x = 0.0;
        }
        if fix.stop_y {
            self.vel.y = 0.0;
        }

        let row = self.state.row();
        if let Some(anim) = self.sprite.animation_mut() {
            anim.row = row;
        }
    }

    /// Knocked back by an enemy: away from the facing, upward, shield down
    fn take_hit(&mut self, timers: &mut Timers, events: &mut Vec<GameEvent>, tuning: &PlatformerTuning) {
        self.vel.y += self.jump_force / 3.0;
        self.vel.x -= self.speed_limit * 2.0 * self.sprite.effects.direction();
        self.on_ground = false;
        self.ground_friction = 1.0;
        self.state = PlayerState::Hitted;
        timers.schedule(tuning.player_hit_recover_ms, TimerTask::PlayerRecover);
        events.push(GameEvent::PlayerHit);
        self.shield = self.shield.saturating_sub(1);
        log::debug!("Player hit, shield {}", self.shield);
    }

    /// Apply a collected pickup
    pub fn pick(&mut self, kind: PickupKind, events: &mut Vec<GameEvent>, tuning: &PlatformerTuning) {
        match kind {
            PickupKind::Pearl => {
                self.pearls += 1;
                if self.pearls >= tuning.pearls_per_life {
                    self.pearls = 0;
                    self.lives += 1;
                }
                events.push(GameEvent::Pearl);
            }
            PickupKind::Life => self.lives += 1,
            PickupKind::MiniShield => self.shield = (self.shield + 1).min(self.max_shield),
            PickupKind::Shield => {
                self.shield = self.max_shield;
                events.push(GameEvent::ShieldRestored);
            }
            PickupKind::PunchSpeed => {
                self.punch.improve_speed(tuning);
                self.punch_improved = true;
                events.push(GameEvent::PowerUp);
            }
            PickupKind::PunchPower => self.punch.power = tuning.punch_improved_power,
            PickupKind::EternalFly => {
                self.can_fly = true;
                events.push(GameEvent::PowerUp);
            }
        }
        log::debug!("Picked {kind:?}");
    }

    /// Leave the hit state
    pub fn recover(&mut self) {
        if self.is_hit() {
            self.state = PlayerState::Idle;
        }
    }
}
