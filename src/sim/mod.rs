//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod sandbox;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod timers;

pub use ball::{Ball, BallId, BallWorld, GravityDirection};
pub use camera::Camera;
pub use collision::{
    CircleContact, EdgeCorrection, PlatformContact, actor_hit_box, circle_contact,
    level_edge_correction, reflect_velocity, resolve_platforms,
};
pub use enemy::{Enemy, EnemyState};
pub use pickup::{Pickup, PickupKind};
pub use player::{Player, PlayerInput, PlayerState, PlayerWorld};
pub use projectile::Projectile;
pub use sandbox::{PointerInput, Sandbox};
pub use sprite::{Animation, AnimationType, Sprite, SpriteEffects, SpriteKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use timers::{EnemyId, TimerHandle, TimerTask, Timers};
