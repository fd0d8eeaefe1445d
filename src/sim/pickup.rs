//! Collectible objects

use serde::{Deserialize, Serialize};

use super::sprite::{Animation, AnimationType, Sprite};
use crate::geom::{Point, Rectangle, Vector2};

/// What a pickup gives the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupKind {
    Pearl,
    Life,
    MiniShield,
    Shield,
    PunchSpeed,
    PunchPower,
    EternalFly,
}

impl PickupKind {
    /// Drawn size of the pickup (frame size times sprite scale)
    pub fn size(self) -> Vector2 {
        match self {
            PickupKind::Pearl => Vector2::splat(24.0 * 1.35),
            PickupKind::Shield => Vector2::new(24.0 * 2.1, 19.0 * 1.7),
            PickupKind::PunchSpeed | PickupKind::EternalFly => Vector2::splat(64.0 * 1.2),
            PickupKind::Life | PickupKind::MiniShield | PickupKind::PunchPower => {
                Vector2::splat(64.0)
            }
        }
    }

    /// Ping-pong animation matching the pickup's sheet
    pub fn animation(self) -> Animation {
        let (frames, ms_per_frame) = match self {
            PickupKind::Pearl => (8, 90.0),
            PickupKind::Shield => (4, 120.0),
            PickupKind::PunchSpeed => (10, 35.0),
            PickupKind::EternalFly => (10, 30.0),
            PickupKind::Life | PickupKind::MiniShield | PickupKind::PunchPower => (10, 25.0),
        };
        Animation::new(AnimationType::PingPongLoop, frames, ms_per_frame)
    }
}

/// A pickup placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub sprite: Sprite,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(kind: PickupKind, position: Point) -> Self {
        Self {
            sprite: Sprite::animated(position, kind.size(), kind.animation()),
            kind,
        }
    }

    /// Hit box: the middle half of the sprite on both axes
    pub fn bounds(&self) -> Rectangle {
        let b = self.sprite.bounds();
        Rectangle::new(
            b.x + b.half_width() / 2.0,
            b.y + b.half_height() / 2.0,
            b.half_width(),
            b.half_height(),
        )
    }
}
