//! Level description
//!
//! A level is plain data: its size, the static platforms, where the player,
//! enemies and pickups start, and the zone that ends the level. Levels load
//! from JSON; `LevelDef::demo()` is a built-in level for the headless driver.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{Point, Rectangle, Vector2};
use crate::sim::pickup::PickupKind;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("cannot read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Invalid(String),
}

/// A pickup and where it starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupSpawn {
    pub kind: PickupKind,
    pub position: Point,
}

fn default_actor_size() -> Vector2 {
    Vector2::splat(80.0)
}

fn default_punch_size() -> Vector2 {
    Vector2::new(38.4, 24.0)
}

fn default_view() -> Vector2 {
    Vector2::new(800.0, 600.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Camera view size in screen pixels
    #[serde(default = "default_view")]
    pub view: Vector2,
    pub player: Point,
    #[serde(default = "default_actor_size")]
    pub player_size: Vector2,
    #[serde(default = "default_actor_size")]
    pub enemy_size: Vector2,
    #[serde(default = "default_punch_size")]
    pub punch_size: Vector2,
    pub win_rect: Rectangle,
    pub platforms: Vec<Rectangle>,
    #[serde(default)]
    pub enemies: Vec<Point>,
    #[serde(default)]
    pub pickups: Vec<PickupSpawn>,
}

impl LevelDef {
    /// Parse and validate a level from JSON text
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDef = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load and validate a level file
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level '{}' from {} ({} platforms, {} enemies, {} pickups)",
            level.name,
            path.display(),
            level.platforms.len(),
            level.enemies.len(),
            level.pickups.len()
        );
        Ok(level)
    }

    /// Reject levels the simulation cannot run
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::Invalid(format!(
                "level size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.view.x > 0.0 && self.view.y > 0.0) {
            return Err(LevelError::Invalid("view size must be positive".into()));
        }
        for (what, size) in [
            ("player", self.player_size),
            ("enemy", self.enemy_size),
            ("punch", self.punch_size),
        ] {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(LevelError::Invalid(format!("{what} size must be positive")));
            }
        }
        if let Some(i) = self
            .platforms
            .iter()
            .position(|p| !(p.width > 0.0 && p.height > 0.0))
        {
            return Err(LevelError::Invalid(format!("platform {i} has no area")));
        }
        if !(self.win_rect.width > 0.0 && self.win_rect.height > 0.0) {
            return Err(LevelError::Invalid("win zone has no area".into()));
        }
        if !(self.player.x >= 0.0 && self.player.x <= self.width) {
            return Err(LevelError::Invalid(format!(
                "player starts outside the level at x = {}",
                self.player.x
            )));
        }
        Ok(())
    }

    /// Pearls the player must hold to finish the level
    pub fn pearl_count(&self) -> u32 {
        self.pickups
            .iter()
            .filter(|p| p.kind == PickupKind::Pearl)
            .count() as u32
    }

    /// Small built-in level: a ground floor with a gap, a few ledges,
    /// two enemies, pearls and power-ups, and the exit on the far right
    pub fn demo() -> Self {
        let pickup = |kind, x, y| PickupSpawn {
            kind,
            position: Point::new(x, y),
        };
        Self {
            name: "demo".into(),
            width: 2400.0,
            height: 900.0,
            view: default_view(),
            player: Point::new(60.0, 700.0),
            player_size: default_actor_size(),
            enemy_size: default_actor_size(),
            punch_size: default_punch_size(),
            win_rect: Rectangle::new(2280.0, 700.0, 100.0, 100.0),
            platforms: vec![
                Rectangle::new(0.0, 800.0, 1100.0, 100.0),
                Rectangle::new(1250.0, 800.0, 1150.0, 100.0),
                Rectangle::new(400.0, 660.0, 200.0, 20.0),
                Rectangle::new(700.0, 560.0, 200.0, 20.0),
                Rectangle::new(1500.0, 640.0, 250.0, 20.0),
            ],
            enemies: vec![Point::new(850.0, 720.0), Point::new(1700.0, 720.0)],
            pickups: vec![
                pickup(PickupKind::Pearl, 300.0, 740.0),
                pickup(PickupKind::Pearl, 480.0, 600.0),
                pickup(PickupKind::Pearl, 780.0, 500.0),
                pickup(PickupKind::Pearl, 1600.0, 580.0),
                pickup(PickupKind::MiniShield, 1000.0, 720.0),
                pickup(PickupKind::PunchSpeed, 1400.0, 720.0),
                pickup(PickupKind::EternalFly, 2000.0, 720.0),
            ],
        }
    }
}
