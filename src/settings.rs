//! Tuning constants
//!
//! Every gameplay number lives here so a JSON file can override it. Missing
//! fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::timers::MIN_PERIOD_MS;

/// Ball sandbox tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxTuning {
    /// Velocity added per tick along the gravity direction
    pub gravity_force: f64,
    /// Lateral damping while on the ground (also damps spin)
    pub ground_friction: f64,
    /// Velocity kept after a ball-ball bounce
    pub ball_bounce_friction: f64,
    /// Velocity kept after a wall bounce
    pub wall_bounce_friction: f64,
    /// Cap on spin handed over in a collision
    pub max_rotation_transmission: f64,
    /// Lateral nudge for a freshly spawned ball at rest
    pub random_impulse: f64,
}

impl Default for SandboxTuning {
    fn default() -> Self {
        Self {
            gravity_force: 0.4,
            ground_friction: 0.975,
            ball_bounce_friction: 0.85,
            wall_bounce_friction: 0.7,
            max_rotation_transmission: 25.0,
            random_impulse: 0.1,
        }
    }
}

/// Platformer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerTuning {
    pub gravity_force: f64,

    // === Player ===
    pub player_speed_limit: f64,
    pub player_jump_force: f64,
    pub player_walk_acceleration: f64,
    /// Friction while idle (1.0 while walking)
    pub player_idle_friction: f64,
    pub player_max_shield: u32,
    pub player_start_lives: u32,
    /// Pearls that convert into one extra life
    pub pearls_per_life: u32,
    pub player_hit_recover_ms: f64,

    // === Enemies ===
    pub enemy_walk_speed: f64,
    pub enemy_state_period_ms: f64,
    pub enemy_remove_delay_ms: f64,
    /// Vertical velocity given to a punched enemy
    pub enemy_knock_up: f64,

    // === Punch ===
    pub punch_speed: f64,
    pub punch_max_scope: f64,
    pub punch_power: f64,
    pub punch_improved_speed: f64,
    pub punch_improved_max_scope: f64,
    pub punch_improved_power: f64,

    // === Misc ===
    pub idle_reminder_ms: f64,
    pub camera_zoom: f64,
}

impl Default for PlatformerTuning {
    fn default() -> Self {
        Self {
            gravity_force: 0.3,

            player_speed_limit: 3.0,
            player_jump_force: -8.0,
            player_walk_acceleration: 2.8,
            player_idle_friction: 0.1,
            player_max_shield: 5,
            player_start_lives: 3,
            pearls_per_life: 100,
            player_hit_recover_ms: 600.0,

            enemy_walk_speed: 1.5,
            enemy_state_period_ms: 1800.0,
            enemy_remove_delay_ms: 600.0,
            enemy_knock_up: -4.0,

            punch_speed: 6.0,
            punch_max_scope: 200.0,
            punch_power: 1.0,
            punch_improved_speed: 8.0,
            punch_improved_max_scope: 290.0,
            punch_improved_power: 1.5,

            idle_reminder_ms: 3500.0,
            camera_zoom: 1.2,
        }
    }
}

impl PlatformerTuning {
    /// Reset periods below `MIN_PERIOD_MS` and negative or non-finite delays
    pub fn sanitize_timers(&mut self) {
        let defaults = Self::default();
        let periods = [
            ("enemy_state_period_ms", &mut self.enemy_state_period_ms, defaults.enemy_state_period_ms),
            ("idle_reminder_ms", &mut self.idle_reminder_ms, defaults.idle_reminder_ms),
        ];
        for (name, value, default) in periods {
            if !(value.is_finite() && *value >= MIN_PERIOD_MS) {
                log::warn!("{name} = {value} is not a usable period, using {default}");
                *value = default;
            }
        }

        let delays = [
            ("player_hit_recover_ms", &mut self.player_hit_recover_ms, defaults.player_hit_recover_ms),
            ("enemy_remove_delay_ms", &mut self.enemy_remove_delay_ms, defaults.enemy_remove_delay_ms),
        ];
        for (name, value, default) in delays {
            if !(value.is_finite() && *value >= 0.0) {
                log::warn!("{name} = {value} is not a usable delay, using {default}");
                *value = default;
            }
        }
    }
}

/// All tuning for both demos
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sandbox: SandboxTuning,
    pub platformer: PlatformerTuning,
}

impl Settings {
    /// Parse settings from JSON text
    ///
    /// Timer durations the scheduler cannot run fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.platformer.sanitize_timers();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }
}
