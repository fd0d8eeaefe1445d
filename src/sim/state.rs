//! Platformer world state
//!
//! Everything the tick reads and writes lives here. Entities are plain
//! collections in spawn order; deferred work sits in `timers` as data.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::Enemy;
use super::pickup::Pickup;
use super::player::{Player, PlayerState};
use super::timers::{EnemyId, TimerTask, Timers};
use crate::geom::Rectangle;
use crate::level::LevelDef;
use crate::settings::PlatformerTuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Help screen; the game starts here
    Paused,
    /// Active gameplay
    Playing,
    /// Exit reached with every pearl
    GameWin,
    /// Shield gone or fell out of the level
    GameOver,
}

/// Audio cues raised by the simulation, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PunchThrown,
    PunchHitEnemy,
    PlayerHit,
    Landed,
    Pearl,
    ShieldRestored,
    PowerUp,
    Fly,
    IdleReminder,
    Win,
    GameOver,
}

/// Complete platformer state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    /// Ticks spent playing
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub platforms: Vec<Rectangle>,
    pub win_rect: Rectangle,
    pub level_width: f64,
    pub level_height: f64,
    pub pearls_to_collect: u32,
    pub camera: Camera,
    pub timers: Timers,
    /// The punch is out (thrown and not caught yet)
    pub punch_active: bool,
    /// Cues raised since the last drain
    pub events: Vec<GameEvent>,
    pub tuning: PlatformerTuning,
    /// Kept for restarts
    pub level: LevelDef,
    rng: Pcg32,
}

impl GameState {
    /// Build the world described by `level`
    pub fn new(level: &LevelDef, tuning: &PlatformerTuning, seed: u64) -> Self {
        let mut timers = Timers::new();
        timers.schedule_every(tuning.idle_reminder_ms, TimerTask::IdleReminder);

        let enemies: Vec<Enemy> = level
            .enemies
            .iter()
            .zip(1..)
            .map(|(&position, id)| Enemy::new(id, position, level.enemy_size))
            .collect();
        for enemy in &enemies {
            timers.schedule_every(tuning.enemy_state_period_ms, TimerTask::EnemyStateChange(enemy.id));
        }

        let pickups = level
            .pickups
            .iter()
            .map(|spawn| Pickup::new(spawn.kind, spawn.position))
            .collect();

        log::debug!(
            "Building level '{}' with seed {seed}: {} enemies, {} pearls",
            level.name,
            enemies.len(),
            level.pearl_count()
        );

        Self {
            seed,
            phase: GamePhase::Paused,
            time_ticks: 0,
            player: Player::new(level.player, level.player_size, level.punch_size, tuning),
            enemies,
            pickups,
            platforms: level.platforms.clone(),
            win_rect: level.win_rect,
            level_width: level.width,
            level_height: level.height,
            pearls_to_collect: level.pearl_count(),
            camera: Camera::new(level.view.x, level.view.y, level.width, level.height, tuning.camera_zoom),
            timers,
            punch_active: false,
            events: Vec::new(),
            tuning: tuning.clone(),
            level: level.clone(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Rebuild the level from scratch, back on the help screen
    pub fn restart(&mut self) {
        let seed = self.rng.random();
        log::info!("Restarting level '{}'", self.level.name);
        *self = Self::new(&self.level, &self.tuning, seed);
    }

    /// Take every queued cue
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Carry out a timer task; tasks for entities that are gone do nothing
    pub fn apply_timer_task(&mut self, task: TimerTask) {
        match task {
            TimerTask::PlayerRecover => self.player.recover(),
            TimerTask::EnemyStateChange(id) => {
                if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) {
                    enemy.change_state(&mut self.rng);
                }
            }
            TimerTask::EnemyRemove(id) => self.remove_enemy(id),
            TimerTask::IdleReminder => {
                if self.phase == GamePhase::Playing && self.player.state == PlayerState::Idle {
                    self.events.push(GameEvent::IdleReminder);
                }
            }
        }
    }

    /// Hide and drop an enemy, cancelling whatever it still had scheduled
    fn remove_enemy(&mut self, id: EnemyId) {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) else {
            log::trace!("Enemy {id} already gone");
            return;
        };
        enemy.sprite.visible = false;
        self.enemies.retain(|e| e.id != id);
        let cancelled = self.timers.cancel_where(|task| task.enemy() == Some(id));
        log::debug!("Removed enemy {id} ({cancelled} timers cancelled)");
    }
}
