//! Per-frame platformer tick
//!
//! Advances the world by one frame of `dt_ms` milliseconds. Frame logic runs
//! first, in a fixed order; timers that fell due during the frame fire last,
//! so a timer's write wins over anything the frame did to the same field.

use super::player::{PlayerInput, PlayerWorld};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Throw the punch (edge triggered)
    pub punch: bool,
    /// Show or leave the help screen
    pub toggle_help: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    /// Start over from the win or game over screen
    pub restart: bool,
}

impl TickInput {
    fn player(&self) -> PlayerInput {
        PlayerInput {
            move_left: self.move_left,
            move_right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    match state.phase {
        GamePhase::Paused => {
            if input.toggle_help {
                log::debug!("Leaving help screen");
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameWin | GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.toggle_help {
        log::debug!("Showing help screen");
        state.phase = GamePhase::Paused;
        return;
    }

    if input.punch && !state.punch_active {
        state.punch_active = true;
        state.events.push(GameEvent::PunchThrown);
    }

    if input.zoom_in {
        state.camera.zoom_in();
    }
    if input.zoom_out {
        state.camera.zoom_out();
    }

    let world = PlayerWorld {
        level_width: state.level_width,
        platforms: &state.platforms,
        pickups: &mut state.pickups,
        enemies: &mut state.enemies,
        timers: &mut state.timers,
        events: &mut state.events,
        tuning: &state.tuning,
    };
    state.player.update(&input.player(), state.punch_active, world);

    let player_bounds = state.player.bounds();

    if state.player.pearls == state.pearls_to_collect
        && player_bounds.intersects(&state.win_rect).is_some()
    {
        log::info!("Level won after {} ticks", state.time_ticks);
        state.events.push(GameEvent::Win);
        state.phase = GamePhase::GameWin;
        return;
    }

    if state.player.shield == 0 || state.player.sprite.position.y > state.level_height {
        log::info!(
            "Game over after {} ticks (shield {})",
            state.time_ticks,
            state.player.shield
        );
        state.events.push(GameEvent::GameOver);
        state.phase = GamePhase::GameOver;
        return;
    }

    if state.punch_active
        && state.player.punch.returning
        && player_bounds.intersects(&state.player.punch.bounds()).is_some()
    {
        state.player.punch.catch();
        state.punch_active = false;
    }

    state.camera.update(&state.player.sprite.bounds());

    for enemy in &mut state.enemies {
        enemy.update(
            state.level_width,
            &state.platforms,
            state.tuning.gravity_force,
            state.tuning.enemy_walk_speed,
        );
    }

    state.camera.commit();

    state.player.sprite.animate(dt_ms);
    for enemy in &mut state.enemies {
        enemy.sprite.animate(dt_ms);
    }
    for pickup in &mut state.pickups {
        pickup.sprite.animate(dt_ms);
    }

    for task in state.timers.advance(dt_ms) {
        state.apply_timer_task(task);
    }

    state.time_ticks += 1;
}
