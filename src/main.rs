//! xgame-sim headless driver
//!
//! Runs either demo for a fixed number of frames with scripted input and logs
//! what happened. Set `RUST_LOG=debug` to follow state transitions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use xgame_sim::consts::{BALL_TEXTURE_SIZE, FRAME_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use xgame_sim::geom::Vector2;
use xgame_sim::sim::{GameEvent, GamePhase, GameState, GravityDirection, PointerInput, Sandbox, TickInput, tick};
use xgame_sim::{LevelDef, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Ball sandbox with gravity
    Balls,
    /// Platformer level
    Platformer,
}

#[derive(Parser, Debug)]
#[command(name = "xgame-sim")]
#[command(about = "Headless runner for the ball sandbox and platformer simulations")]
struct Args {
    #[arg(long, value_enum, default_value_t = Demo::Platformer)]
    demo: Demo,
    /// Frames to simulate
    #[arg(long, default_value_t = 1800)]
    ticks: u64,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Level JSON (platformer only, defaults to the built-in level)
    #[arg(long)]
    level: Option<PathBuf>,
    /// Tuning JSON
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Balls to spawn (sandbox only)
    #[arg(long, default_value_t = 8)]
    balls: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("xgame-sim starting: {:?} demo, {} ticks, seed {}", args.demo, args.ticks, args.seed);

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    match args.demo {
        Demo::Balls => {
            run_balls(&args, &settings);
            ExitCode::SUCCESS
        }
        Demo::Platformer => {
            let level = match &args.level {
                Some(path) => match LevelDef::load(path) {
                    Ok(level) => level,
                    Err(err) => {
                        log::error!("{err}");
                        return ExitCode::FAILURE;
                    }
                },
                None => LevelDef::demo(),
            };
            run_platformer(&args, &settings, &level);
            ExitCode::SUCCESS
        }
    }
}

fn run_balls(args: &Args, settings: &Settings) {
    let mut sandbox = Sandbox::new(SCREEN_WIDTH, SCREEN_HEIGHT, settings.sandbox.clone(), args.seed);
    sandbox.set_gravity(true, GravityDirection::Down);
    let texture = Vector2::splat(BALL_TEXTURE_SIZE);
    let pointer = PointerInput::default();

    for frame in 0..args.ticks {
        // One new ball every half second until the count is reached
        if frame % 30 == 0 && (sandbox.balls().len() as u32) < args.balls {
            let id = sandbox.spawn_random_ball(texture);
            log::debug!("Spawned ball {id} at frame {frame}");
        }
        sandbox.step(&pointer);
    }

    let resting = sandbox.balls().iter().filter(|b| b.is_on_ground).count();
    log::info!(
        "Sandbox finished after {} ticks: {} balls, {} resting",
        sandbox.ticks,
        sandbox.balls().len(),
        resting
    );
    for ball in sandbox.balls() {
        let center = ball.circle.center();
        log::info!(
            "  ball {}: center ({:.1}, {:.1}) radius {:.1} speed {:.3} spin {:.2}",
            ball.id,
            center.x,
            center.y,
            ball.circle.radius,
            ball.vel.length(),
            ball.spin
        );
    }
}

/// Walk right, jumping and punching on a fixed rhythm
fn scripted_input(frame: u64) -> TickInput {
    TickInput {
        move_right: frame % 240 < 200,
        jump: frame % 45 < 12,
        punch: frame % 70 == 0,
        ..Default::default()
    }
}

fn run_platformer(args: &Args, settings: &Settings, level: &LevelDef) {
    let mut state = GameState::new(level, &settings.platformer, args.seed);
    let mut cues: Vec<GameEvent> = Vec::new();

    // Leave the help screen
    tick(
        &mut state,
        &TickInput {
            toggle_help: true,
            ..Default::default()
        },
        FRAME_MS,
    );

    for frame in 0..args.ticks {
        tick(&mut state, &scripted_input(frame), FRAME_MS);
        cues.extend(state.drain_events());
        if state.phase != GamePhase::Playing {
            break;
        }
    }

    let count = |cue: GameEvent| cues.iter().filter(|&&c| c == cue).count();
    log::info!(
        "Platformer finished in phase {:?} after {} ticks ({:.0} ms simulated)",
        state.phase,
        state.time_ticks,
        state.timers.now_ms()
    );
    log::info!(
        "  player at ({:.1}, {:.1}), pearls {}/{}, shield {}, lives {}",
        state.player.sprite.position.x,
        state.player.sprite.position.y,
        state.player.pearls,
        state.pearls_to_collect,
        state.player.shield,
        state.player.lives
    );
    log::info!(
        "  enemies left {}, pickups left {}, camera at ({:.0}, {:.0})",
        state.enemies.len(),
        state.pickups.len(),
        state.camera.position.x,
        state.camera.position.y
    );
    log::info!(
        "  cues: {} punches, {} enemy hits, {} player hits, {} landings, {} idle reminders",
        count(GameEvent::PunchThrown),
        count(GameEvent::PunchHitEnemy),
        count(GameEvent::PlayerHit),
        count(GameEvent::Landed),
        count(GameEvent::IdleReminder)
    );
}
