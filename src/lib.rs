//! xgame-sim - collision kernel and entity simulation for two 2D demos
//!
//! Core modules:
//! - `geom`: Vector, rectangle, circle and segment primitives
//! - `sim`: Deterministic simulation (ball sandbox, platformer entities, tick)
//! - `level`: Level descriptions loaded from JSON
//! - `settings`: Data-driven tuning
//!
//! Drawing, asset loading and audio playback belong to the host. The
//! simulation exposes sprite rectangles, rotation, facing, animation frames
//! and queued audio cues for it.

pub mod geom;
pub mod level;
pub mod settings;
pub mod sim;

pub use level::{LevelDef, LevelError};
pub use settings::{PlatformerTuning, SandboxTuning, Settings};

/// Host-facing constants
pub mod consts {
    /// One frame at 60 Hz, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default canvas size
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;

    /// Ball texture edge; spawned balls are 10-29% of it
    pub const BALL_TEXTURE_SIZE: f64 = 512.0;
}
