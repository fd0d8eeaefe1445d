//! Sprite handle shared with the renderer
//!
//! The simulation only touches position, size, facing, rotation, visibility
//! and the animation cursor. Texture data stays with the host.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rectangle, Vector2};

/// Draw-time mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpriteEffects {
    #[default]
    None,
    FlipHorizontally,
    FlipVertically,
}

impl SpriteEffects {
    /// Swap between facing right (`None`) and facing left
    pub fn flipped(self) -> Self {
        match self {
            SpriteEffects::FlipHorizontally => SpriteEffects::None,
            _ => SpriteEffects::FlipHorizontally,
        }
    }

    /// +1 when facing right, -1 when mirrored horizontally
    pub fn direction(self) -> f64 {
        if self == SpriteEffects::FlipHorizontally {
            -1.0
        } else {
            1.0
        }
    }
}

/// How an animation behaves after its last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationType {
    /// Stop on the last frame
    PlayOneTime,
    /// Jump back to the first frame
    Loop,
    /// Reverse direction at either end
    PingPongLoop,
}

/// Frame cursor for a sprite sheet animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub kind: AnimationType,
    pub frame_count: u32,
    pub ms_per_frame: f64,
    pub current_frame: u32,
    /// Sheet row, set by the owner to reflect its state
    pub row: u32,
    pub forward: bool,
    pub running: bool,
    elapsed_ms: f64,
}

impl Animation {
    pub fn new(kind: AnimationType, frame_count: u32, ms_per_frame: f64) -> Self {
        Self {
            kind,
            frame_count: frame_count.max(1),
            ms_per_frame,
            current_frame: 0,
            row: 0,
            forward: true,
            running: true,
            elapsed_ms: 0.0,
        }
    }

    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.forward = true;
        self.running = true;
        self.elapsed_ms = 0.0;
    }

    /// Change the frame count, keeping the cursor in range
    pub fn set_frame_count(&mut self, frame_count: u32) {
        self.frame_count = frame_count.max(1);
        if self.current_frame >= self.frame_count {
            self.current_frame = 0;
        }
    }

    /// Advance by wall-clock time, stepping once per elapsed frame period
    pub fn advance(&mut self, dt_ms: f64) {
        if self.ms_per_frame <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= self.ms_per_frame {
            self.elapsed_ms -= self.ms_per_frame;
            self.step();
        }
    }

    /// Move to the next frame according to the animation type
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        let last = self.frame_count.saturating_sub(1);

        match self.kind {
            AnimationType::PlayOneTime => {
                if self.current_frame >= last {
                    self.running = false;
                    return;
                }
            }
            AnimationType::Loop => {
                if self.current_frame >= last {
                    self.current_frame = 0;
                    return;
                }
            }
            AnimationType::PingPongLoop => {
                if last == 0 {
                    return;
                }
                if self.current_frame >= last {
                    self.forward = false;
                }
                if self.current_frame == 0 {
                    self.forward = true;
                }
            }
        }

        if self.forward {
            self.current_frame += 1;
        } else {
            self.current_frame -= 1;
        }
    }

    /// Source rectangle on a sheet with `columns` frames per row
    pub fn source_rect(&self, frame_width: f64, frame_height: f64, columns: u32) -> Rectangle {
        let columns = columns.max(1);
        let col = self.current_frame % columns;
        let line = self.current_frame / columns + self.row;
        Rectangle::new(
            col as f64 * frame_width,
            line as f64 * frame_height,
            frame_width,
            frame_height,
        )
    }
}

/// Static image or animated sheet, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Static,
    Animated(Animation),
}

/// Position and on-screen size of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Upper-left corner
    pub position: Point,
    /// Drawn width and height (texture size times scale)
    pub size: Vector2,
    pub effects: SpriteEffects,
    /// Rotation applied at draw time
    pub rotation: f64,
    pub visible: bool,
    pub kind: SpriteKind,
}

impl Sprite {
    pub fn new(position: Point, size: Vector2) -> Self {
        Self {
            position,
            size,
            effects: SpriteEffects::None,
            rotation: 0.0,
            visible: true,
            kind: SpriteKind::Static,
        }
    }

    pub fn animated(position: Point, size: Vector2, animation: Animation) -> Self {
        Self {
            kind: SpriteKind::Animated(animation),
            ..Self::new(position, size)
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.y
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.size.x / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.size.y / 2.0
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Point {
        self.position + self.size / 2.0
    }

    /// Full drawn rectangle, recomputed on every call
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn animation(&self) -> Option<&Animation> {
        match &self.kind {
            SpriteKind::Animated(anim) => Some(anim),
            SpriteKind::Static => None,
        }
    }

    pub fn animation_mut(&mut self) -> Option<&mut Animation> {
        match &mut self.kind {
            SpriteKind::Animated(anim) => Some(anim),
            SpriteKind::Static => None,
        }
    }

    /// Advance the animation if there is one
    pub fn animate(&mut self, dt_ms: f64) {
        if let Some(anim) = self.animation_mut() {
            anim.advance(dt_ms);
        }
    }
}
