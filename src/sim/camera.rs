//! Dead-zone scrolling camera

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rectangle, Vector2};

/// Inner margin on the top and left, as a fraction of the view
const NEAR_MARGIN: f64 = 0.3;
/// Inner margin on the bottom and right, as a fraction of the view
const FAR_MARGIN: f64 = 0.7;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.1;

/// Camera that scrolls only when its target leaves the inner margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// View size in screen pixels
    pub width: f64,
    pub height: f64,
    pub level_width: f64,
    pub level_height: f64,
    pub zoom: f64,
    /// Upper-left corner in level coordinates
    pub position: Point,
    /// Horizontal scroll since the last commit (parallax layers use it)
    pub velocity: Vector2,
    previous_x: f64,
}

impl Camera {
    pub fn new(width: f64, height: f64, level_width: f64, level_height: f64, zoom: f64) -> Self {
        Self {
            width,
            height,
            level_width,
            level_height,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            position: Point::ZERO,
            velocity: Vector2::ZERO,
            previous_x: 0.0,
        }
    }

    fn left_inner(&self) -> f64 {
        self.position.x + self.width * NEAR_MARGIN / self.zoom
    }

    fn right_inner(&self) -> f64 {
        self.position.x + self.width * FAR_MARGIN / self.zoom
    }

    fn top_inner(&self) -> f64 {
        self.position.y + self.height * NEAR_MARGIN / self.zoom
    }

    fn bottom_inner(&self) -> f64 {
        self.position.y + self.height * FAR_MARGIN / self.zoom
    }

    /// The dead zone in level coordinates
    pub fn inner_bounds(&self) -> Rectangle {
        let left = self.left_inner();
        let top = self.top_inner();
        Rectangle::new(left, top, self.right_inner() - left, self.bottom_inner() - top)
    }

    pub fn zoom_in(&mut self) {
        if self.zoom < MAX_ZOOM {
            self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        }
    }

    pub fn zoom_out(&mut self) {
        if self.zoom > MIN_ZOOM {
            self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        }
    }

    /// Follow `target` (the sprite rectangle being tracked)
    pub fn update(&mut self, target: &Rectangle) {
        if target.left() < self.left_inner() {
            self.position.x = (target.left() - self.width * NEAR_MARGIN / self.zoom).floor();
        }
        if target.right() > self.right_inner() {
            self.position.x = (target.right() - self.width * FAR_MARGIN / self.zoom).floor();
        }
        if target.top() < self.top_inner() {
            self.position.y = (target.top() - self.height * NEAR_MARGIN / self.zoom).floor();
        }
        if target.bottom() > self.bottom_inner() {
            self.position.y = (target.bottom() - self.height * FAR_MARGIN / self.zoom).floor();
        }

        // Keep the visible area inside the level
        let max_x = (self.level_width * self.zoom - self.width) / self.zoom;
        let max_y = (self.level_height * self.zoom - self.height) / self.zoom;
        if self.position.x < 0.0 {
            self.position.x = 0.0;
        }
        if self.position.x > max_x {
            self.position.x = max_x;
        }
        if self.position.y < 0.0 {
            self.position.y = 0.0;
        }
        if self.position.y > max_y {
            self.position.y = max_y;
        }

        self.velocity.x = self.position.x - self.previous_x;
    }

    /// Remember this frame's scroll for the next velocity
    pub fn commit(&mut self) {
        self.previous_x = self.position.x;
    }
}
