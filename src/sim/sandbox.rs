//! Ball sandbox world
//!
//! Balls live in a physics collection that keeps spawn order for the whole
//! session. Grabbing a ball only moves it to the top of a separate render
//! order; the physics order (and so the pairwise resolution order) never
//! changes while iterating.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Ball, BallId, BallWorld, GravityDirection};
use crate::geom::{Point, Vector2};
use crate::settings::SandboxTuning;

/// Pointer state sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    pub position: Point,
    /// Primary button held
    pub pressed: bool,
    /// Pointer moved since the last tick
    pub moving: bool,
}

/// The ball sandbox
#[derive(Debug, Clone)]
pub struct Sandbox {
    pub width: f64,
    pub height: f64,
    pub gravity_on: bool,
    pub gravity_direction: GravityDirection,
    pub tuning: SandboxTuning,
    /// Simulation tick counter
    pub ticks: u64,
    balls: Vec<Ball>,
    render_order: Vec<BallId>,
    /// Sandbox-wide drag lock: at most one ball is dragged
    dragging: Option<BallId>,
    next_id: BallId,
    rng: Pcg32,
}

impl Sandbox {
    pub fn new(width: f64, height: f64, tuning: SandboxTuning, seed: u64) -> Self {
        Self {
            width,
            height,
            gravity_on: false,
            gravity_direction: GravityDirection::Down,
            tuning,
            ticks: 0,
            balls: Vec::new(),
            render_order: Vec::new(),
            dragging: None,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Balls in physics order
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Balls back to front
    pub fn render_order(&self) -> impl Iterator<Item = &Ball> + '_ {
        self.render_order.iter().filter_map(|&id| self.ball(id))
    }

    /// Ball currently being dragged
    pub fn dragging(&self) -> Option<BallId> {
        self.dragging
    }

    pub fn set_gravity(&mut self, on: bool, direction: GravityDirection) {
        self.gravity_on = on;
        self.gravity_direction = direction;
        log::debug!("Sandbox gravity {on} toward {direction:?}");
    }

    pub fn world(&self) -> BallWorld {
        BallWorld {
            width: self.width,
            height: self.height,
            gravity: self.gravity_on.then_some(self.gravity_direction),
            gravity_force: self.tuning.gravity_force,
        }
    }

    /// Add a ball whose bounding box starts at `position`
    pub fn spawn_ball(&mut self, radius: f64, position: Point) -> BallId {
        let id = self.next_id;
        self.next_id += 1;
        self.balls.push(Ball::new(id, radius, position, &self.tuning));
        self.render_order.push(id);
        id
    }

    /// Add a ball at a random 10-29% scale of `texture_size`, centered
    pub fn spawn_random_ball(&mut self, texture_size: Vector2) -> BallId {
        let scale = f64::from(self.rng.random_range(0..20u32) + 10) / 100.0;
        let size = texture_size * scale;
        let position = Point::new(self.width / 2.0, self.height / 2.0) - size / 2.0;
        self.spawn_ball(size.x / 2.0, position)
    }

    /// Remove every ball
    pub fn clear(&mut self) {
        log::debug!("Clearing {} balls", self.balls.len());
        self.balls.clear();
        self.render_order.clear();
        self.dragging = None;
    }

    /// Advance one tick
    ///
    /// Each ball in physics order: drag handling, gravity, movement, contact
    /// against every other ball in physics order, level edges, sprite sync.
    pub fn step(&mut self, pointer: &PointerInput) {
        let world = self.world();
        let count = self.balls.len();

        for i in 0..count {
            self.handle_drag(i, pointer);

            let ball = &mut self.balls[i];
            ball.apply_gravity(&world, &mut self.rng);
            ball.integrate();

            if count > 1 && !self.balls[i].dragged {
                for j in 0..count {
                    if i == j {
                        continue;
                    }
                    let (ball, other) = pair_mut(&mut self.balls, i, j);
                    if let Err(err) = ball.collide_with(other) {
                        log::warn!("Skipping contact {} vs {}: {err}", ball.id, other.id);
                    }
                }
            }

            let ball = &mut self.balls[i];
            ball.resolve_edges(&world);
            ball.sync_sprite();
        }

        self.ticks += 1;
    }

    fn handle_drag(&mut self, i: usize, pointer: &PointerInput) {
        let ball = &mut self.balls[i];

        if self.dragging.is_none()
            && ball.draggable
            && pointer.pressed
            && ball.circle.contains(pointer.position)
        {
            ball.grab();
            self.dragging = Some(ball.id);
            let id = ball.id;
            self.render_order.retain(|&other| other != id);
            self.render_order.push(id);
            log::trace!("Grabbed ball {id}");
        }

        let ball = &mut self.balls[i];
        if ball.dragged && pointer.moving {
            ball.circle.set_center(pointer.position);
        }

        if ball.dragged && !pointer.pressed {
            ball.release();
            self.dragging = None;
            log::trace!("Dropped ball {}", ball.id);
        }
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
