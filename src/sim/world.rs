//! Shared world handle
//!
//! The update loop, the render loop and the input thread all hold an
//! `Arc<World>`. Each entity has its own lock so a paddle move never waits on
//! a tick in progress for longer than it takes to copy a paddle.
//!
//! Lock order: ball, then paddles, then court. Only the update path holds more
//! than one lock at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use rand::Rng;

use super::state::{Ball, Court, GameEvent, Paddle, Side};
use super::tick::tick;
use crate::consts::*;
use crate::error::{PongError, Result};

/// Smallest court that still fits a paddle strictly inside it
pub const MIN_PLAYABLE_WIDTH: i32 = PADDLE_SIZE + 2;
/// Smallest court that keeps the two paddles apart with room between them
pub const MIN_PLAYABLE_LENGTH: i32 = 2 * COURT_PADDING + 3;

/// Every write leaves its entity consistent, so a poisoned lock still holds
/// valid data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Copy of the world taken entity by entity
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub court: Court,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
}

#[derive(Debug)]
pub struct World {
    court: Mutex<Court>,
    paddles: [Mutex<Paddle>; 2],
    ball: Mutex<Ball>,
}

impl World {
    /// Build the world for a terminal of `width` rows and `length` columns
    pub fn new(width: i32, length: i32, now: Instant, rng: &mut impl Rng) -> Result<Self> {
        if width < MIN_PLAYABLE_WIDTH || length < MIN_PLAYABLE_LENGTH {
            return Err(PongError::CourtTooSmall {
                width,
                length,
                min_width: MIN_PLAYABLE_WIDTH,
                min_length: MIN_PLAYABLE_LENGTH,
            });
        }
        let court = Court::new(width, length)?;
        let left = Paddle::new(court.padding, width / 2, PADDLE_SIZE, now);
        let right = Paddle::new(length - 1 - court.padding, width / 2, PADDLE_SIZE, now);
        let ball = Ball::new(court.center(), rng);
        Ok(Self::from_parts(court, [left, right], ball))
    }

    /// Assemble a world from existing entities
    pub fn from_parts(court: Court, paddles: [Paddle; 2], ball: Ball) -> Self {
        let [left, right] = paddles;
        Self {
            court: Mutex::new(court),
            paddles: [Mutex::new(left), Mutex::new(right)],
            ball: Mutex::new(ball),
        }
    }

    pub fn court(&self) -> Court {
        *lock(&self.court)
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        *lock(&self.paddles[side.index()])
    }

    pub fn ball(&self) -> Ball {
        *lock(&self.ball)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            court: self.court(),
            paddles: [self.paddle(Side::Left), self.paddle(Side::Right)],
            ball: self.ball(),
        }
    }

    /// Overwrite a paddle wholesale
    pub fn set_paddle(&self, side: Side, paddle: Paddle) {
        *lock(&self.paddles[side.index()]) = paddle;
    }

    /// Overwrite the ball wholesale
    pub fn set_ball(&self, ball: Ball) {
        *lock(&self.ball) = ball;
    }

    /// Move one paddle by `delta_y` rows. Out-of-court moves are ignored.
    pub fn move_paddle(&self, side: Side, delta_y: i32, now: Instant) -> bool {
        let width = lock(&self.court).width;
        lock(&self.paddles[side.index()]).try_move(delta_y, width, now)
    }

    /// Run one simulation tick
    pub fn update(&self, now: Instant, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut ball = lock(&self.ball);
        let paddles = [self.paddle(Side::Left), self.paddle(Side::Right)];
        let mut court = lock(&self.court);
        tick(&mut ball, &paddles, &mut court, now, rng)
    }
}
