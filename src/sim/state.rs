//! Game state and core simulation types
//!
//! Plain data: the court, the two paddles and the ball. Behavior that spans
//! several entities lives in `collision` and `tick`.

use std::time::Instant;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PongError, Result};

/// Which half of the court something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Glyphs a display knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Diamond,
    VerticalLine,
    HorizontalLine,
    TopTee,
    BottomTee,
    Checkerboard,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball rebounded off the paddle on this side
    PaddleHit(Side),
    /// Ball rebounded off the top or bottom wall
    WallBounce,
    /// This side was awarded a point
    Point(Side),
}

/// The playing field. `width` is the vertical extent, `length` the horizontal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub width: i32,
    pub length: i32,
    pub center_x: i32,
    pub left_score: i32,
    pub right_score: i32,
    pub padding: i32,
}

impl Court {
    pub fn new(width: i32, length: i32) -> Result<Self> {
        if width < MIN_COURT_EXTENT || length < MIN_COURT_EXTENT {
            return Err(PongError::CourtTooSmall {
                width,
                length,
                min_width: MIN_COURT_EXTENT,
                min_length: MIN_COURT_EXTENT,
            });
        }
        Ok(Self {
            width,
            length,
            center_x: length / 2,
            left_score: 0,
            right_score: 0,
            padding: COURT_PADDING,
        })
    }

    /// Where a freshly served ball starts
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x as f32, (self.width / 2) as f32)
    }

    pub fn score(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn award_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left_score += 1,
            Side::Right => self.right_score += 1,
        }
    }
}

/// A vertical paddle fixed at column `x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: i32,
    pub size: i32,
    pub top_y: i32,
    /// Last observed vertical speed (rows per second, signed)
    pub speed: f32,
    pub last_move: Instant,
}

impl Paddle {
    /// Create a paddle centered on row `center_y`
    pub fn new(x: i32, center_y: i32, size: i32, now: Instant) -> Self {
        Self {
            x,
            size,
            top_y: center_y - size / 2,
            speed: 0.0,
            last_move: now,
        }
    }

    /// True when a paddle with top edge `top_y` fits strictly inside the court
    pub fn fits(&self, top_y: i32, court_width: i32) -> bool {
        top_y > 0 && top_y + self.size < court_width
    }

    /// Move the paddle by `delta_y` rows.
    ///
    /// Moves that would leave the court are rejected without touching any
    /// field. An accepted move records the speed since the previous move.
    pub fn try_move(&mut self, delta_y: i32, court_width: i32, now: Instant) -> bool {
        let next_y = self.top_y + delta_y;
        if !self.fits(next_y, court_width) {
            return false;
        }

        let elapsed = now
            .saturating_duration_since(self.last_move)
            .as_secs_f32()
            .max(MIN_MOVE_INTERVAL_SECS);
        self.top_y = next_y;
        self.speed = delta_y as f32 / elapsed;
        self.last_move = now;
        true
    }

    /// Seconds since the paddle last moved
    pub fn idle_secs(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.last_move).as_secs_f32()
    }

    /// Row range the paddle covers, inclusive of both ends
    pub fn covers(&self, y: f32) -> bool {
        y >= self.top_y as f32 && y <= (self.top_y + self.size) as f32
    }
}

/// The ball. `next` is the projected position for the tick in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub next: Vec2,
    pub vel: Vec2,
    pub glyph: Glyph,
}

impl Ball {
    /// Create a ball served from `pos`
    pub fn new(pos: Vec2, rng: &mut impl Rng) -> Self {
        let mut ball = Self {
            pos,
            next: pos,
            vel: Vec2::ZERO,
            glyph: Glyph::Diamond,
        };
        ball.place(pos, rng);
        ball
    }

    /// Put the ball at `pos` with a fresh random serve.
    ///
    /// Horizontal speed is always exactly one column per tick so the ball
    /// can never skip over a paddle's column.
    pub fn place(&mut self, pos: Vec2, rng: &mut impl Rng) {
        self.pos = pos;
        self.next = pos;
        let vx = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let vy = rng.random_range(-1.0..=1.0);
        self.vel = Vec2::new(vx, vy);
    }

    /// Linear extrapolation one tick ahead
    pub fn project(&mut self) {
        self.next = self.pos + self.vel;
    }

    pub fn commit(&mut self) {
        self.pos = self.next;
    }

    /// Grid cell the ball occupies (row, col)
    pub fn cell(&self) -> (i32, i32) {
        (self.pos.y as i32, self.pos.x as i32)
    }
}
