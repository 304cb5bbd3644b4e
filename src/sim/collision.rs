//! Collision detection and response
//!
//! The ball moves one column per tick, so a paddle hit is a crossing test
//! between the current and projected positions rather than an overlap test.

use std::time::Instant;

use super::state::{Ball, Court, Paddle, Side};
use crate::consts::*;

/// True if the ball's path between `pos` and `next` touches the paddle's column.
///
/// Checking for a sign change instead of equality keeps fast balls from
/// tunnelling through the paddle.
pub fn crosses_paddle_x(paddle: &Paddle, ball: &Ball) -> bool {
    let offset = ball.pos.x - paddle.x as f32;
    let offset_next = ball.next.x - paddle.x as f32;
    offset * offset_next <= 0.0
}

/// True if the projected row lies within the paddle's span
pub fn overlaps_paddle_y(paddle: &Paddle, ball: &Ball) -> bool {
    paddle.covers(ball.next.y)
}

pub fn paddle_hit(paddle: &Paddle, ball: &Ball) -> bool {
    crosses_paddle_x(paddle, ball) && overlaps_paddle_y(paddle, ball)
}

/// Clamp a paddle impulse so a single hit cannot send the ball bouncing wildly
#[inline]
pub fn limit_acceleration(impulse: f32) -> f32 {
    impulse.clamp(-ACCELERATION_THRESHOLD, ACCELERATION_THRESHOLD)
}

/// Vertical impulse a paddle hands to the ball at `now` ("english").
///
/// Decays linearly to zero over the energy window after the paddle's last move.
pub fn paddle_impulse(paddle: &Paddle, now: Instant) -> Option<f32> {
    let idle = paddle.idle_secs(now);
    if idle > ENERGY_WINDOW_SECS {
        return None;
    }
    let impulse = paddle.speed * (1.0 - idle / ENERGY_WINDOW_SECS) * ENERGY_TRANSFER_COEF;
    Some(limit_acceleration(impulse))
}

/// Bounce the ball off `paddle`
pub fn rebound_on_paddle(paddle: &Paddle, ball: &mut Ball, now: Instant) {
    ball.vel.x = -ball.vel.x;
    ball.next.x = ball.pos.x + ball.vel.x;

    if let Some(impulse) = paddle_impulse(paddle, now) {
        ball.vel.y += impulse;
        ball.next.y = ball.pos.y + ball.vel.y;
    }
}

/// Rebound off the paddle if the ball hits it this tick. Returns whether it did.
pub fn detect_paddle_and_rebound(paddle: &Paddle, ball: &mut Ball, now: Instant) -> bool {
    if paddle_hit(paddle, ball) {
        rebound_on_paddle(paddle, ball, now);
        true
    } else {
        false
    }
}

/// Bounce off the top or bottom wall. Returns whether the ball rebounded.
///
/// The vertical move is cancelled for this tick rather than reflected, so the
/// ball stays on the row it was on.
pub fn detect_wall_and_rebound(court: &Court, ball: &mut Ball) -> bool {
    let next_row = ball.next.y as i32;
    if next_row <= 0 || next_row >= court.width - 1 {
        ball.next.y = ball.pos.y;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Side awarded a point if the ball already sits on a side wall.
///
/// Uses the current position, so a point registers the tick after the ball
/// reaches the edge.
pub fn scoring_side(court: &Court, ball: &Ball) -> Option<Side> {
    if ball.pos.x <= 0.0 {
        Some(Side::Left)
    } else if ball.pos.x >= (court.length - 1) as f32 {
        Some(Side::Right)
    } else {
        None
    }
}
