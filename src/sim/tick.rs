//! Simulation tick
//!
//! One tick advances the ball by exactly its velocity, regardless of how long
//! the loop slept in between.

use std::time::Instant;

use rand::Rng;

use super::collision::{detect_paddle_and_rebound, detect_wall_and_rebound, scoring_side};
use super::state::{Ball, Court, GameEvent, Paddle, Side};

/// Advance the ball by one tick against both paddles and the court.
///
/// Both paddles are tested every tick, left first, whichever side the ball is on.
pub fn tick(
    ball: &mut Ball,
    paddles: &[Paddle; 2],
    court: &mut Court,
    now: Instant,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    ball.project();

    for side in Side::BOTH {
        if detect_paddle_and_rebound(&paddles[side.index()], ball, now) {
            events.push(GameEvent::PaddleHit(side));
        }
    }

    if detect_wall_and_rebound(court, ball) {
        events.push(GameEvent::WallBounce);
    }

    match scoring_side(court, ball) {
        Some(side) => {
            court.award_point(side);
            ball.place(court.center(), rng);
            events.push(GameEvent::Point(side));
        }
        None => ball.commit(),
    }

    events
}
