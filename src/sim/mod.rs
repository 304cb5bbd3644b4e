//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws or reads keys:
//! - Fixed logical step per tick, independent of wall-clock delay
//! - Seeded RNG only
//! - Time is passed in as an `Instant`, never read implicitly

pub mod collision;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{
    crosses_paddle_x, detect_paddle_and_rebound, detect_wall_and_rebound, limit_acceleration,
    overlaps_paddle_y, paddle_hit, paddle_impulse, rebound_on_paddle, scoring_side,
};
pub use state::{Ball, Court, GameEvent, Glyph, Paddle, Side};
pub use tick::tick;
pub use world::{MIN_PLAYABLE_LENGTH, MIN_PLAYABLE_WIDTH, Snapshot, World};
