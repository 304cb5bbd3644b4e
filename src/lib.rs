//! Console Pong - a two-paddle game played on a character grid
//!
//! Core modules:
//! - `sim`: World model and per-tick physics (collisions, rebound, scoring)
//! - `clock`: Runtime-adjustable tick delay shared by all loops
//! - `input`: Key events to paddle moves, tick-rate changes and quit
//! - `renderer`: Projection of the world onto a `Display`
//! - `scheduler`: Independent update/render loops and the quit signal
//! - `platform`: Terminal setup and crossterm-backed collaborators
//! - `settings`: Key bindings and refresh-rate configuration

pub mod clock;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use clock::TickController;
pub use error::PongError;
pub use settings::{KeySettings, RefreshRateSettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Rows a paddle spans
    pub const PADDLE_SIZE: i32 = 6;
    /// Margin used for score placement and paddle inset
    pub const COURT_PADDING: i32 = 3;
    /// Smallest court either axis may have
    pub const MIN_COURT_EXTENT: i32 = 3;

    /// Seconds after a paddle move during which it still imparts "english"
    pub const ENERGY_WINDOW_SECS: f32 = 0.5;
    /// Fraction of paddle speed handed to the ball
    pub const ENERGY_TRANSFER_COEF: f32 = 0.3;
    /// Largest vertical impulse a single paddle hit may add
    pub const ACCELERATION_THRESHOLD: f32 = 1.5;
    /// Floor for the time between two paddle moves (keeps speed finite)
    pub const MIN_MOVE_INTERVAL_SECS: f32 = 0.001;

    /// Refresh-rate defaults, in microseconds
    pub const REFRESH_UPPER_BOUND_US: u64 = 200_000;
    pub const REFRESH_LOWER_BOUND_US: u64 = 5_000;
    pub const REFRESH_DEFAULT_US: u64 = 90_000;
    pub const REFRESH_DELTA_US: u64 = 5_000;
}

/// Number of columns needed to print `score`, including a minus sign.
///
/// Zero has no logarithm, so it is handled before `ilog10`.
#[inline]
pub fn digit_count(score: i32) -> i32 {
    let sign = i32::from(score < 0);
    match score.unsigned_abs().checked_ilog10() {
        Some(log) => log as i32 + 1 + sign,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(7), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999), 3);
        assert_eq!(digit_count(-5), 2);
        assert_eq!(digit_count(i32::MIN), 11);
    }
}
