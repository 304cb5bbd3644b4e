//! Tick controller
//!
//! Holds the idle delay shared by the update and render loops. The input
//! thread adjusts it while the loops read it, so the value lives in an
//! atomic and the bounds are fixed at construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::settings::RefreshRateSettings;

#[derive(Debug)]
pub struct TickController {
    value_us: AtomicU64,
    lower_bound_us: u64,
    upper_bound_us: u64,
    delta_us: u64,
}

impl Default for TickController {
    fn default() -> Self {
        Self::new(&RefreshRateSettings::default())
    }
}

impl TickController {
    pub fn new(settings: &RefreshRateSettings) -> Self {
        Self {
            value_us: AtomicU64::new(settings.value_us),
            lower_bound_us: settings.lower_bound_us,
            upper_bound_us: settings.upper_bound_us,
            delta_us: settings.delta_us,
        }
    }

    /// Current delay between two iterations of a loop
    pub fn delay(&self) -> Duration {
        Duration::from_micros(self.value_us())
    }

    pub fn value_us(&self) -> u64 {
        self.value_us.load(Ordering::Acquire)
    }

    pub fn bounds_us(&self) -> (u64, u64) {
        (self.lower_bound_us, self.upper_bound_us)
    }

    /// Shorten the delay by one step. Returns false if the lower bound forbids it.
    pub fn speed_up(&self) -> bool {
        self.adjust(-1)
    }

    /// Lengthen the delay by one step. Returns false if the upper bound forbids it.
    pub fn slow_down(&self) -> bool {
        self.adjust(1)
    }

    fn adjust(&self, coefficient: i64) -> bool {
        loop {
            let current = self.value_us.load(Ordering::Acquire);
            let Some(next) = current.checked_add_signed(coefficient * self.delta_us as i64) else {
                return false;
            };
            if next < self.lower_bound_us || next > self.upper_bound_us {
                return false;
            }
            if self
                .value_us
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                log::debug!("Refresh delay {}us -> {}us", current, next);
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let clock = TickController::default();
        assert_eq!(clock.delay(), Duration::from_millis(90));
        assert_eq!(clock.bounds_us(), (5_000, 200_000));
    }

    #[test]
    fn test_speed_up_saturates_at_lower_bound() {
        let clock = TickController::default();
        for _ in 0..100 {
            clock.speed_up();
        }
        assert_eq!(clock.value_us(), 5_000);
        assert!(!clock.speed_up());
        assert_eq!(clock.value_us(), 5_000);
    }

    #[test]
    fn test_slow_down_saturates_at_upper_bound() {
        let clock = TickController::default();
        let mut accepted = 0;
        while clock.slow_down() {
            accepted += 1;
        }
        assert_eq!(accepted, 22);
        assert_eq!(clock.value_us(), 200_000);
    }

    #[test]
    fn test_unaligned_step_is_rejected_not_clamped() {
        let clock = TickController::new(&RefreshRateSettings {
            upper_bound_us: 10_000,
            lower_bound_us: 5_000,
            value_us: 7_000,
            delta_us: 5_000,
        });
        assert!(!clock.speed_up());
        assert!(!clock.slow_down());
        assert_eq!(clock.value_us(), 7_000);
    }

    proptest! {
        #[test]
        fn prop_value_stays_in_bounds(steps in proptest::collection::vec(any::<bool>(), 0..200)) {
            let clock = TickController::default();
            let (lower, upper) = clock.bounds_us();
            for faster in steps {
                if faster {
                    clock.speed_up();
                } else {
                    clock.slow_down();
                }
                prop_assert!(clock.value_us() >= lower && clock.value_us() <= upper);
            }
        }
    }
}
