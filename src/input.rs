//! Input dispatch
//!
//! Reads one key at a time from a blocking `KeySource` and applies it to the
//! world or the tick controller. This runs on the main thread and is the only
//! place the game blocks.

use std::sync::Arc;
use std::time::Instant;

use crate::clock::TickController;
use crate::error::Result;
use crate::scheduler::QuitSignal;
use crate::settings::KeySettings;
use crate::sim::{Side, World};

pub use crate::settings::Action;

/// A discrete key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C, or the source has no more keys; always quits
    Interrupt,
}

/// Blocking source of key events, delivered in FIFO order
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

pub struct InputDispatcher {
    keys: KeySettings,
    world: Arc<World>,
    clock: Arc<TickController>,
    quit: QuitSignal,
}

impl InputDispatcher {
    pub fn new(
        keys: KeySettings,
        world: Arc<World>,
        clock: Arc<TickController>,
        quit: QuitSignal,
    ) -> Self {
        Self {
            keys,
            world,
            clock,
            quit,
        }
    }

    /// Map a key to its action. Interrupts always quit.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        match key {
            Key::Char(c) => self.keys.action_for(c),
            Key::Interrupt => Some(Action::Quit),
        }
    }

    /// Apply one action. Returns false if it was rejected by a bound.
    pub fn apply(&self, action: Action, now: Instant) -> bool {
        match action {
            Action::LeftUp => self.world.move_paddle(Side::Left, -1, now),
            Action::LeftDown => self.world.move_paddle(Side::Left, 1, now),
            Action::RightUp => self.world.move_paddle(Side::Right, -1, now),
            Action::RightDown => self.world.move_paddle(Side::Right, 1, now),
            Action::SpeedUp => self.clock.speed_up(),
            Action::SpeedDown => self.clock.slow_down(),
            Action::Quit => {
                self.quit.trigger();
                true
            }
        }
    }

    /// Read and apply keys until quit.
    ///
    /// Also returns once another task raises the quit signal, after the next key.
    pub fn run(&self, source: &mut impl KeySource) -> Result<()> {
        while !self.quit.is_set() {
            let key = match source.next_key() {
                Ok(key) => key,
                Err(err) => {
                    self.quit.trigger();
                    return Err(err);
                }
            };
            let Some(action) = self.action_for(key) else {
                log::trace!("Ignoring unbound key {:?}", key);
                continue;
            };
            if action == Action::Quit {
                log::info!("Quit requested");
                self.apply(action, Instant::now());
                return Ok(());
            }
            if !self.apply(action, Instant::now()) {
                log::trace!("Rejected {:?}", action);
            }
        }
        Ok(())
    }
}
