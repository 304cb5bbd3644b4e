//! Loop scheduler
//!
//! The update and render actions each run on their own thread: act, sleep for
//! the current tick delay, repeat until quit. The two cadences are not
//! synchronised with each other, so a frame may show a ball one tick behind
//! the physics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand_pcg::Pcg32;

use crate::clock::TickController;
use crate::error::{PongError, Result};
use crate::renderer::{Display, draw_frame};
use crate::sim::{GameEvent, World};

/// Process-wide cancellation flag, handed to every task at construction
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// An action the scheduler repeats once per tick delay
pub trait RepeatingTask: Send + 'static {
    /// Thread name for this task
    fn name(&self) -> &'static str;
    fn run_once(&mut self) -> Result<()>;
}

/// Advances the simulation one tick per iteration
pub struct UpdateTask {
    world: Arc<World>,
    rng: Pcg32,
}

impl UpdateTask {
    pub fn new(world: Arc<World>, rng: Pcg32) -> Self {
        Self { world, rng }
    }
}

impl RepeatingTask for UpdateTask {
    fn name(&self) -> &'static str {
        "pong-update"
    }

    fn run_once(&mut self) -> Result<()> {
        for event in self.world.update(Instant::now(), &mut self.rng) {
            match event {
                GameEvent::Point(side) => {
                    let court = self.world.court();
                    log::info!(
                        "Point to {:?} ({} - {})",
                        side,
                        court.left_score,
                        court.right_score
                    );
                }
                GameEvent::PaddleHit(side) => log::debug!("Paddle hit: {:?}", side),
                GameEvent::WallBounce => log::trace!("Wall bounce"),
            }
        }
        Ok(())
    }
}

/// Draws one frame per iteration
pub struct RenderTask<D> {
    world: Arc<World>,
    display: D,
}

impl<D: Display + Send + 'static> RenderTask<D> {
    pub fn new(world: Arc<World>, display: D) -> Self {
        Self { world, display }
    }
}

impl<D: Display + Send + 'static> RepeatingTask for RenderTask<D> {
    fn name(&self) -> &'static str {
        "pong-render"
    }

    fn run_once(&mut self) -> Result<()> {
        let snapshot = self.world.snapshot();
        draw_frame(&mut self.display, &snapshot)?;
        Ok(())
    }
}

/// Run `task` until quit, sleeping for the controller's delay between runs.
///
/// A failing task logs, raises quit for everyone, and stops.
pub fn run_loop(task: &mut impl RepeatingTask, clock: &TickController, quit: &QuitSignal) {
    while !quit.is_set() {
        if let Err(err) = task.run_once() {
            log::error!("{} failed: {}", task.name(), err);
            quit.trigger();
            break;
        }
        thread::sleep(clock.delay());
    }
    log::debug!("{} stopped", task.name());
}

/// Owns the running task threads
pub struct Scheduler {
    clock: Arc<TickController>,
    quit: QuitSignal,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl Scheduler {
    pub fn new(clock: Arc<TickController>, quit: QuitSignal) -> Self {
        Self {
            clock,
            quit,
            handles: Vec::new(),
        }
    }

    /// Start `task` on its own named thread
    pub fn spawn(&mut self, mut task: impl RepeatingTask) -> Result<()> {
        let name = task.name();
        let clock = Arc::clone(&self.clock);
        let quit = self.quit.clone();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run_loop(&mut task, &clock, &quit))
            .map_err(|source| {
                // Tasks already running must not outlive a failed start
                self.quit.trigger();
                PongError::SpawnTask { name, source }
            })?;
        log::debug!("Started {}", name);
        self.handles.push((name, handle));
        Ok(())
    }

    /// Raise quit and wait for every task. Returns how many tasks panicked.
    pub fn shutdown(mut self) -> usize {
        self.quit.trigger();
        self.join_all()
    }

    fn join_all(&mut self) -> usize {
        let mut panicked = 0;
        for (name, handle) in self.handles.drain(..) {
            if handle.join().is_err() {
                log::error!("{} panicked", name);
                panicked += 1;
            }
        }
        panicked
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.quit.trigger();
            self.join_all();
        }
    }
}
