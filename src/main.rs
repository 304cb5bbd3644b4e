//! Console Pong entry point
//!
//! Sets up logging and the terminal, starts the update and render loops, and
//! reads keys on the main thread until quit.

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use console_pong::error::Result;
use console_pong::input::InputDispatcher;
use console_pong::platform::{TerminalGuard, TerminalKeys, viewport_size};
use console_pong::renderer::TerminalDisplay;
use console_pong::scheduler::{QuitSignal, RenderTask, Scheduler, UpdateTask};
use console_pong::settings::SETTINGS_ENV_VAR;
use console_pong::sim::World;
use console_pong::{Settings, TickController};

fn main() -> ExitCode {
    let settings_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::var_os(SETTINGS_ENV_VAR).map(PathBuf::from));

    let settings = match Settings::load(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("console-pong: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&settings) {
        eprintln!("console-pong: cannot open log file: {}", err);
        return ExitCode::FAILURE;
    }

    // The terminal is restored before the error is printed
    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("console-pong: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &Settings) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(settings: &Settings) -> Result<()> {
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Console Pong starting (seed {})", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let _terminal = TerminalGuard::enter()?;
    let (rows, cols) = viewport_size()?;
    let world = Arc::new(World::new(
        i32::from(rows),
        i32::from(cols),
        Instant::now(),
        &mut rng,
    )?);
    log::info!("Court is {} rows by {} columns", rows, cols);

    let clock = Arc::new(TickController::new(&settings.refresh_rate));
    let quit = QuitSignal::new();

    let mut scheduler = Scheduler::new(Arc::clone(&clock), quit.clone());
    scheduler.spawn(UpdateTask::new(Arc::clone(&world), rng))?;
    scheduler.spawn(RenderTask::new(
        Arc::clone(&world),
        TerminalDisplay::new(io::stdout(), rows, cols),
    ))?;

    let input = InputDispatcher::new(settings.keys.clone(), Arc::clone(&world), clock, quit);
    let result = input.run(&mut TerminalKeys);

    let panicked = scheduler.shutdown();
    if panicked > 0 {
        log::warn!("{} task(s) panicked", panicked);
    }

    let court = world.court();
    log::info!("Final score {} - {}", court.left_score, court.right_score);
    result
}
