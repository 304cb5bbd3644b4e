//! Error type shared by startup, the loops and the terminal collaborators

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PongError {
    #[error("court of {width}x{length} is too small (need at least {min_width}x{min_length})")]
    CourtTooSmall {
        width: i32,
        length: i32,
        min_width: i32,
        min_length: i32,
    },
    #[error("cannot start {name} task: {source}")]
    SpawnTask {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to read settings from {path}: {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings: {0}")]
    ParseSettings(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T, E = PongError> = std::result::Result<T, E>;
