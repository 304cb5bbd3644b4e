//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file; every field falls back
//! to the classic defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PongError, Result};

/// Environment variable consulted when no settings path is given
pub const SETTINGS_ENV_VAR: &str = "CONSOLE_PONG_SETTINGS";

/// Logical actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    SpeedUp,
    SpeedDown,
    Quit,
}

/// Key bindings, matched by configured character rather than fixed enumerants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub left_up: char,
    pub left_down: char,
    pub right_up: char,
    pub right_down: char,
    pub speed_up: char,
    pub speed_down: char,
    pub quit: char,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            left_up: 'a',
            left_down: 'z',
            right_up: 'k',
            right_down: 'm',
            speed_up: 't',
            speed_down: 'r',
            quit: 'q',
        }
    }
}

impl KeySettings {
    /// Bindings in lookup order; the first match wins
    fn bindings(&self) -> [(char, Action); 7] {
        [
            (self.left_up, Action::LeftUp),
            (self.left_down, Action::LeftDown),
            (self.right_up, Action::RightUp),
            (self.right_down, Action::RightDown),
            (self.speed_up, Action::SpeedUp),
            (self.speed_down, Action::SpeedDown),
            (self.quit, Action::Quit),
        ]
    }

    /// Map a pressed key to its action, if it is bound
    pub fn action_for(&self, key: char) -> Option<Action> {
        self.bindings()
            .into_iter()
            .find(|(code, _)| *code == key)
            .map(|(_, action)| action)
    }

    fn validate(&self) -> Result<()> {
        let bindings = self.bindings();
        for (i, (code, action)) in bindings.iter().enumerate() {
            if let Some((_, other)) = bindings[i + 1..].iter().find(|(c, _)| c == code) {
                return Err(PongError::InvalidSettings(format!(
                    "key '{}' is bound to both {:?} and {:?}",
                    code, action, other
                )));
            }
        }
        Ok(())
    }
}

/// Refresh-rate bounds, in microseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshRateSettings {
    pub upper_bound_us: u64,
    pub lower_bound_us: u64,
    pub value_us: u64,
    pub delta_us: u64,
}

impl Default for RefreshRateSettings {
    fn default() -> Self {
        Self {
            upper_bound_us: REFRESH_UPPER_BOUND_US,
            lower_bound_us: REFRESH_LOWER_BOUND_US,
            value_us: REFRESH_DEFAULT_US,
            delta_us: REFRESH_DELTA_US,
        }
    }
}

impl RefreshRateSettings {
    fn validate(&self) -> Result<()> {
        if self.delta_us == 0 {
            return Err(PongError::InvalidSettings(
                "refresh_rate.delta_us must be positive".to_string(),
            ));
        }
        if self.lower_bound_us == 0 {
            return Err(PongError::InvalidSettings(
                "refresh_rate.lower_bound_us must be positive".to_string(),
            ));
        }
        if !(self.lower_bound_us..=self.upper_bound_us).contains(&self.value_us) {
            return Err(PongError::InvalidSettings(format!(
                "refresh_rate.value_us {} is outside [{}, {}]",
                self.value_us, self.lower_bound_us, self.upper_bound_us
            )));
        }
        Ok(())
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeySettings,
    pub refresh_rate: RefreshRateSettings,
    /// Fixed RNG seed for reproducible serves (random when absent)
    pub seed: Option<u64>,
    /// Write log output here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path).map_err(|source| PongError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.keys.validate()?;
        self.refresh_rate.validate()
    }
}
