//! Game settings and preferences
//!
//! Stored as JSON next to the game. Missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::TICK_RATE;
use crate::error::GameResult;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Plain-text high score file
    pub high_score_path: PathBuf,
    /// Log file (the terminal is busy drawing the game)
    pub log_path: PathBuf,
    /// Play the pickup sound
    pub sound: bool,
    /// Fixed run seed; random when unset
    pub seed: Option<u64>,
    /// Ticks per second for the frame loop. Only sets the pace: game timing
    /// such as invincibility is counted in ticks, so it speeds up or slows
    /// down with everything else.
    pub tick_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("highscore.txt"),
            log_path: PathBuf::from("coin_dash.log"),
            sound: true,
            seed: None,
            tick_rate: TICK_RATE,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "coin_dash.json";
    /// Environment variable overriding the settings file location
    pub const PATH_ENV: &'static str = "COIN_DASH_SETTINGS";

    /// Where settings are read from
    pub fn default_path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME))
    }

    /// Parse settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> GameResult<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        if self.tick_rate == 0 {
            log::warn!("tick_rate must be positive, using {}", TICK_RATE);
            self.tick_rate = TICK_RATE;
        }
        self
    }
}
