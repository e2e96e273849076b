//! Best score persistence
//!
//! A single decimal integer in a plain-text file. A missing or unreadable
//! file means no prior high score.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-backed high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score, if there is a valid one
    pub fn read(&self) -> Option<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", self.path.display(), e);
                return None;
            }
        };

        match text.trim().parse() {
            Ok(score) => Some(score),
            Err(_) => {
                log::warn!("Ignoring corrupt high score file {}", self.path.display());
                None
            }
        }
    }

    /// Load the high score, defaulting to zero
    pub fn load(&self) -> u64 {
        let score = self.read().unwrap_or(0);
        log::info!("Loaded high score {}", score);
        score
    }

    /// Overwrite the stored score
    pub fn save(&self, score: u64) -> io::Result<()> {
        fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}
