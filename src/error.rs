//! Error types for the parts of the game that touch the outside world.
//!
//! The simulation itself is total and never fails.

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
