//! Platform layer
//!
//! Handles the terminal side of input: reading key events and turning them
//! into per-tick commands and held-key snapshots.

pub mod input;

pub use input::{InputSource, KeyTracker, TerminalInput};
