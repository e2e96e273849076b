//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (entity vectors are never reordered)
//! - No rendering, file or platform dependencies; side effects leave as `GameEvent`s

pub mod motion;
pub mod progression;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{Coin, Enemy, GameEvent, GamePhase, GameState, Player, PowerUp};
pub use tick::{Command, Flow, HeldKeys, TickInput, apply_command, next_phase, tick};
