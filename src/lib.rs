//! Coin Dash - a single-screen dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, progression, game phases)
//! - `renderer`: Frame building and terminal presentation
//! - `platform`: Terminal input sampling
//! - `highscores`: Best score persistence
//! - `settings`: Game settings file
//! - `audio`: Optional pickup sound

pub mod app;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use highscores::HighScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Simulation ticks per game second. All game timing is in ticks; the
    /// configured loop rate only changes how fast ticks pass on the wall clock.
    pub const TICK_RATE: u32 = 60;

    /// Player square
    pub const PLAYER_SIZE: i32 = 20;
    /// Pixels moved per tick on each held axis
    pub const PLAYER_SPEED: i32 = 5;

    /// Coins on screen for the whole session
    pub const COIN_COUNT: usize = 5;
    pub const COIN_SIZE: i32 = 20;

    pub const ENEMY_SIZE: i32 = 40;
    /// Per-axis enemy speed range (inclusive, pixels per tick)
    pub const ENEMY_MIN_SPEED: i32 = 2;
    pub const ENEMY_MAX_SPEED: i32 = 5;
    /// Enemies stop being added past this count; speed scales instead
    pub const MAX_ENEMIES: usize = 5;
    /// Velocity multiplier applied per level once the enemy cap is reached
    pub const ENEMY_SPEEDUP: f32 = 1.1;

    pub const POWERUP_SIZE: i32 = 30;
    /// Chance of a new power-up on level up (only when none is active)
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.15;
    /// Invincibility granted by a power-up, in game seconds
    pub const INVINCIBILITY_SECS: u64 = 5;
    /// The same duration in ticks; 5 wall-clock seconds only at the default loop rate
    pub const INVINCIBILITY_TICKS: u64 = INVINCIBILITY_SECS * TICK_RATE as u64;

    /// Coins needed to advance one level
    pub const COINS_PER_LEVEL: u32 = 10;

    /// Placement attempts for fresh coins and power-ups
    pub const SPAWN_ATTEMPTS: u32 = 100;
    /// Placement attempts when moving a collected coin
    pub const RELOCATE_ATTEMPTS: u32 = 50;
}

/// An RGB color. Purely visual; nothing in the simulation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Game palette
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(220, 220, 220);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
}
