//! Game state and core simulation types
//!
//! `GameState` is the single session/world object every subsystem mutates.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::{Rect, clamp_to_screen};
use crate::Color;
use crate::consts::*;
use crate::palette;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for Restart
    GameOver,
}

/// The player-controlled square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub pos: IVec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn_pos(),
        }
    }
}

impl Player {
    /// Screen center (top-left corner of the centered square)
    pub fn spawn_pos() -> IVec2 {
        IVec2::new(
            SCREEN_WIDTH / 2 - PLAYER_SIZE / 2,
            SCREEN_HEIGHT / 2 - PLAYER_SIZE / 2,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }

    /// Move by `dir` steps per axis, then keep the square on screen
    pub fn step(&mut self, dir: IVec2) {
        self.pos = clamp_to_screen(self.pos + dir * PLAYER_SPEED, PLAYER_SIZE);
    }
}

/// A collectible coin. Relocated on pickup, never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coin {
    pub pos: IVec2,
    pub color: Color,
}

impl Coin {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            color: palette::GREEN,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, COIN_SIZE)
    }
}

/// A roaming enemy square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub pos: IVec2,
    /// Pixels per tick. Integral until level scaling kicks in.
    pub vel: Vec2,
    pub color: Color,
}

impl Enemy {
    pub fn new(pos: IVec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            color: palette::BLACK,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, ENEMY_SIZE)
    }
}

/// The invincibility pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub pos: IVec2,
    pub color: Color,
}

impl PowerUp {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            color: palette::BLUE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, POWERUP_SIZE)
    }
}

/// Things that happened during a tick which the outside world may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh session began (Menu -> Playing)
    SessionStarted,
    /// A coin was picked up; carries the new score
    CoinCollected { score: u64 },
    /// Level advanced; carries the new level and resulting enemy count
    LevelUp { level: u32, enemies: usize },
    PowerUpSpawned,
    /// Invincibility granted until the given tick
    PowerUpCollected { expires_at: u64 },
    InvincibilityExpired,
    /// The best score was beaten and must be persisted
    NewHighScore(u64),
    /// Fatal enemy collision
    GameOver { score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Placement and enemy-velocity randomness
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter; advances in every phase
    pub time_ticks: u64,
    /// Score for the current session
    pub score: u64,
    /// Best score seen by this process (loaded from storage at startup)
    pub high_score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Coins picked up since the last level change
    pub coins_collected_this_level: u32,
    /// Tick at which invincibility ends; `None` when not invincible
    pub invincible_until: Option<u64>,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    /// At most one power-up exists at a time
    pub powerup: Option<PowerUp>,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the menu with the given seed
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            score: 0,
            high_score,
            level: 1,
            coins_collected_this_level: 0,
            invincible_until: None,
            player: Player::default(),
            coins: Vec::with_capacity(COIN_COUNT),
            enemies: Vec::with_capacity(MAX_ENEMIES),
            powerup: None,
            events: Vec::new(),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Whole seconds of invincibility left (truncated), if invincible
    pub fn invincible_secs_remaining(&self) -> Option<u64> {
        self.invincible_until
            .map(|until| until.saturating_sub(self.time_ticks) / TICK_RATE as u64)
    }

    /// Put the session back to its starting values. Entities other than the
    /// player are cleared; spawning is the caller's job.
    pub fn reset_session(&mut self) {
        self.player = Player::default();
        self.score = 0;
        self.level = 1;
        self.coins_collected_this_level = 0;
        self.invincible_until = None;
        self.coins.clear();
        self.enemies.clear();
        self.powerup = None;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Obstacles a relocated coin must avoid: every other coin and the power-up
    pub(crate) fn coin_obstacles(&self, skip: usize) -> Vec<Rect> {
        self.coins
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| c.rect())
            .chain(self.powerup.iter().map(PowerUp::rect))
            .collect()
    }
}
