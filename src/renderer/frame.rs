//! Draw lists built from game state
//!
//! The presentation side only ever sees a `Frame`: coloured rectangles and
//! text items in playfield pixels. Nothing flows back into the simulation.

use glam::IVec2;

use crate::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::palette;
use crate::sim::{GamePhase, GameState, Rect};

/// Where a text item's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// Heading or regular text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRect {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawText {
    pub text: String,
    pub pos: IVec2,
    pub anchor: Anchor,
    pub size: TextSize,
    pub color: Color,
}

/// Everything to draw for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub background: Color,
    pub rects: Vec<DrawRect>,
    pub texts: Vec<DrawText>,
}

impl Frame {
    fn new(background: Color) -> Self {
        Self {
            background,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        self.rects.push(DrawRect { rect, color });
    }

    fn text_at(&mut self, text: impl Into<String>, pos: IVec2, color: Color) {
        self.texts.push(DrawText {
            text: text.into(),
            pos,
            anchor: Anchor::TopLeft,
            size: TextSize::Normal,
            color,
        });
    }

    fn centered(&mut self, text: impl Into<String>, y: i32, size: TextSize, color: Color) {
        self.texts.push(DrawText {
            text: text.into(),
            pos: IVec2::new(SCREEN_WIDTH / 2, y),
            anchor: Anchor::Center,
            size,
            color,
        });
    }

    /// All text in draw order, for tests and logging
    pub fn text_lines(&self) -> Vec<&str> {
        self.texts.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Build the draw list for the current phase
pub fn build_frame(state: &GameState) -> Frame {
    let mid = SCREEN_HEIGHT / 2;
    match state.phase {
        GamePhase::Menu => {
            let mut frame = Frame::new(palette::LIGHT_GRAY);
            frame.centered("COIN DASH", mid - 50, TextSize::Big, palette::BLUE);
            frame.centered(
                "Press SPACE to START or Q to QUIT",
                mid + 30,
                TextSize::Normal,
                palette::BLACK,
            );
            if state.high_score > 0 {
                frame.centered(
                    format!("Best Score: {}", state.high_score),
                    mid + 80,
                    TextSize::Normal,
                    palette::BLACK,
                );
            }
            frame
        }
        GamePhase::Playing => playfield(state),
        GamePhase::Paused => {
            let mut frame = Frame::new(palette::GRAY);
            frame.centered("PAUSED", mid - 50, TextSize::Big, palette::YELLOW);
            frame.centered(
                "Press P to RESUME or Q to QUIT",
                mid + 30,
                TextSize::Normal,
                palette::BLACK,
            );
            frame
        }
        GamePhase::GameOver => {
            let mut frame = Frame::new(palette::LIGHT_GRAY);
            frame.centered("GAME OVER", mid - 100, TextSize::Big, palette::RED);
            frame.centered(
                format!("Your Score: {}", state.score),
                mid,
                TextSize::Normal,
                palette::BLACK,
            );
            frame.centered(
                "Press R to RESTART or Q to QUIT",
                mid + 50,
                TextSize::Normal,
                palette::BLACK,
            );
            frame
        }
    }
}

fn playfield(state: &GameState) -> Frame {
    let mut frame = Frame::new(palette::WHITE);

    for coin in &state.coins {
        frame.rect(coin.rect(), coin.color);
    }
    for enemy in &state.enemies {
        frame.rect(enemy.rect(), enemy.color);
    }
    if let Some(powerup) = &state.powerup {
        frame.rect(powerup.rect(), powerup.color);
    }
    let player_color = if state.is_invincible() {
        palette::YELLOW
    } else {
        palette::RED
    };
    frame.rect(state.player.rect(), player_color);

    // HUD
    frame.text_at(format!("Score: {}", state.score), IVec2::new(10, 10), palette::BLACK);
    frame.text_at(
        format!("High Score: {}", state.high_score),
        IVec2::new(10, 50),
        palette::BLACK,
    );
    frame.text_at(format!("Level: {}", state.level), IVec2::new(10, 90), palette::BLACK);
    if let Some(secs) = state.invincible_secs_remaining() {
        frame.text_at(
            format!("Invincible: {}s", secs),
            IVec2::new(SCREEN_WIDTH - 200, 10),
            palette::BLACK,
        );
    }

    frame
}
