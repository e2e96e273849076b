//! Enemy motion and boundary bounce, plus held-key player movement

use glam::{IVec2, Vec2};

use super::rect::Rect;
use super::state::{Enemy, Player};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Integer displacement for one tick: velocity truncated toward zero.
/// Out-of-range speeds saturate to `i32::MIN`/`i32::MAX`.
#[inline]
pub fn step_of(vel: Vec2) -> IVec2 {
    IVec2::new(vel.x as i32, vel.y as i32)
}

/// Flip velocity components whose axis has left the screen.
///
/// Only velocity is corrected; the rect may sit outside the screen for a
/// tick and comes back on the next one.
pub fn bounce_off_bounds(rect: &Rect, vel: Vec2) -> Vec2 {
    let mut vel = vel;
    if rect.left() < 0 || rect.right() > SCREEN_WIDTH {
        vel.x = -vel.x;
    }
    if rect.top() < 0 || rect.bottom() > SCREEN_HEIGHT {
        vel.y = -vel.y;
    }
    vel
}

impl Enemy {
    /// Advance one tick and reflect off the screen edges. Speed is uncapped,
    /// so the step saturates at the `i32` range instead of overflowing.
    pub fn advance(&mut self) {
        self.pos = self.pos.saturating_add(step_of(self.vel));
        self.vel = bounce_off_bounds(&self.rect(), self.vel);
    }
}

/// Move every enemy one tick
pub fn advance_enemies(enemies: &mut [Enemy]) {
    for enemy in enemies {
        enemy.advance();
    }
}

/// Scale every enemy's velocity on both axes. Never capped.
pub fn speed_up_enemies(enemies: &mut [Enemy], factor: f32) {
    for enemy in enemies {
        enemy.vel *= factor;
    }
}

/// Direction from held movement keys; opposite keys cancel
pub fn held_direction(up: bool, down: bool, left: bool, right: bool) -> IVec2 {
    IVec2::new(right as i32 - left as i32, down as i32 - up as i32)
}

/// Apply held movement to the player (diagonals are not normalized)
pub fn move_player(player: &mut Player, dir: IVec2) {
    if dir != IVec2::ZERO {
        player.step(dir);
    }
}
