//! Collisions between the player and everything else, and what they lead to:
//! scoring, level progression, invincibility and game over.

use rand::Rng;

use super::motion::speed_up_enemies;
use super::spawn::{relocate_coin, spawn_enemy, spawn_powerup};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Clear invincibility once its expiry tick has been reached
pub fn expire_invincibility(state: &mut GameState) {
    let now = state.time_ticks;
    if state.invincible_until.is_some_and(|until| now >= until) {
        state.invincible_until = None;
        log::debug!("Invincibility expired at tick {}", state.time_ticks);
        state.emit(GameEvent::InvincibilityExpired);
    }
}

/// Pick up every coin the player overlaps. Each pickup scores one point,
/// moves the coin, and may trigger a level up.
pub fn collect_coins(state: &mut GameState) {
    let player = state.player.rect();
    for index in 0..state.coins.len() {
        if !state.coins[index].rect().intersects(&player) {
            continue;
        }

        state.score += 1;
        state.coins_collected_this_level += 1;
        state.emit(GameEvent::CoinCollected { score: state.score });
        relocate_coin(state, index);

        if state.coins_collected_this_level >= COINS_PER_LEVEL {
            level_up(state);
        }
    }
}

/// Advance one level: more enemies up to the cap, faster enemies after it,
/// and a chance at a new power-up.
pub fn level_up(state: &mut GameState) {
    state.level += 1;
    state.coins_collected_this_level = 0;

    if state.level as usize <= MAX_ENEMIES {
        spawn_enemy(state);
    } else {
        speed_up_enemies(&mut state.enemies, ENEMY_SPEEDUP);
    }

    log::info!("Level {} ({} enemies)", state.level, state.enemies.len());
    state.emit(GameEvent::LevelUp {
        level: state.level,
        enemies: state.enemies.len(),
    });

    if state.powerup.is_none() && state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        spawn_powerup(state);
    }
}

/// Grab the power-up if the player touches it
pub fn collect_powerup(state: &mut GameState) {
    let Some(powerup) = state.powerup else { return };
    if !powerup.rect().intersects(&state.player.rect()) {
        return;
    }

    let expires_at = state.time_ticks + INVINCIBILITY_TICKS;
    state.invincible_until = Some(expires_at);
    state.powerup = None;
    log::info!("Invincible until tick {}", expires_at);
    state.emit(GameEvent::PowerUpCollected { expires_at });
}

/// End the session on the first enemy the player overlaps, unless invincible.
/// Returns true when the game ended.
pub fn check_enemy_collision(state: &mut GameState) -> bool {
    if state.is_invincible() {
        return false;
    }

    let player = state.player.rect();
    if !state.enemies.iter().any(|e| e.rect().intersects(&player)) {
        return false;
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        log::info!("New high score: {}", state.score);
        state.emit(GameEvent::NewHighScore(state.score));
    }
    state.phase = GamePhase::GameOver;
    log::info!("Game over at level {} with score {}", state.level, state.score);
    state.emit(GameEvent::GameOver { score: state.score });
    true
}
