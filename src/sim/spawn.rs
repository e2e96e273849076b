//! Entity placement
//!
//! Placement is a bounded-retry heuristic: each item gets a fixed number of
//! uniformly random candidate positions and takes the first one that clears
//! every obstacle. When the attempts run out the item is omitted (fresh
//! spawns) or left where it was (coin relocation). It never loops past the
//! bound, so dense layouts may end up with fewer items than requested.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::rect::{Rect, max_origin};
use super::state::{Coin, Enemy, GameEvent, GameState, PowerUp};
use crate::consts::*;

/// Uniform top-left corner for a square of `size` fully on screen
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, size: i32) -> IVec2 {
    let max = max_origin(size);
    IVec2::new(rng.random_range(0..=max.x), rng.random_range(0..=max.y))
}

/// Try up to `attempts` random positions for one square of `size`,
/// returning the first whose rect misses every obstacle
pub fn place_one<R: Rng + ?Sized>(
    rng: &mut R,
    size: i32,
    attempts: u32,
    obstacles: &[Rect],
) -> Option<IVec2> {
    (0..attempts)
        .map(|_| random_position(rng, size))
        .find(|&pos| !Rect::square(pos, size).intersects_any(obstacles))
}

/// Place up to `count` squares that overlap neither the obstacles nor each
/// other. Items whose attempts run out are skipped.
pub fn place_non_overlapping<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    size: i32,
    attempts: u32,
    obstacles: &[Rect],
) -> Vec<IVec2> {
    let mut blocked = obstacles.to_vec();
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(pos) = place_one(rng, size, attempts, &blocked) {
            blocked.push(Rect::square(pos, size));
            placed.push(pos);
        }
    }
    placed
}

/// Replace the coin set with a fresh non-overlapping layout
pub fn spawn_coins(state: &mut GameState) {
    let positions = place_non_overlapping(&mut state.rng, COIN_COUNT, COIN_SIZE, SPAWN_ATTEMPTS, &[]);
    if positions.len() < COIN_COUNT {
        log::debug!("Placed {} of {} coins", positions.len(), COIN_COUNT);
    }
    state.coins = positions.into_iter().map(Coin::new).collect();
}

/// Move a collected coin somewhere clear of the other coins and the power-up.
/// Returns false when no spot was found and the coin stayed put.
pub fn relocate_coin(state: &mut GameState, index: usize) -> bool {
    let obstacles = state.coin_obstacles(index);
    match place_one(&mut state.rng, COIN_SIZE, RELOCATE_ATTEMPTS, &obstacles) {
        Some(pos) => {
            state.coins[index].pos = pos;
            true
        }
        None => {
            log::debug!("Coin {} left in place after {} attempts", index, RELOCATE_ATTEMPTS);
            false
        }
    }
}

/// Random per-axis enemy speed: magnitude in the enemy speed range, random sign
fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let magnitude = rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
    let sign = if rng.random_bool(0.5) { 1 } else { -1 };
    (magnitude * sign) as f32
}

/// Add one enemy anywhere on screen. Enemies ignore overlap with everything.
pub fn spawn_enemy(state: &mut GameState) {
    let pos = random_position(&mut state.rng, ENEMY_SIZE);
    let vel = Vec2::new(random_speed(&mut state.rng), random_speed(&mut state.rng));
    state.enemies.push(Enemy::new(pos, vel));
}

/// Try to place a power-up clear of every coin and enemy. On failure the
/// slot is left empty for this cycle.
pub fn spawn_powerup(state: &mut GameState) -> bool {
    let obstacles: Vec<Rect> = state
        .coins
        .iter()
        .map(Coin::rect)
        .chain(state.enemies.iter().map(Enemy::rect))
        .collect();

    state.powerup = place_one(&mut state.rng, POWERUP_SIZE, SPAWN_ATTEMPTS, &obstacles).map(PowerUp::new);
    match state.powerup {
        Some(p) => {
            log::debug!("Power-up spawned at {:?}", p.pos);
            state.emit(GameEvent::PowerUpSpawned);
            true
        }
        None => {
            log::debug!("No room for a power-up this cycle");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn full_screen() -> Rect {
        Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_place_one_exhausted_returns_none() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(place_one(&mut rng, COIN_SIZE, SPAWN_ATTEMPTS, &[full_screen()]), None);
    }

    #[test]
    fn test_place_non_overlapping_omits_when_blocked() {
        let mut rng = Pcg32::seed_from_u64(3);
        let placed = place_non_overlapping(&mut rng, 4, COIN_SIZE, SPAWN_ATTEMPTS, &[full_screen()]);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_spawn_coins_count_and_spacing() {
        let mut state = GameState::new(11, 0);
        spawn_coins(&mut state);
        assert_eq!(state.coins.len(), COIN_COUNT);
        for (i, a) in state.coins.iter().enumerate() {
            assert!(a.rect().is_on_screen());
            for b in &state.coins[i + 1..] {
                assert!(!a.rect().intersects(&b.rect()));
            }
        }
    }

    #[test]
    fn test_relocate_coin_avoids_others_and_powerup() {
        let mut state = GameState::new(5, 0);
        spawn_coins(&mut state);
        state.powerup = Some(PowerUp::new(IVec2::new(400, 300)));
        for _ in 0..50 {
            assert!(relocate_coin(&mut state, 0));
            let moved = state.coins[0].rect();
            assert!(!moved.intersects_any(&state.coin_obstacles(0)));
        }
    }

    #[test]
    fn test_relocate_coin_left_in_place_when_no_room() {
        // Tile the field with coins so every candidate spot is taken
        let mut blocked = GameState::new(5, 0);
        blocked.coins = vec![Coin::new(IVec2::new(10, 10))];
        for x in (0..SCREEN_WIDTH).step_by(COIN_SIZE as usize) {
            for y in (0..SCREEN_HEIGHT).step_by(COIN_SIZE as usize) {
                blocked.coins.push(Coin::new(IVec2::new(x, y)));
            }
        }
        assert!(!relocate_coin(&mut blocked, 0));
        assert_eq!(blocked.coins[0].pos, IVec2::new(10, 10));
    }

    #[test]
    fn test_spawn_enemy_speed_range() {
        let mut state = GameState::new(9, 0);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for enemy in &state.enemies {
            assert!(enemy.rect().is_on_screen());
            for v in [enemy.vel.x, enemy.vel.y] {
                assert_eq!(v.fract(), 0.0);
                assert!((2.0..=5.0).contains(&v.abs()), "speed {v}");
            }
        }
        assert!(state.enemies.iter().any(|e| e.vel.x < 0.0));
        assert!(state.enemies.iter().any(|e| e.vel.x > 0.0));
    }

    #[test]
    fn test_spawn_powerup_avoids_coins_and_enemies() {
        let mut state = GameState::new(21, 0);
        spawn_coins(&mut state);
        spawn_enemy(&mut state);
        spawn_enemy(&mut state);
        assert!(spawn_powerup(&mut state));
        let p = state.powerup.expect("power-up placed").rect();
        assert!(!p.intersects_any(&state.coins.iter().map(Coin::rect).collect::<Vec<_>>()));
        assert!(!p.intersects_any(&state.enemies.iter().map(Enemy::rect).collect::<Vec<_>>()));
        assert_eq!(state.drain_events(), vec![GameEvent::PowerUpSpawned]);
    }

    #[test]
    fn test_spawn_powerup_empty_when_no_room() {
        let mut state = GameState::new(21, 0);
        state.powerup = Some(PowerUp::new(IVec2::ZERO));
        for x in (0..SCREEN_WIDTH).step_by(ENEMY_SIZE as usize) {
            for y in (0..SCREEN_HEIGHT).step_by(ENEMY_SIZE as usize) {
                state.enemies.push(Enemy::new(IVec2::new(x, y), Vec2::ZERO));
            }
        }
        assert!(!spawn_powerup(&mut state));
        assert!(state.powerup.is_none());
        assert!(state.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn placements_stay_on_screen_and_apart(seed in any::<u64>(), count in 1usize..12, size in 5i32..60) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let placed = place_non_overlapping(&mut rng, count, size, SPAWN_ATTEMPTS, &[]);
            prop_assert!(placed.len() <= count);
            for (i, a) in placed.iter().enumerate() {
                let ra = Rect::square(*a, size);
                prop_assert!(ra.is_on_screen());
                for b in &placed[i + 1..] {
                    prop_assert!(!ra.intersects(&Rect::square(*b, size)));
                }
            }
        }
    }
}
