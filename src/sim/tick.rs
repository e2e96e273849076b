//! Fixed timestep simulation tick
//!
//! Core game loop step: dispatches on the current phase, applies commands,
//! and while playing runs movement, enemy motion and collision resolution.

use super::motion::{advance_enemies, held_direction, move_player};
use super::progression::{check_enemy_collision, collect_coins, collect_powerup, expire_invincibility};
use super::spawn::{spawn_coins, spawn_enemy, spawn_powerup};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete commands, already mapped from whatever input device is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Quit,
    Pause,
    Resume,
    Restart,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands pressed this tick, in arrival order
    pub commands: Vec<Command>,
    /// Movement keys held this tick
    pub held: HeldKeys,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }
}

/// Whether the loop should keep running after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Phase transition graph. `None` means the command does nothing here.
/// Quit is handled outside the graph since it ends the process.
pub fn next_phase(phase: GamePhase, command: Command) -> Option<GamePhase> {
    use Command::*;
    use GamePhase::*;

    match (phase, command) {
        (Menu, Start) => Some(Playing),
        (Playing, Pause) => Some(Paused),
        (Paused, Resume) => Some(Playing),
        (GameOver, Restart) => Some(Menu),
        _ => None,
    }
}

/// Apply one command, running the side effects of the transition it causes
pub fn apply_command(state: &mut GameState, command: Command) -> Flow {
    if command == Command::Quit {
        log::info!("Quit requested in {:?}", state.phase);
        return Flow::Quit;
    }

    let Some(next) = next_phase(state.phase, command) else {
        log::trace!("Ignoring {:?} in {:?}", command, state.phase);
        return Flow::Continue;
    };

    if state.phase == GamePhase::Menu && next == GamePhase::Playing {
        start_session(state);
    }
    log::debug!("Phase {:?} -> {:?}", state.phase, next);
    state.phase = next;
    Flow::Continue
}

/// Fresh session: reset, five coins, one enemy, maybe a power-up
pub fn start_session(state: &mut GameState) {
    state.reset_session();
    spawn_coins(state);
    spawn_enemy(state);
    spawn_powerup(state);
    log::info!(
        "Session started: {} coins, {} enemies, power-up: {}",
        state.coins.len(),
        state.enemies.len(),
        state.powerup.is_some()
    );
    state.emit(GameEvent::SessionStarted);
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Flow {
    state.time_ticks += 1;

    // One handler per tick: the phase we entered the tick in owns it.
    // After the first transition the rest of the commands are stale.
    let phase = state.phase;
    for &command in &input.commands {
        if command == Command::Quit {
            return apply_command(state, command);
        }
        if state.phase == phase {
            apply_command(state, command);
        }
    }

    if phase == GamePhase::Playing && state.phase == GamePhase::Playing {
        play_step(state, input);
    }

    Flow::Continue
}

/// The playing handler's simulation work, in fixed order
fn play_step(state: &mut GameState, input: &TickInput) {
    let held = input.held;
    move_player(
        &mut state.player,
        held_direction(held.up, held.down, held.left, held.right),
    );

    expire_invincibility(state);
    advance_enemies(&mut state.enemies);
    collect_coins(state);
    collect_powerup(state);
    check_enemy_collision(state);
}
