//! Keyboard input from the terminal
//!
//! Input model: a thread blocks on crossterm events and forwards them over a
//! channel. Each tick the channel is drained without blocking. Presses turn
//! into commands immediately (mapped against the current phase) and refresh
//! a per-key "last seen" tick. A movement key counts as held while it was
//! seen within `HOLD_WINDOW` ticks, or until its release event on terminals
//! that report releases.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Command, GamePhase, HeldKeys, TickInput};

/// Ticks a key stays held after its last press/repeat event. Classic
/// terminals only send repeats (~30 Hz), so this must outlast the gap.
pub const HOLD_WINDOW: u64 = 8;

/// Map a key press to a command for the given phase
pub fn command_for(code: KeyCode, modifiers: KeyModifiers, phase: GamePhase) -> Option<Command> {
    match code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(c) => match (c.to_ascii_lowercase(), phase) {
            (' ', GamePhase::Menu) => Some(Command::Start),
            ('p', GamePhase::Playing) => Some(Command::Pause),
            ('p', GamePhase::Paused) => Some(Command::Resume),
            ('r', GamePhase::GameOver) => Some(Command::Restart),
            ('q', GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver) => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Movement direction a key stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

fn direction_of(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up => Some(Dir::Up),
        KeyCode::Down => Some(Dir::Down),
        KeyCode::Left => Some(Dir::Left),
        KeyCode::Right => Some(Dir::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Dir::Up),
            's' => Some(Dir::Down),
            'a' => Some(Dir::Left),
            'd' => Some(Dir::Right),
            _ => None,
        },
        _ => None,
    }
}

/// Turns raw key events into per-tick input
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Last tick each movement direction was pressed or repeated
    last_seen: HashMap<Dir, u64>,
    /// Commands waiting for the next tick
    pending: Vec<Command>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event observed during tick `now`
    pub fn key_event(&mut self, key: KeyEvent, now: u64, phase: GamePhase) {
        match key.kind {
            KeyEventKind::Press => {
                if let Some(dir) = direction_of(key.code) {
                    self.last_seen.insert(dir, now);
                }
                if let Some(command) = command_for(key.code, key.modifiers, phase) {
                    self.pending.push(command);
                }
            }
            KeyEventKind::Repeat => {
                if let Some(dir) = direction_of(key.code) {
                    self.last_seen.insert(dir, now);
                }
            }
            KeyEventKind::Release => {
                if let Some(dir) = direction_of(key.code) {
                    self.last_seen.remove(&dir);
                }
            }
        }
    }

    fn is_held(&self, dir: Dir, now: u64) -> bool {
        self.last_seen
            .get(&dir)
            .is_some_and(|&last| now.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Input snapshot for tick `now`; pending commands are consumed
    pub fn take_input(&mut self, now: u64) -> TickInput {
        TickInput {
            commands: std::mem::take(&mut self.pending),
            held: HeldKeys {
                up: self.is_held(Dir::Up, now),
                down: self.is_held(Dir::Down, now),
                left: self.is_held(Dir::Left, now),
                right: self.is_held(Dir::Right, now),
            },
        }
    }
}

/// Source of per-tick input
pub trait InputSource {
    /// Sample input for tick `now` while the game is in `phase`
    fn poll(&mut self, now: u64, phase: GamePhase) -> TickInput;
}

/// Terminal keyboard, read on a background thread
pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    tracker: KeyTracker,
}

impl TerminalInput {
    /// Start the reader thread
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            log::debug!("Input reader thread exiting");
        });
        Self {
            rx,
            tracker: KeyTracker::new(),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, now: u64, phase: GamePhase) -> TickInput {
        while let Ok(ev) = self.rx.try_recv() {
            if let Event::Key(key) = ev {
                self.tracker.key_event(key, now, phase);
            }
        }
        self.tracker.take_input(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_command_mapping_by_phase() {
        let none = KeyModifiers::NONE;
        assert_eq!(command_for(KeyCode::Char(' '), none, GamePhase::Menu), Some(Command::Start));
        assert_eq!(command_for(KeyCode::Char(' '), none, GamePhase::Playing), None);
        assert_eq!(command_for(KeyCode::Char('p'), none, GamePhase::Playing), Some(Command::Pause));
        assert_eq!(command_for(KeyCode::Char('P'), none, GamePhase::Paused), Some(Command::Resume));
        assert_eq!(command_for(KeyCode::Char('r'), none, GamePhase::GameOver), Some(Command::Restart));
        assert_eq!(command_for(KeyCode::Char('r'), none, GamePhase::Menu), None);
        assert_eq!(command_for(KeyCode::Char('q'), none, GamePhase::Playing), None);
        assert_eq!(command_for(KeyCode::Char('q'), none, GamePhase::Paused), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Esc, none, GamePhase::Playing), Some(Command::Quit));
        assert_eq!(
            command_for(KeyCode::Char('c'), KeyModifiers::CONTROL, GamePhase::Playing),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_press_queues_command_once() {
        let mut tracker = KeyTracker::new();
        tracker.key_event(key(KeyCode::Char(' '), KeyEventKind::Press), 1, GamePhase::Menu);
        assert_eq!(tracker.take_input(1).commands, vec![Command::Start]);
        assert!(tracker.take_input(2).commands.is_empty());
    }

    #[test]
    fn test_held_until_window_expires() {
        let mut tracker = KeyTracker::new();
        tracker.key_event(key(KeyCode::Left, KeyEventKind::Press), 10, GamePhase::Playing);
        assert!(tracker.take_input(10).held.left);
        assert!(tracker.take_input(10 + HOLD_WINDOW).held.left);
        assert!(!tracker.take_input(11 + HOLD_WINDOW).held.left);
    }

    #[test]
    fn test_repeat_refreshes_and_release_clears() {
        let mut tracker = KeyTracker::new();
        tracker.key_event(key(KeyCode::Char('d'), KeyEventKind::Press), 0, GamePhase::Playing);
        tracker.key_event(key(KeyCode::Char('d'), KeyEventKind::Repeat), 6, GamePhase::Playing);
        assert!(tracker.take_input(12).held.right);
        tracker.key_event(key(KeyCode::Char('d'), KeyEventKind::Release), 13, GamePhase::Playing);
        assert!(!tracker.take_input(13).held.right);
    }

    #[test]
    fn test_diagonal_hold() {
        let mut tracker = KeyTracker::new();
        tracker.key_event(key(KeyCode::Up, KeyEventKind::Press), 3, GamePhase::Playing);
        tracker.key_event(key(KeyCode::Char('A'), KeyEventKind::Press), 3, GamePhase::Playing);
        let held = tracker.take_input(4).held;
        assert!(held.up && held.left);
        assert!(!held.down && !held.right);
    }
}
