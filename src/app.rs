//! Application glue
//!
//! Owns the simulation state and the outside-world collaborators. Each tick:
//! sample input, advance the simulation, act on the events it produced
//! (sound, high score file), then draw.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScoreStore;
use crate::platform::InputSource;
use crate::renderer::{Renderer, build_frame};
use crate::sim::{Flow, GameEvent, GameState, TickInput, tick};

pub struct App {
    pub state: GameState,
    store: HighScoreStore,
    audio: AudioManager,
}

impl App {
    /// Build the app, reading the persisted high score
    pub fn new(seed: u64, store: HighScoreStore, audio: AudioManager) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::new(seed, high_score),
            store,
            audio,
        }
    }

    /// Advance one tick and carry out its side effects
    pub fn step(&mut self, input: &TickInput) -> Flow {
        let flow = tick(&mut self.state, input);
        for event in self.state.drain_events() {
            self.handle_event(event);
        }
        flow
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::CoinCollected { .. } => self.audio.play(SoundEffect::CoinPickup),
            GameEvent::NewHighScore(score) => {
                if let Err(e) = self.store.save(score) {
                    log::error!("Failed to save high score {}: {}", score, e);
                }
            }
            GameEvent::LevelUp { level, enemies } => {
                log::debug!("Reached level {} with {} enemies", level, enemies);
            }
            GameEvent::GameOver { score } => {
                log::info!(
                    "Final score {} (best {}, seed {})",
                    score,
                    self.state.high_score,
                    self.state.seed
                );
            }
            GameEvent::SessionStarted
            | GameEvent::PowerUpSpawned
            | GameEvent::PowerUpCollected { .. }
            | GameEvent::InvincibilityExpired => {}
        }
    }

    /// Fixed-rate loop: one input sample, one tick and one frame per period
    /// until a quit command arrives
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R, tick_rate: u32) -> io::Result<()>
    where
        I: InputSource,
        R: Renderer,
    {
        let period = Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64);
        log::info!("Running at {} ticks/s", tick_rate);

        loop {
            let frame_start = Instant::now();

            let sample = input.poll(self.state.time_ticks, self.state.phase);
            if self.step(&sample) == Flow::Quit {
                log::info!("Quitting after {} ticks", self.state.time_ticks);
                return Ok(());
            }
            renderer.present(&build_frame(&self.state))?;

            let elapsed = frame_start.elapsed();
            if elapsed < period {
                thread::sleep(period - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Frame;
    use crate::sim::{Command, Enemy, GamePhase, Player};
    use glam::Vec2;
    use std::collections::VecDeque;
    use std::fs;

    fn app_in(dir: &tempfile::TempDir) -> App {
        App::new(
            7,
            HighScoreStore::new(dir.path().join("highscore.txt")),
            AudioManager::disabled(),
        )
    }

    /// Hands out scripted input, then quits
    struct Script(VecDeque<TickInput>);

    impl InputSource for Script {
        fn poll(&mut self, _now: u64, _phase: GamePhase) -> TickInput {
            self.0
                .pop_front()
                .unwrap_or_else(|| TickInput::command(Command::Quit))
        }
    }

    #[derive(Default)]
    struct Frames(Vec<Frame>);

    impl Renderer for Frames {
        fn present(&mut self, frame: &Frame) -> io::Result<()> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    #[test]
    fn test_loads_stored_high_score() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("highscore.txt"), "12").unwrap();
        let app = app_in(&dir);
        assert_eq!(app.state.high_score, 12);
        assert_eq!(app.state.seed, 7);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("highscore.txt"), "3").unwrap();
        let mut app = app_in(&dir);
        app.step(&TickInput::command(Command::Start));

        app.state.score = 7;
        app.state.powerup = None;
        app.state.coins.clear();
        app.state.enemies = vec![Enemy::new(Player::spawn_pos(), Vec2::new(2.0, 2.0))];
        app.step(&TickInput::default());

        assert_eq!(app.state.phase, GamePhase::GameOver);
        assert_eq!(fs::read_to_string(dir.path().join("highscore.txt")).unwrap(), "7");
    }

    #[test]
    fn test_lower_score_leaves_store_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("highscore.txt"), "30").unwrap();
        let mut app = app_in(&dir);
        app.step(&TickInput::command(Command::Start));

        app.state.score = 5;
        app.state.powerup = None;
        app.state.coins.clear();
        app.state.enemies = vec![Enemy::new(Player::spawn_pos(), Vec2::new(2.0, 2.0))];
        app.step(&TickInput::default());

        assert_eq!(app.state.phase, GamePhase::GameOver);
        assert_eq!(fs::read_to_string(dir.path().join("highscore.txt")).unwrap(), "30");
    }

    #[test]
    fn test_loop_rate_leaves_invincibility_in_ticks() {
        use crate::consts::{INVINCIBILITY_SECS, INVINCIBILITY_TICKS};
        use crate::sim::PowerUp;

        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.step(&TickInput::command(Command::Start));
        app.state.coins.clear();
        app.state.enemies.clear();
        app.state.powerup = Some(PowerUp::new(Player::spawn_pos()));

        let mut input = Script(VecDeque::from(vec![TickInput::default()]));
        app.run(&mut input, &mut Frames::default(), 1000).unwrap();

        // Picked up on tick 2; the quit tick is 3
        assert_eq!(app.state.invincible_until, Some(2 + INVINCIBILITY_TICKS));
        assert_eq!(app.state.invincible_secs_remaining(), Some(INVINCIBILITY_SECS - 1));
    }

    #[test]
    fn test_run_draws_each_tick_until_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let mut input = Script(VecDeque::from(vec![
            TickInput::default(),
            TickInput::command(Command::Start),
            TickInput::command(Command::Pause),
        ]));
        let mut frames = Frames::default();

        app.run(&mut input, &mut frames, 1000).unwrap();

        assert_eq!(frames.0.len(), 3);
        assert_eq!(frames.0[0].text_lines()[0], "COIN DASH");
        assert_eq!(frames.0[2].text_lines()[0], "PAUSED");
        assert_eq!(app.state.phase, GamePhase::Paused);
    }
}
