//! Coin Dash entry point
//!
//! Sets up logging and the terminal, then runs the game loop.

use std::fs::File;
use std::io::{BufWriter, Write, stdout};

use crossterm::{
    ExecutableCommand, cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use coin_dash::app::App;
use coin_dash::audio::AudioManager;
use coin_dash::platform::TerminalInput;
use coin_dash::renderer::TerminalRenderer;
use coin_dash::{GameResult, HighScoreStore, Settings};

/// Log to the settings' log file; stderr would scribble over the game
fn init_logging(settings: &Settings) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&settings.log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Cannot open log file {}: {}", settings.log_path.display(), e),
    }
    builder.init();
}

fn main() -> GameResult<()> {
    let settings = Settings::load();
    init_logging(&settings);
    log::info!("Coin Dash starting...");

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let store = HighScoreStore::new(&settings.high_score_path);
    let audio = AudioManager::for_terminal(settings.sound);
    let mut app = App::new(seed, store, audio);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events where the terminal supports them; others fall back to repeats
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let mut input = TerminalInput::spawn();
    let mut renderer = TerminalRenderer::new(&mut out);
    let result = app.run(&mut input, &mut renderer, settings.tick_rate);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();

    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }
    log::info!("Best score: {}", app.state.high_score);
    Ok(result?)
}
