//! Audio system
//!
//! Sound is strictly optional: when no backend is available every call is a
//! no-op and gameplay is unaffected.

use std::io::{self, IsTerminal, Write};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin picked up
    CoinPickup,
}

/// Something that can make a noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect) -> io::Result<()>;
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<io::Stdout> {
    /// Bell on stdout, if stdout is a terminal
    pub fn stdout() -> Option<Self> {
        let out = io::stdout();
        out.is_terminal().then(|| Self::new(out))
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
        match effect {
            SoundEffect::CoinPickup => self.out.write_all(b"\x07")?,
        }
        self.out.flush()
    }
}

/// Audio manager for the game
#[derive(Default)]
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio output available - sound disabled");
        }
        Self { backend }
    }

    /// Manager that never plays anything
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Terminal bell when enabled and attached to a terminal
    pub fn for_terminal(enabled: bool) -> Self {
        if !enabled {
            log::info!("Sound disabled in settings");
            return Self::disabled();
        }
        Self::new(TerminalBell::stdout().map(|b| Box::new(b) as Box<dyn AudioBackend>))
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Play a sound effect. Failures disable audio for the rest of the run.
    pub fn play(&mut self, effect: SoundEffect) {
        let Some(backend) = self.backend.as_mut() else { return };
        if let Err(e) = backend.play(effect) {
            log::warn!("Audio playback failed, disabling sound: {}", e);
            self.backend = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<SoundEffect>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
            self.0.borrow_mut().push(effect);
            Ok(())
        }
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn play(&mut self, _effect: SoundEffect) -> io::Result<()> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut audio = AudioManager::disabled();
        assert!(!audio.is_enabled());
        audio.play(SoundEffect::CoinPickup);
    }

    #[test]
    fn test_plays_through_backend() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(played.clone()))));
        audio.play(SoundEffect::CoinPickup);
        audio.play(SoundEffect::CoinPickup);
        assert_eq!(*played.borrow(), vec![SoundEffect::CoinPickup; 2]);
    }

    #[test]
    fn test_failure_disables_audio() {
        let mut audio = AudioManager::new(Some(Box::new(Broken)));
        assert!(audio.is_enabled());
        audio.play(SoundEffect::CoinPickup);
        assert!(!audio.is_enabled());
    }

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(SoundEffect::CoinPickup).unwrap();
        assert_eq!(bell.out, b"\x07");
    }
}
