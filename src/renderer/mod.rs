//! Presentation
//!
//! `frame` turns game state into a draw list; `terminal` paints draw lists
//! with crossterm.

pub mod frame;
pub mod terminal;

pub use frame::{Frame, build_frame};
pub use terminal::TerminalRenderer;

/// Anything that can show a frame
pub trait Renderer {
    fn present(&mut self, frame: &Frame) -> std::io::Result<()>;
}
