//! Terminal presentation using crossterm
//!
//! The 800x600 playfield is scaled onto whatever cell grid the terminal
//! offers. Rects become runs of coloured cells; text is printed at the
//! scaled anchor point.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
    terminal,
};

use super::Renderer;
use super::frame::{Anchor, DrawText, Frame, TextSize};
use crate::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// A rasterized frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub cols: u16,
    pub rows: u16,
    pub cells: Vec<Cell>,
}

impl Grid {
    fn new(cols: u16, rows: u16, bg: Color) -> Self {
        let blank = Cell { ch: ' ', fg: bg, bg };
        Self {
            cols,
            rows,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Text of one row, for tests and debugging
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|c| self.get(c, row))
            .map(|cell| cell.ch)
            .collect()
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let (c0, c1) = span(rect.left(), rect.right(), SCREEN_WIDTH, self.cols);
        let (r0, r1) = span(rect.top(), rect.bottom(), SCREEN_HEIGHT, self.rows);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.get_mut(col, row) {
                    *cell = Cell { ch: ' ', fg: color, bg: color };
                }
            }
        }
    }

    fn put_text(&mut self, item: &DrawText) {
        let text: String = match item.size {
            TextSize::Normal => item.text.clone(),
            TextSize::Big => spaced(&item.text),
        };
        let len = text.chars().count() as i32;
        let row = scale(item.pos.y, SCREEN_HEIGHT, self.rows);
        let col = match item.anchor {
            Anchor::TopLeft => scale(item.pos.x, SCREEN_WIDTH, self.cols),
            Anchor::Center => scale(item.pos.x, SCREEN_WIDTH, self.cols) - len / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.get_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = item.color;
            }
        }
    }
}

/// Map a pixel coordinate onto `cells` cells spanning `extent` pixels
fn scale(px: i32, extent: i32, cells: u16) -> i32 {
    (px as i64 * cells as i64).div_euclid(extent as i64) as i32
}

/// Cell range covered by pixels `[from, to)`, at least one cell wide
fn span(from: i32, to: i32, extent: i32, cells: u16) -> (i32, i32) {
    let start = scale(from, extent, cells);
    let end = (to as i64 * cells as i64 + extent as i64 - 1).div_euclid(extent as i64) as i32;
    (start, end.max(start + 1))
}

/// Headings are letter-spaced so they stand out
fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Rasterize a frame onto a `cols` x `rows` grid
pub fn rasterize(frame: &Frame, cols: u16, rows: u16) -> Grid {
    let mut grid = Grid::new(cols, rows, frame.background);
    for item in &frame.rects {
        grid.fill_rect(&item.rect, item.color);
    }
    for item in &frame.texts {
        grid.put_text(item);
    }
    grid
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Draws frames to a terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Fixed grid size; follows the terminal size when unset
    size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, size: None }
    }

    /// Renderer with a fixed grid, independent of the real terminal
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            size: Some((cols, rows)),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn grid_size(&self) -> io::Result<(u16, u16)> {
        match self.size {
            Some(size) => Ok(size),
            None => terminal::size(),
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = self.grid_size()?;
        let grid = rasterize(frame, cols, rows);

        let mut current: Option<(Color, Color)> = None;
        for row in 0..grid.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..grid.cols {
                let Some(cell) = grid.get(col, row) else { continue };
                if current != Some((cell.fg, cell.bg)) {
                    self.out.queue(style::SetForegroundColor(term_color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(term_color(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
