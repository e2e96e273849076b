//! Axis-aligned rectangle geometry for every entity on the playfield
//!
//! All entities are squares in screen space:
//! - origin at the top-left corner, y grows downward
//! - integer pixel coordinates
//! - overlap is half-open: rects that only share an edge do not overlap

use glam::IVec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Square with side `size` at `pos`
    pub fn square(pos: IVec2, size: i32) -> Self {
        Self {
            pos,
            size: IVec2::splat(size),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x.saturating_add(self.size.x)
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y.saturating_add(self.size.y)
    }

    /// Whether the rect has no area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Check if two rects share any interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Check against a set of rects
    pub fn intersects_any<'a>(&self, others: impl IntoIterator<Item = &'a Rect>) -> bool {
        others.into_iter().any(|o| self.intersects(o))
    }

    /// Whether the rect lies entirely on screen
    pub fn is_on_screen(&self) -> bool {
        self.left() >= 0
            && self.top() >= 0
            && self.right() <= SCREEN_WIDTH
            && self.bottom() <= SCREEN_HEIGHT
    }
}

/// Largest valid top-left coordinate for a square of `size` kept on screen
#[inline]
pub fn max_origin(size: i32) -> IVec2 {
    IVec2::new(SCREEN_WIDTH - size, SCREEN_HEIGHT - size)
}

/// Clamp a square's top-left corner so the square stays on screen
pub fn clamp_to_screen(pos: IVec2, size: i32) -> IVec2 {
    pos.clamp(IVec2::ZERO, max_origin(size))
}
