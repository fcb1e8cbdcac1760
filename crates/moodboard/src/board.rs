//! Board partitioning - the spread model.
//!
//! A spread is a row of equal-size boards laid edge to edge. Items are
//! placed in spread-space (one continuous coordinate system across all
//! boards); this module owns the conversion between spread-space and
//! per-board-local coordinates, and the single membership rule
//! `floor(x / board_w)` so layout strategies never re-derive it.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Maximum number of boards in one spread.
pub const MAX_BOARDS: usize = 20;

/// Error type for spread configuration.
#[derive(Debug, PartialEq)]
pub enum SpreadError {
    /// Board count outside `1..=MAX_BOARDS`.
    BadBoardCount(usize),
    /// Non-positive board width or height.
    BadBoardSize(f64, f64),
    /// Negative spacing.
    BadSpacing(f64),
}

impl std::fmt::Display for SpreadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpreadError::BadBoardCount(n) => {
                write!(f, "board count {} outside 1..={}", n, MAX_BOARDS)
            }
            SpreadError::BadBoardSize(w, h) => {
                write!(f, "board size {}x{} must be positive", w, h)
            }
            SpreadError::BadSpacing(s) => write!(f, "spacing {} must be >= 0", s),
        }
    }
}

impl std::error::Error for SpreadError {}

/// A validated spread configuration.
///
/// Construction is the validation boundary: every algorithm in this
/// crate may assume a `Spread` it receives is well-formed. That holds
/// through serde too - deserialization funnels through [`Spread::new`],
/// so a snapshot with a bad config is rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpread", into = "RawSpread")]
pub struct Spread {
    board_count: usize,
    board_w: f64,
    board_h: f64,
    spacing: f64,
}

/// Wire form of [`Spread`], unvalidated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawSpread {
    board_count: usize,
    board_w: f64,
    board_h: f64,
    spacing: f64,
}

impl TryFrom<RawSpread> for Spread {
    type Error = SpreadError;

    fn try_from(raw: RawSpread) -> Result<Self, SpreadError> {
        Spread::new(raw.board_count, raw.board_w, raw.board_h, raw.spacing)
    }
}

impl From<Spread> for RawSpread {
    fn from(s: Spread) -> Self {
        Self {
            board_count: s.board_count,
            board_w: s.board_w,
            board_h: s.board_h,
            spacing: s.spacing,
        }
    }
}

impl Spread {
    pub fn new(
        board_count: usize,
        board_w: f64,
        board_h: f64,
        spacing: f64,
    ) -> Result<Self, SpreadError> {
        if board_count == 0 || board_count > MAX_BOARDS {
            return Err(SpreadError::BadBoardCount(board_count));
        }
        if board_w <= 0.0 || board_h <= 0.0 {
            return Err(SpreadError::BadBoardSize(board_w, board_h));
        }
        if spacing < 0.0 {
            return Err(SpreadError::BadSpacing(spacing));
        }
        Ok(Self { board_count, board_w, board_h, spacing })
    }

    #[inline]
    pub fn board_count(&self) -> usize {
        self.board_count
    }

    #[inline]
    pub fn board_w(&self) -> f64 {
        self.board_w
    }

    #[inline]
    pub fn board_h(&self) -> f64 {
        self.board_h
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total width of the spread (all boards edge to edge).
    #[inline]
    pub fn total_width(&self) -> f64 {
        self.board_count as f64 * self.board_w
    }

    /// Full spread extent as a rectangle anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.total_width(), self.board_h)
    }

    /// Extent of board `index` in spread-space.
    #[inline]
    pub fn board_rect(&self, index: usize) -> Rect {
        Rect::new(index as f64 * self.board_w, 0.0, self.board_w, self.board_h)
    }

    /// X origin of board `index` in spread-space.
    #[inline]
    pub fn board_origin(&self, index: usize) -> f64 {
        index as f64 * self.board_w
    }

    /// The board an x coordinate belongs to: `floor(x / board_w)`,
    /// clamped into the valid range so off-spread coordinates resolve
    /// to the nearest edge board.
    #[inline]
    pub fn board_index_for_x(&self, x: f64) -> usize {
        let idx = (x / self.board_w).floor();
        if idx < 0.0 {
            0
        } else {
            (idx as usize).min(self.board_count - 1)
        }
    }

    /// Convert a spread-space point to `(board, local_x, local_y)`.
    #[inline]
    pub fn to_board_local(&self, x: f64, y: f64) -> (usize, f64, f64) {
        let board = self.board_index_for_x(x);
        (board, x - self.board_origin(board), y)
    }

    /// Convert a board-local point back to spread-space.
    #[inline]
    pub fn to_spread(&self, board: usize, local_x: f64, local_y: f64) -> (f64, f64) {
        (self.board_origin(board) + local_x, local_y)
    }
}
