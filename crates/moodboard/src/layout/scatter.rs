//! Random scatter placement.
//!
//! Each item gets a board and a uniformly random position inside that
//! board's usable interior, retried until it clears every frame placed
//! so far. Boards cycle round-robin across items so content spreads
//! over the whole run of boards instead of clustering; the uniform
//! variant draws the board index at random instead.

use crate::board::Spread;
use crate::geometry::{overlaps, Rect};
use crate::item::{Item, MIN_ITEM_SIZE};
use crate::rng::Rng;

use super::{PlacePolicy, PlacementReport};

/// Scatter `items` across the spread.
///
/// Each item's board is fixed before its retries start: the round-robin
/// cursor (or, with `uniform_board`, one uniform draw per item) names
/// the board, and every candidate for that item samples inside it.
/// Items that exhaust the retry budget, and items too large for a
/// board's usable interior, take the degraded path: shrunk to fit if
/// needed, clamped near the origin of the next board in round-robin
/// order, and recorded in the report. Such frames may overlap
/// neighbours but always lie inside the spread bounds.
pub fn place_scatter(
    items: &mut [Item],
    spread: &Spread,
    policy: &PlacePolicy,
    rng: &mut Rng,
    uniform_board: bool,
) -> PlacementReport {
    let spacing = spread.spacing();
    let mut report = PlacementReport::default();
    let mut placed: Vec<Rect> = Vec::with_capacity(items.len());
    let mut cursor = 0usize; // round-robin board cursor

    for item in items.iter_mut() {
        let board = if uniform_board {
            rng.next_index(spread.board_count())
        } else {
            cursor
        };
        let (w, h) = (item.rect.w, item.rect.h);

        let rect = if !fits_usable_interior(spread, w, h) {
            // The sample range would collapse and push the frame past
            // the board edge. Shrink to the interior and report it as
            // degraded instead of accepting an out-of-bounds frame.
            report.fallbacks.push(item.id);
            let (cw, ch) = clamp_to_interior(spread, w, h);
            fallback_rect(spread, (cursor + 1) % spread.board_count(), cw, ch)
        } else {
            let mut found = None;
            for _ in 0..policy.max_attempts {
                let candidate = sample_in_board(spread, board, w, h, rng);
                if placed.iter().all(|r| !overlaps(&candidate, r, spacing)) {
                    found = Some(candidate);
                    break;
                }
            }
            match found {
                Some(r) => r,
                None => {
                    // Budget exhausted: reported, never an error.
                    report.fallbacks.push(item.id);
                    fallback_rect(spread, (cursor + 1) % spread.board_count(), w, h)
                }
            }
        };

        item.rect = rect;
        placed.push(rect);
        cursor = (cursor + 1) % spread.board_count();
    }

    report
}

/// Whether a `w x h` frame fits a board's usable interior at the
/// spread's spacing. Frames that do always sample in-bounds.
fn fits_usable_interior(spread: &Spread, w: f64, h: f64) -> bool {
    w <= spread.board_w() - 2.0 * spread.spacing()
        && h <= spread.board_h() - 2.0 * spread.spacing()
}

/// Shrink a frame into the usable interior, never below the minimum
/// item size and never beyond the board itself.
fn clamp_to_interior(spread: &Spread, w: f64, h: f64) -> (f64, f64) {
    let spacing = spread.spacing();
    let cap_w = (spread.board_w() - 2.0 * spacing)
        .max(MIN_ITEM_SIZE)
        .min(spread.board_w());
    let cap_h = (spread.board_h() - 2.0 * spacing)
        .max(MIN_ITEM_SIZE)
        .min(spread.board_h());
    (w.min(cap_w), h.min(cap_h))
}

/// Uniform random origin inside one board's usable interior. Callers
/// guarantee the frame fits the interior, so the range never inverts.
fn sample_in_board(spread: &Spread, board: usize, w: f64, h: f64, rng: &mut Rng) -> Rect {
    let spacing = spread.spacing();
    let origin = spread.board_origin(board);
    let x = rng.next_range(origin + spacing, origin + spread.board_w() - spacing - w);
    let y = rng.next_range(spacing, spread.board_h() - spacing - h);
    Rect::new(x, y, w, h)
}

/// Deterministic degraded position: near-origin offset in the given
/// board, clamped so the frame stays inside the spread bounds.
fn fallback_rect(spread: &Spread, board: usize, w: f64, h: f64) -> Rect {
    let spacing = spread.spacing();
    let x = (spread.board_origin(board) + spacing).min(spread.total_width() - w).max(0.0);
    let y = spacing.min(spread.board_h() - h).max(0.0);
    Rect::new(x, y, w, h)
}
