//! Shared placement utilities: the bounds-fixing pass and the overlap
//! audit callers run after a placement to detect fallback damage.

use crate::board::Spread;
use crate::geometry::overlaps;
use crate::item::{Item, MIN_ITEM_SIZE};

/// Clamp every item fully into its current board slice.
///
/// Board membership comes from the pre-clamp x via the central
/// membership rule; an item is pulled back inside that board, never
/// reassigned to another. Idempotent: a second pass changes nothing.
pub fn fix_bounds(items: &mut [Item], spread: &Spread) {
    let spacing = spread.spacing();
    let interior_w = (spread.board_w() - 2.0 * spacing).max(MIN_ITEM_SIZE);
    let interior_h = (spread.board_h() - 2.0 * spacing).max(MIN_ITEM_SIZE);

    for item in items.iter_mut() {
        let board = spread.board_index_for_x(item.rect.x);
        let origin = spread.board_origin(board);

        item.rect.w = item.rect.w.min(interior_w);
        item.rect.h = item.rect.h.min(interior_h);
        item.rect.x = clamp(item.rect.x, origin + spacing, origin + spread.board_w() - spacing - item.rect.w);
        item.rect.y = clamp(item.rect.y, spacing, spread.board_h() - spacing - item.rect.h);
    }
}

/// Clamp that tolerates an inverted range by pinning to `min`.
#[inline]
fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if max < min {
        min
    } else {
        v.max(min).min(max)
    }
}

/// All pairs of items violating the margin. Empty means the layout
/// honors the no-overlap contract; non-empty after a reported fallback
/// is expected and up to the caller to surface.
pub fn audit_overlaps(items: &[Item], margin: f64) -> Vec<(u64, u64)> {
    let mut pairs = Vec::new();
    for a in 0..items.len() {
        for b in (a + 1)..items.len() {
            if overlaps(&items[a].rect, &items[b].rect, margin) {
                pairs.push((items[a].id, items[b].id));
            }
        }
    }
    pairs
}
