//! Editorial column masonry.
//!
//! Each board is split into equal-width vertical columns separated by
//! a gutter (zero for the seamless variant). Items go to whichever
//! column is currently shortest, sized to the column width with height
//! from their own aspect ratio when known, otherwise from a bounded
//! random aspect band.

use crate::board::Spread;
use crate::geometry::{overlaps, Rect};
use crate::item::{Item, MIN_ITEM_SIZE};
use crate::rng::Rng;

use super::PlacementReport;

/// Random aspect band (width / height) used when an item's natural
/// size is not known yet.
const ASPECT_BAND: (f64, f64) = (0.7, 1.6);

/// Lay `items` out in columns.
///
/// `columns_per_board` is clamped to `1..=4`. `shuffle` randomizes
/// processing order (placement order, not stack order). Columns grow
/// monotonically downward, so in seamless mode an item's y is exactly
/// the sum of the heights stacked above it in its column.
pub fn place_masonry(
    items: &mut [Item],
    spread: &Spread,
    columns_per_board: usize,
    gutter: f64,
    shuffle: bool,
    rng: &mut Rng,
) -> PlacementReport {
    let cols = columns_per_board.clamp(1, 4);
    let col_w = (spread.board_w() - gutter * (cols as f64 + 1.0)) / cols as f64;
    let total_cols = cols * spread.board_count();

    let mut order: Vec<usize> = (0..items.len()).collect();
    if shuffle {
        rng.shuffle(&mut order);
    }

    // Running bottom edge per column, and the frames already appended
    // (for the defensive collision check).
    let mut heights = vec![gutter; total_cols];
    let mut placed: Vec<Vec<Rect>> = vec![Vec::new(); total_cols];
    let mut report = PlacementReport::default();

    for idx in order {
        let item = &mut items[idx];
        let aspect = match item.natural {
            Some(n) => n.aspect(),
            None => rng.next_range(ASPECT_BAND.0, ASPECT_BAND.1),
        };
        let h = (col_w / aspect).max(MIN_ITEM_SIZE);

        // Shortest column first, then the rest in ascending height, so
        // a defensive rejection retries the next-best slot.
        let mut slots: Vec<usize> = (0..total_cols).collect();
        slots.sort_by(|&a, &b| {
            heights[a]
                .partial_cmp(&heights[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut appended = false;
        for col in slots {
            let rect = Rect::new(column_x(spread, cols, col_w, gutter, col), heights[col], col_w, h);
            // Monotone growth means this cannot collide, but check
            // anyway rather than ever overlapping silently.
            if placed[col].iter().any(|r| overlaps(&rect, r, gutter)) {
                continue;
            }
            item.rect = rect;
            heights[col] = rect.bottom() + gutter;
            placed[col].push(rect);
            appended = true;
            break;
        }

        if !appended {
            // Unreachable under monotone growth; take the shortest
            // column regardless and say so.
            let col = (0..total_cols)
                .min_by(|&a, &b| {
                    heights[a]
                        .partial_cmp(&heights[b])
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(0);
            let rect = Rect::new(column_x(spread, cols, col_w, gutter, col), heights[col], col_w, h);
            item.rect = rect;
            heights[col] = rect.bottom() + gutter;
            placed[col].push(rect);
            report.fallbacks.push(item.id);
        }
    }

    report
}

/// Spread-space x of a global column index.
#[inline]
fn column_x(spread: &Spread, cols_per_board: usize, col_w: f64, gutter: f64, col: usize) -> f64 {
    let board = col / cols_per_board;
    let slot = col % cols_per_board;
    spread.board_origin(board) + gutter + slot as f64 * (col_w + gutter)
}
