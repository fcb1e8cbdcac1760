//! Placed items and paint order.
//!
//! An item is one photograph on the spread: a frame rectangle in
//! spread-space, the source's true pixel size once it is known, and a
//! position in the paint-order stack. Paint order (`z`) is kept dense:
//! after any placement, removal, or restack the z values are exactly
//! the permutation `0..n`.

use crate::geometry::Rect;

/// Minimum frame extent in spread units. Placement never produces a
/// frame smaller than this in either dimension.
pub const MIN_ITEM_SIZE: f64 = 16.0;

/// True pixel dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalSize {
    pub w: u32,
    pub h: u32,
}

impl NaturalSize {
    #[inline]
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Width over height.
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

/// One photograph placed on the spread.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Stable identifier, unique within one layout.
    pub id: u64,
    /// Frame rectangle in spread-space. May straddle board boundaries.
    pub rect: Rect,
    /// Source pixel size; `None` until the decode completes. Set once.
    pub natural: Option<NaturalSize>,
    /// Paint-order position. Higher paints later (on top).
    pub z: usize,
}

impl Item {
    pub fn new(id: u64, rect: Rect, z: usize) -> Self {
        Self { id, rect, natural: None, z }
    }

    /// Floor both frame dimensions to [`MIN_ITEM_SIZE`]. Callers run
    /// this before placement so no strategy ever sees a degenerate
    /// frame.
    pub fn floor_size(&mut self) {
        self.rect.w = self.rect.w.max(MIN_ITEM_SIZE);
        self.rect.h = self.rect.h.max(MIN_ITEM_SIZE);
    }
}

/// Re-densify z values, preserving the current relative paint order.
/// Ties (which only appear in hand-built input) break by list position.
pub fn normalize_z(items: &mut [Item]) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| (items[i].z, i));
    for (rank, &i) in order.iter().enumerate() {
        items[i].z = rank;
    }
}

/// Move one item to the top of the paint order, closing the gap it
/// leaves behind. No-op if the id is unknown.
pub fn bring_to_front(items: &mut [Item], id: u64) {
    let Some(pos) = items.iter().position(|it| it.id == id) else {
        return;
    };
    let old_z = items[pos].z;
    for it in items.iter_mut() {
        if it.z > old_z {
            it.z -= 1;
        }
    }
    items[pos].z = items.len() - 1;
}

/// Move one item to the bottom of the paint order.
pub fn send_to_back(items: &mut [Item], id: u64) {
    let Some(pos) = items.iter().position(|it| it.id == id) else {
        return;
    };
    let old_z = items[pos].z;
    for it in items.iter_mut() {
        if it.z < old_z {
            it.z += 1;
        }
    }
    items[pos].z = 0;
}

/// Remove an item by id, keeping the remaining z values dense.
pub fn remove_item(items: &mut Vec<Item>, id: u64) -> Option<Item> {
    let pos = items.iter().position(|it| it.id == id)?;
    let removed = items.remove(pos);
    for it in items.iter_mut() {
        if it.z > removed.z {
            it.z -= 1;
        }
    }
    Some(removed)
}
