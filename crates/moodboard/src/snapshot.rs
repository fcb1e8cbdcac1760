//! Layout snapshots.
//!
//! A snapshot is the spread config plus each item's frame, paint
//! order, and a reference to its source file. Natural sizes and pixel
//! data are deliberately not stored: they are re-resolved from the
//! sources on load, so a stale snapshot can never lie about a source's
//! true dimensions.

use serde::{Deserialize, Serialize};

use crate::board::Spread;
use crate::geometry::Rect;
use crate::item::{normalize_z, Item};

/// One item as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub id: u64,
    /// Source reference, typically a file name relative to the
    /// snapshot's own location.
    pub source: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub z: usize,
}

/// A serializable layout: spread config plus placed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub spread: Spread,
    pub items: Vec<SnapshotItem>,
}

impl Snapshot {
    /// Capture the current layout. `source_of` names the source file
    /// for each item id.
    pub fn capture<F>(spread: Spread, items: &[Item], mut source_of: F) -> Self
    where
        F: FnMut(u64) -> String,
    {
        Self {
            spread,
            items: items
                .iter()
                .map(|it| SnapshotItem {
                    id: it.id,
                    source: source_of(it.id),
                    x: it.rect.x,
                    y: it.rect.y,
                    w: it.rect.w,
                    h: it.rect.h,
                    z: it.z,
                })
                .collect(),
        }
    }

    /// Rebuild items from the snapshot. Natural sizes come back as
    /// unknown (the caller re-decodes sources); sizes are floored and
    /// z re-densified so hand-edited snapshots load into a valid
    /// state.
    pub fn restore(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .map(|s| {
                let mut it = Item::new(s.id, Rect::new(s.x, s.y, s.w, s.h), s.z);
                it.floor_size();
                it
            })
            .collect();
        normalize_z(&mut items);
        items
    }

    /// Source reference for an item id, if present.
    pub fn source_of(&self, id: u64) -> Option<&str> {
        self.items
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.source.as_str())
    }
}
