//! # moodboard
//!
//! Core library for scattering, packing, and stacking photographs
//! across a run of fixed-size boards, and for splitting each placed
//! photo into per-board cover-fit crop operations for export.
//!
//! The pipeline is: build a [`Spread`], place [`Item`]s with a
//! [`Strategy`], optionally [`fix_bounds`] / [`audit_overlaps`], then
//! ask [`board_plan`] for the draw operations of each board. All
//! randomness flows through [`rng::Rng`], so a layout is reproducible
//! from its seed.

pub mod board;
pub mod compose;
pub mod geometry;
pub mod item;
pub mod layout;
pub mod rng;
pub mod snapshot;

// Re-export common types at crate root for convenience.
pub use board::{Spread, SpreadError, MAX_BOARDS};
pub use compose::{board_plan, crop_ops, CoverFit, CropOp};
pub use geometry::{overlaps, Rect};
pub use item::{
    bring_to_front, normalize_z, remove_item, send_to_back, Item, NaturalSize, MIN_ITEM_SIZE,
};
pub use layout::{
    audit_overlaps, fix_bounds, place_masonry, place_pack, place_scatter, PlacePolicy,
    PlacementReport, Strategy,
};
pub use snapshot::{Snapshot, SnapshotItem};
