//! Placement strategies for items on a spread.
//!
//! Every strategy shares the same contract: items come in with a size
//! (or get one assigned), leave with `x, y, w, h` populated, and no
//! two frames overlap at the spread's spacing. When a strategy cannot
//! satisfy that under its retry/scan budget it falls back to a
//! deterministic degraded position and records the item in the
//! [`PlacementReport`] instead of failing.

pub mod util;

mod masonry;
mod pack;
mod scatter;

pub use masonry::place_masonry;
pub use pack::place_pack;
pub use scatter::place_scatter;
pub use util::{audit_overlaps, fix_bounds};

use crate::board::Spread;
use crate::item::{normalize_z, Item};
use crate::rng::Rng;

/// Retry/scan budget for placement. Tests shrink `max_attempts` to
/// exercise the fallback path quickly; production callers keep the
/// default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacePolicy {
    /// Random candidates tried per item before falling back (scatter).
    pub max_attempts: usize,
    /// Base scan grid step (bin pack). The effective step is never
    /// finer than the spread's spacing.
    pub step: f64,
}

impl Default for PlacePolicy {
    fn default() -> Self {
        Self { max_attempts: 400, step: 8.0 }
    }
}

impl PlacePolicy {
    /// Grid step actually used for scanning: `max(step, spacing)`.
    #[inline]
    pub fn effective_step(&self, spread: &Spread) -> f64 {
        self.step.max(spread.spacing())
    }
}

/// What a placement pass could not do cleanly.
///
/// Fallback placements are valid rectangles inside the spread but may
/// overlap neighbours; run [`audit_overlaps`] to find out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementReport {
    /// Ids placed via the fallback path.
    pub fallbacks: Vec<u64>,
}

impl PlacementReport {
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Available placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Random scatter, boards visited round-robin.
    Scatter,
    /// Random scatter, board drawn uniformly per item.
    ScatterUniform,
    /// Greedy bin pack, largest items first.
    Pack,
    /// Column masonry with the spread's spacing as gutter.
    Masonry,
    /// Column masonry with zero gutter.
    MasonrySeamless,
}

impl Strategy {
    /// All strategies, in presentation order.
    pub fn all() -> &'static [Strategy] {
        &[
            Strategy::Scatter,
            Strategy::ScatterUniform,
            Strategy::Pack,
            Strategy::Masonry,
            Strategy::MasonrySeamless,
        ]
    }

    /// Strategy name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Scatter => "scatter",
            Strategy::ScatterUniform => "scatter-uniform",
            Strategy::Pack => "pack",
            Strategy::Masonry => "masonry",
            Strategy::MasonrySeamless => "masonry-seamless",
        }
    }

    /// One-line description for listings.
    pub fn describe(&self) -> &'static str {
        match self {
            Strategy::Scatter => "Random non-overlapping scatter, boards filled round-robin",
            Strategy::ScatterUniform => "Random scatter with uniformly random board choice",
            Strategy::Pack => "Greedy grid bin pack, largest items first",
            Strategy::Masonry => "Editorial column masonry with gutters",
            Strategy::MasonrySeamless => "Column masonry with no gutter",
        }
    }

    /// Parse a strategy from its CLI name.
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name.to_lowercase().as_str() {
            "scatter" | "random" => Some(Strategy::Scatter),
            "scatter-uniform" | "uniform" => Some(Strategy::ScatterUniform),
            "pack" | "binpack" | "grid" => Some(Strategy::Pack),
            "masonry" | "editorial" | "columns" => Some(Strategy::Masonry),
            "masonry-seamless" | "seamless" => Some(Strategy::MasonrySeamless),
            _ => None,
        }
    }

    /// Run this strategy over `items`.
    ///
    /// The caller must have floored item sizes (see
    /// [`Item::floor_size`]) and must not touch the list while the
    /// pass runs. Masonry strategies pick 2-4 columns per board from
    /// the RNG stream, so column count varies call to call but is
    /// reproducible per seed.
    pub fn place(
        &self,
        items: &mut [Item],
        spread: &Spread,
        policy: &PlacePolicy,
        rng: &mut Rng,
    ) -> PlacementReport {
        let report = match self {
            Strategy::Scatter => place_scatter(items, spread, policy, rng, false),
            Strategy::ScatterUniform => place_scatter(items, spread, policy, rng, true),
            Strategy::Pack => place_pack(items, spread, policy),
            Strategy::Masonry => {
                let columns = 2 + rng.next_index(3);
                place_masonry(items, spread, columns, spread.spacing(), true, rng)
            }
            Strategy::MasonrySeamless => {
                let columns = 2 + rng.next_index(3);
                place_masonry(items, spread, columns, 0.0, true, rng)
            }
        };
        // Placement never reorders the stack, but callers may hand us
        // hand-built z values; leave with a dense permutation either way.
        normalize_z(items);
        report
    }
}
