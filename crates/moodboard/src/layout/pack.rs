//! Greedy grid bin pack.
//!
//! Items are resolved largest-area first: big frames have the fewest
//! valid positions, so they go in while the most free space remains.
//! Candidate origins walk a coarse step grid row-major within each
//! board, boards in order, and the first origin clearing every placed
//! frame wins.

use crate::board::Spread;
use crate::geometry::{overlaps, Rect};
use crate::item::Item;

use super::{PlacePolicy, PlacementReport};

/// Pack `items` onto the spread.
///
/// Deterministic: no randomness, same input gives the same packing.
/// An item with no free cell anywhere keeps its previous rectangle
/// and is recorded in the report.
pub fn place_pack(items: &mut [Item], spread: &Spread, policy: &PlacePolicy) -> PlacementReport {
    let spacing = spread.spacing();
    let step = policy.effective_step(spread);
    let mut report = PlacementReport::default();
    let mut placed: Vec<Rect> = Vec::with_capacity(items.len());

    // Largest first. Sort indices, not items, so the stack order in
    // the list is untouched.
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[b]
            .rect
            .area()
            .partial_cmp(&items[a].rect.area())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for idx in order {
        let (w, h) = (items[idx].rect.w, items[idx].rect.h);
        match scan_boards(spread, w, h, step, spacing, &placed) {
            Some(rect) => {
                items[idx].rect = rect;
                placed.push(rect);
            }
            None => {
                // Nowhere to go: keep the last-known rectangle so the
                // item is neither dropped nor crashed on.
                report.fallbacks.push(items[idx].id);
                placed.push(items[idx].rect);
            }
        }
    }

    report
}

/// First free origin for a `w x h` frame, scanning boards in order and
/// each board's interior row-major on the step grid.
fn scan_boards(
    spread: &Spread,
    w: f64,
    h: f64,
    step: f64,
    spacing: f64,
    placed: &[Rect],
) -> Option<Rect> {
    for board in 0..spread.board_count() {
        let origin = spread.board_origin(board);
        let max_x = origin + spread.board_w() - spacing - w;
        let max_y = spread.board_h() - spacing - h;

        let mut y = spacing;
        while y <= max_y {
            let mut x = origin + spacing;
            while x <= max_x {
                let candidate = Rect::new(x, y, w, h);
                if placed.iter().all(|r| !overlaps(&candidate, r, spacing)) {
                    return Some(candidate);
                }
                x += step;
            }
            y += step;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(sizes: &[(f64, f64)]) -> Vec<Item> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| Item::new(i as u64, Rect::new(0.0, 0.0, w, h), i))
            .collect()
    }

    #[test]
    fn packs_without_overlap() {
        let spread = Spread::new(2, 400.0, 400.0, 8.0).unwrap();
        let mut its = items(&[
            (100.0, 80.0),
            (60.0, 60.0),
            (120.0, 40.0),
            (50.0, 90.0),
            (70.0, 70.0),
        ]);
        let report = place_pack(&mut its, &spread, &PlacePolicy::default());
        assert!(report.is_clean());
        for a in 0..its.len() {
            for b in (a + 1)..its.len() {
                assert!(!overlaps(&its[a].rect, &its[b].rect, 8.0));
            }
        }
    }

    #[test]
    fn largest_item_claims_first_cell() {
        let spread = Spread::new(1, 500.0, 500.0, 10.0).unwrap();
        let mut its = items(&[(40.0, 40.0), (200.0, 200.0)]);
        place_pack(&mut its, &spread, &PlacePolicy::default());
        // The 200x200 frame was resolved first, so it sits at the
        // board interior's top-left even though it arrived second.
        assert_eq!(its[1].rect.x, 10.0);
        assert_eq!(its[1].rect.y, 10.0);
    }

    #[test]
    fn stack_order_is_untouched() {
        let spread = Spread::new(1, 500.0, 500.0, 10.0).unwrap();
        let mut its = items(&[(40.0, 40.0), (200.0, 200.0), (80.0, 80.0)]);
        place_pack(&mut its, &spread, &PlacePolicy::default());
        let zs: Vec<usize> = its.iter().map(|it| it.z).collect();
        assert_eq!(zs, vec![0, 1, 2]);
    }

    #[test]
    fn overfull_spread_keeps_last_rect() {
        let spread = Spread::new(1, 100.0, 100.0, 10.0).unwrap();
        let mut its = items(&[(80.0, 80.0), (80.0, 80.0)]);
        its[1].rect.x = 33.0;
        its[1].rect.y = 44.0;
        let report = place_pack(&mut its, &spread, &PlacePolicy::default());
        assert_eq!(report.fallbacks, vec![1]);
        // Loser keeps its previous frame untouched.
        assert_eq!(its[1].rect, Rect::new(33.0, 44.0, 80.0, 80.0));
    }

    #[test]
    fn spills_into_later_boards() {
        let spread = Spread::new(3, 120.0, 120.0, 10.0).unwrap();
        let mut its = items(&[(90.0, 90.0), (90.0, 90.0), (90.0, 90.0)]);
        let report = place_pack(&mut its, &spread, &PlacePolicy::default());
        assert!(report.is_clean());
        let boards: Vec<usize> = its
            .iter()
            .map(|it| spread.board_index_for_x(it.rect.x))
            .collect();
        assert_eq!(boards, vec![0, 1, 2]);
    }

    #[test]
    fn packing_is_deterministic() {
        let spread = Spread::new(2, 300.0, 300.0, 6.0).unwrap();
        let sizes = [(50.0, 70.0), (90.0, 30.0), (60.0, 60.0)];
        let mut a = items(&sizes);
        let mut b = items(&sizes);
        place_pack(&mut a, &spread, &PlacePolicy::default());
        place_pack(&mut b, &spread, &PlacePolicy::default());
        assert_eq!(a, b);
    }
}
