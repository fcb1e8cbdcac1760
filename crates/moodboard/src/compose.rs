//! Board-partition / cover-fit compositing.
//!
//! A placed frame rarely matches its source image's proportions and
//! may straddle board boundaries. This module computes, per board the
//! frame touches, one crop operation: which source pixels to draw and
//! where on that board they land. The "cover" contract applies: the
//! frame is always fully filled, the overflowing axis is cropped
//! centered, and no axis is ever stretched non-uniformly.

use crate::board::Spread;
use crate::geometry::Rect;
use crate::item::{Item, NaturalSize};

/// The cover-fit mapping from a source image onto a frame.
///
/// `scale` is `max(fw/nw, fh/nh)`: the scaled source footprint always
/// covers the frame, and whatever sticks out is cropped. `offset_*` is
/// how far the scaled source's top-left sits above/left of the frame's
/// top-left (half the overhang, for a centered crop).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CoverFit {
    pub fn new(natural: NaturalSize, frame_w: f64, frame_h: f64) -> Self {
        let nw = natural.w as f64;
        let nh = natural.h as f64;
        let scale = (frame_w / nw).max(frame_h / nh);
        Self {
            scale,
            offset_x: (nw * scale - frame_w) / 2.0,
            offset_y: (nh * scale - frame_h) / 2.0,
        }
    }
}

/// One draw instruction: copy `(sx, sy, sw, sh)` from the source's
/// native pixel grid into `(dx, dy, dw, dh)` on a board, board-local,
/// pre-output-scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropOp {
    pub item_id: u64,
    pub board: usize,
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
}

/// Crop operations for one item, one per board its frame intersects,
/// in board order.
///
/// Empty when the frame misses every board or the item's natural size
/// is not known yet; a frame is never guessed at.
pub fn crop_ops(item: &Item, spread: &Spread) -> Vec<CropOp> {
    let Some(natural) = item.natural else {
        return Vec::new();
    };
    if item.rect.is_degenerate() {
        return Vec::new();
    }

    let fit = CoverFit::new(natural, item.rect.w, item.rect.h);
    let mut ops = Vec::new();

    for board in 0..spread.board_count() {
        let Some(hit) = item.rect.intersect(&spread.board_rect(board)) else {
            continue;
        };

        // Map the visible slice back through the cover transform to
        // the source pixel grid, clamped to absorb float edge error.
        let sx = (hit.x - item.rect.x + fit.offset_x) / fit.scale;
        let sy = (hit.y - item.rect.y + fit.offset_y) / fit.scale;
        let sw = hit.w / fit.scale;
        let sh = hit.h / fit.scale;
        let (sx, sw) = clamp_span(sx, sw, natural.w as f64);
        let (sy, sh) = clamp_span(sy, sh, natural.h as f64);

        ops.push(CropOp {
            item_id: item.id,
            board,
            sx,
            sy,
            sw,
            sh,
            dx: hit.x - spread.board_origin(board),
            dy: hit.y,
            dw: hit.w,
            dh: hit.h,
        });
    }

    ops
}

/// Clamp a 1-D span into `[0, limit]`.
#[inline]
fn clamp_span(start: f64, len: f64, limit: f64) -> (f64, f64) {
    let s = start.clamp(0.0, limit);
    let e = (start + len).clamp(0.0, limit);
    (s, e - s)
}

/// All crop ops landing on one board, in ascending paint order, so the
/// consumer can draw them back to front.
pub fn board_plan(items: &[Item], spread: &Spread, board: usize) -> Vec<CropOp> {
    let mut by_z: Vec<&Item> = items.iter().collect();
    by_z.sort_by_key(|it| it.z);

    let mut plan = Vec::new();
    for item in by_z {
        plan.extend(crop_ops(item, spread).into_iter().filter(|op| op.board == board));
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn item(natural: Option<(u32, u32)>, rect: Rect) -> Item {
        let mut it = Item::new(0, rect, 0);
        it.natural = natural.map(|(w, h)| NaturalSize::new(w, h));
        it
    }

    #[test]
    fn cover_scale_is_max_ratio() {
        // 400x300 source in a 200x300 frame: height ratio (1.0) wins,
        // width overflows and gets cropped.
        let fit = CoverFit::new(NaturalSize::new(400, 300), 200.0, 300.0);
        assert!((fit.scale - 1.0).abs() < EPS);
        assert!((fit.offset_x - 100.0).abs() < EPS);
        assert!(fit.offset_y.abs() < EPS);
    }

    #[test]
    fn unknown_natural_size_emits_nothing() {
        let spread = Spread::new(2, 100.0, 100.0, 0.0).unwrap();
        let it = item(None, Rect::new(10.0, 10.0, 50.0, 50.0));
        assert!(crop_ops(&it, &spread).is_empty());
    }

    #[test]
    fn off_spread_item_emits_nothing() {
        let spread = Spread::new(2, 100.0, 100.0, 0.0).unwrap();
        let it = item(Some((100, 100)), Rect::new(500.0, 0.0, 50.0, 50.0));
        assert!(crop_ops(&it, &spread).is_empty());
    }

    #[test]
    fn single_board_item_emits_one_op() {
        let spread = Spread::new(3, 100.0, 100.0, 0.0).unwrap();
        let it = item(Some((200, 200)), Rect::new(120.0, 20.0, 60.0, 60.0));
        let ops = crop_ops(&it, &spread);
        assert_eq!(ops.len(), 1);
        let op = &ops[0];
        assert_eq!(op.board, 1);
        assert!((op.dx - 20.0).abs() < EPS);
        assert!((op.dy - 20.0).abs() < EPS);
        assert!((op.dw - 60.0).abs() < EPS);
        assert!((op.dh - 60.0).abs() < EPS);
    }

    // The boundary-splitting invariant: a frame spanning two adjacent
    // boards yields exactly two ops that partition it losslessly.
    #[test]
    fn two_board_split_is_lossless() {
        let spread = Spread::new(2, 200.0, 400.0, 0.0).unwrap();
        let it = item(Some((400, 300)), Rect::new(50.0, 0.0, 200.0, 300.0));
        let fit = CoverFit::new(NaturalSize::new(400, 300), 200.0, 300.0);

        let ops = crop_ops(&it, &spread);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].board, 0);
        assert_eq!(ops[1].board, 1);

        let dw_sum: f64 = ops.iter().map(|op| op.dw).sum();
        assert!((dw_sum - 200.0).abs() < EPS, "dw must cover the full frame");

        let sw_scaled_sum: f64 = ops.iter().map(|op| op.sw * fit.scale).sum();
        assert!(
            (sw_scaled_sum - 200.0).abs() < EPS,
            "source slices must partition the frame with no gap or double-coverage"
        );

        // No seam: the pieces butt at the board edge.
        assert!((ops[0].dx + ops[0].dw - 200.0).abs() < EPS);
        assert!(ops[1].dx.abs() < EPS);
        // And the source slices are contiguous.
        assert!((ops[0].sx + ops[0].sw - ops[1].sx).abs() < EPS);
    }

    #[test]
    fn aspect_is_never_distorted() {
        let spread = Spread::new(3, 150.0, 500.0, 0.0).unwrap();
        let cases = [
            item(Some((400, 300)), Rect::new(50.0, 10.0, 200.0, 300.0)),
            item(Some((1000, 200)), Rect::new(100.0, 0.0, 180.0, 120.0)),
            item(Some((333, 777)), Rect::new(140.0, 40.0, 90.0, 90.0)),
        ];
        for it in &cases {
            let fit = CoverFit::new(it.natural.unwrap(), it.rect.w, it.rect.h);
            for op in crop_ops(it, &spread) {
                assert!(((op.sw * fit.scale) / op.dw - 1.0).abs() < EPS);
                assert!(((op.sh * fit.scale) / op.dh - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn source_rect_stays_inside_natural_bounds() {
        let spread = Spread::new(2, 100.0, 100.0, 0.0).unwrap();
        // Frame hangs off the top-left of the spread.
        let it = item(Some((64, 64)), Rect::new(-20.0, -20.0, 80.0, 80.0));
        for op in crop_ops(&it, &spread) {
            assert!(op.sx >= 0.0 && op.sx + op.sw <= 64.0 + EPS);
            assert!(op.sy >= 0.0 && op.sy + op.sh <= 64.0 + EPS);
            assert!(op.sw > 0.0 && op.sh > 0.0);
        }
    }

    #[test]
    fn board_plan_orders_by_z() {
        let spread = Spread::new(1, 300.0, 300.0, 0.0).unwrap();
        let mut a = item(Some((100, 100)), Rect::new(10.0, 10.0, 50.0, 50.0));
        let mut b = item(Some((100, 100)), Rect::new(30.0, 30.0, 50.0, 50.0));
        let mut c = item(Some((100, 100)), Rect::new(50.0, 50.0, 50.0, 50.0));
        a.id = 1;
        a.z = 2;
        b.id = 2;
        b.z = 0;
        c.id = 3;
        c.z = 1;

        let plan = board_plan(&[a, b, c], &spread, 0);
        let order: Vec<u64> = plan.iter().map(|op| op.item_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn board_plan_skips_undecoded_items() {
        let spread = Spread::new(1, 300.0, 300.0, 0.0).unwrap();
        let decoded = item(Some((100, 100)), Rect::new(10.0, 10.0, 50.0, 50.0));
        let pending = item(None, Rect::new(100.0, 100.0, 50.0, 50.0));
        let plan = board_plan(&[decoded, pending], &spread, 0);
        assert_eq!(plan.len(), 1);
    }
}
