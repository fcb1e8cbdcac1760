//! Export command - rasterize a snapshot into one PNG per board.
//!
//! This is the export driver from the core's point of view: it decodes
//! every referenced source up front (an item whose source cannot be
//! decoded makes the whole export "not ready" - we never guess a
//! crop), then renders boards strictly in order, replaying each
//! board's crop ops in ascending paint order.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use moodboard::{board_plan, CropOp, Item, Snapshot};

use super::common::{load_snapshot, parse_hex_color, resolve_source};

/// Execute the export command.
pub fn cmd_export(args: &[String]) {
    let mut snapshot_path: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut scale = 1.0f64;
    let mut background = [255u8, 255, 255];

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--scale" => {
                i += 1;
                if i < args.len() {
                    scale = args[i].parse().unwrap_or(1.0);
                }
            }
            "--out" | "-o" => {
                i += 1;
                if i < args.len() {
                    out_dir = Some(PathBuf::from(&args[i]));
                }
            }
            "--background" => {
                i += 1;
                if i < args.len() {
                    background = parse_hex_color(&args[i]).unwrap_or_else(|| {
                        eprintln!("Invalid background color: {} (expected RRGGBB)", args[i]);
                        process::exit(1);
                    });
                }
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
            _ => snapshot_path = Some(PathBuf::from(&args[i])),
        }
        i += 1;
    }

    let Some(snapshot_path) = snapshot_path else {
        eprintln!("Usage: moodboard export <layout.json> [--scale F] [--out DIR] [--background RRGGBB]");
        process::exit(1);
    };
    if scale <= 0.0 {
        eprintln!("Output scale must be positive, got {}", scale);
        process::exit(1);
    }

    let out_dir = out_dir.unwrap_or_else(|| {
        PathBuf::from(format!(
            "moodboard-export-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    });

    match run_export(&snapshot_path, &out_dir, scale, background) {
        Ok(count) => println!("Exported {} board(s) -> {}", count, out_dir.display()),
        Err(e) => {
            eprintln!("Export failed: {}", e);
            process::exit(1);
        }
    }
}

/// Decode all sources, then render and write every board. Returns the
/// number of boards written.
pub fn run_export(
    snapshot_path: &Path,
    out_dir: &Path,
    scale: f64,
    background: [u8; 3],
) -> Result<usize, Box<dyn Error>> {
    let snap = load_snapshot(snapshot_path)?;
    let (items, sources) = decode_sources(&snap, snapshot_path)?;
    fs::create_dir_all(out_dir)?;

    let spread = snap.spread;
    for board in 0..spread.board_count() {
        let plan = board_plan(&items, &spread, board);
        let pixmap = render_board(&spread, &plan, &sources, scale, background);
        let path = out_dir.join(format!("board-{:02}.png", board));
        pixmap.save(&path).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    }

    Ok(spread.board_count())
}

/// Decode every referenced source. A single failure aborts the export:
/// an undecoded item has no trustworthy natural size, so rendering it
/// would produce a silently wrong crop.
fn decode_sources(
    snap: &Snapshot,
    snapshot_path: &Path,
) -> Result<(Vec<Item>, HashMap<u64, DynamicImage>), Box<dyn Error>> {
    let mut items = snap.restore();
    let mut sources = HashMap::new();
    let mut missing = Vec::new();

    for item in &mut items {
        let Some(source) = snap.source_of(item.id) else {
            missing.push(format!("item {} has no source reference", item.id));
            continue;
        };
        let path = resolve_source(snapshot_path, source);
        match image::open(&path) {
            Ok(img) => {
                item.natural = Some(moodboard::NaturalSize::new(img.width(), img.height()));
                sources.insert(item.id, img);
            }
            Err(e) => missing.push(format!("{}: {}", path.display(), e)),
        }
    }

    if !missing.is_empty() {
        return Err(format!("not ready, {} source(s) unavailable:\n  {}", missing.len(), missing.join("\n  ")).into());
    }
    Ok((items, sources))
}

/// Render one board: background fill, then each crop op in plan order.
/// Destination geometry scales by `scale`; source rectangles stay in
/// the source's native pixel grid.
fn render_board(
    spread: &moodboard::Spread,
    plan: &[CropOp],
    sources: &HashMap<u64, DynamicImage>,
    scale: f64,
    background: [u8; 3],
) -> RgbaImage {
    let out_w = (spread.board_w() * scale).round().max(1.0) as u32;
    let out_h = (spread.board_h() * scale).round().max(1.0) as u32;
    let bg = Rgba([background[0], background[1], background[2], 255]);
    let mut board = RgbaImage::from_pixel(out_w, out_h, bg);

    for op in plan {
        let Some(source) = sources.get(&op.item_id) else {
            continue;
        };
        draw_op(&mut board, source, op, scale);
    }

    board
}

/// Rasterize one crop op onto the board image.
fn draw_op(board: &mut RgbaImage, source: &DynamicImage, op: &CropOp, scale: f64) {
    // Source rect in whole pixels, clamped to the image.
    let sx = op.sx.floor().max(0.0) as u32;
    let sy = op.sy.floor().max(0.0) as u32;
    let sw = (op.sw.ceil() as u32).clamp(1, source.width().saturating_sub(sx).max(1));
    let sh = (op.sh.ceil() as u32).clamp(1, source.height().saturating_sub(sy).max(1));

    let dw = ((op.dw * scale).round() as u32).max(1);
    let dh = ((op.dh * scale).round() as u32).max(1);

    let piece = source
        .crop_imm(sx, sy, sw, sh)
        .resize_exact(dw, dh, FilterType::Triangle);

    let dx = (op.dx * scale).round() as i64;
    let dy = (op.dy * scale).round() as i64;
    imageops::overlay(board, &piece, dx, dy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodboard::{NaturalSize, Rect, Spread};

    fn solid(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
    }

    #[test]
    fn empty_plan_renders_background_only() {
        let spread = Spread::new(1, 50.0, 40.0, 0.0).unwrap();
        let board = render_board(&spread, &[], &HashMap::new(), 1.0, [10, 20, 30]);
        assert_eq!(board.dimensions(), (50, 40));
        assert_eq!(board.get_pixel(25, 20), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn output_scale_multiplies_board_size() {
        let spread = Spread::new(1, 100.0, 80.0, 0.0).unwrap();
        let board = render_board(&spread, &[], &HashMap::new(), 2.0, [0, 0, 0]);
        assert_eq!(board.dimensions(), (200, 160));
    }

    #[test]
    fn crop_op_paints_destination_rect() {
        let spread = Spread::new(1, 100.0, 100.0, 0.0).unwrap();
        let mut item = Item::new(0, Rect::new(10.0, 10.0, 40.0, 40.0), 0);
        item.natural = Some(NaturalSize::new(40, 40));
        let plan = board_plan(&[item], &spread, 0);
        assert_eq!(plan.len(), 1);

        let mut sources = HashMap::new();
        sources.insert(0u64, solid(40, 40, [255, 0, 0, 255]));

        let board = render_board(&spread, &plan, &sources, 1.0, [255, 255, 255]);
        assert_eq!(board.get_pixel(30, 30), &Rgba([255, 0, 0, 255]), "inside the frame");
        assert_eq!(board.get_pixel(5, 5), &Rgba([255, 255, 255, 255]), "outside stays background");
        assert_eq!(board.get_pixel(60, 60), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn later_z_paints_on_top() {
        let spread = Spread::new(1, 100.0, 100.0, 0.0).unwrap();
        let mut below = Item::new(0, Rect::new(10.0, 10.0, 40.0, 40.0), 0);
        below.natural = Some(NaturalSize::new(10, 10));
        let mut above = Item::new(1, Rect::new(30.0, 30.0, 40.0, 40.0), 1);
        above.natural = Some(NaturalSize::new(10, 10));

        let plan = board_plan(&[below, above], &spread, 0);
        let mut sources = HashMap::new();
        sources.insert(0u64, solid(10, 10, [255, 0, 0, 255]));
        sources.insert(1u64, solid(10, 10, [0, 0, 255, 255]));

        let board = render_board(&spread, &plan, &sources, 1.0, [255, 255, 255]);
        // The overlap region shows the higher-z item.
        assert_eq!(board.get_pixel(40, 40), &Rgba([0, 0, 255, 255]));
        // Non-overlapping part of the lower item is untouched.
        assert_eq!(board.get_pixel(15, 15), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn straddling_item_renders_on_both_boards() {
        let spread = Spread::new(2, 100.0, 100.0, 0.0).unwrap();
        let mut item = Item::new(0, Rect::new(80.0, 40.0, 40.0, 40.0), 0);
        item.natural = Some(NaturalSize::new(40, 40));
        let mut sources = HashMap::new();
        sources.insert(0u64, solid(40, 40, [0, 255, 0, 255]));

        let plan0 = board_plan(&[item.clone()], &spread, 0);
        let plan1 = board_plan(&[item], &spread, 1);
        let b0 = render_board(&spread, &plan0, &sources, 1.0, [255, 255, 255]);
        let b1 = render_board(&spread, &plan1, &sources, 1.0, [255, 255, 255]);

        // Right edge of board 0 and left edge of board 1 both show the
        // item; the split is seamless across the boundary.
        assert_eq!(b0.get_pixel(90, 50), &Rgba([0, 255, 0, 255]));
        assert_eq!(b1.get_pixel(10, 50), &Rgba([0, 255, 0, 255]));
        assert_eq!(b1.get_pixel(30, 50), &Rgba([255, 255, 255, 255]));
    }
}
