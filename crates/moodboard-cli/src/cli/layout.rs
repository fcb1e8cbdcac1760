//! Layout command implementation.

use std::path::PathBuf;
use std::process;

use moodboard::{
    audit_overlaps, Item, NaturalSize, PlacePolicy, Rect, Snapshot, Spread, Strategy,
    MIN_ITEM_SIZE,
};

use super::common::{collect_sources, parse_board_size, probe_natural_size, save_snapshot};

/// Initial frame height as a fraction of board height; width follows
/// the source aspect. Masonry ignores these hints and sizes to its
/// columns.
const HINT_HEIGHT_FRACTION: f64 = 0.25;

/// Execute the layout command.
pub fn cmd_layout(args: &[String]) {
    let mut inputs: Vec<String> = Vec::new();
    let mut strategy = Strategy::Scatter;
    let mut board_count = 3usize;
    let mut board_w = 1080.0;
    let mut board_h = 1320.0;
    let mut spacing = 24.0;
    let mut seed: Option<u64> = None;
    let mut output = PathBuf::from("layout.json");

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--strategy" => {
                i += 1;
                if i < args.len() {
                    strategy = Strategy::from_name(&args[i]).unwrap_or_else(|| {
                        eprintln!("Unknown strategy: {}. Run 'moodboard strategies'.", args[i]);
                        process::exit(1);
                    });
                }
            }
            "--boards" => {
                i += 1;
                if i < args.len() {
                    board_count = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid board count: {}", args[i]);
                        process::exit(1);
                    });
                }
            }
            "--board-size" => {
                i += 1;
                if i < args.len() {
                    let (w, h) = parse_board_size(&args[i]).unwrap_or_else(|| {
                        eprintln!("Invalid board size: {} (expected WxH)", args[i]);
                        process::exit(1);
                    });
                    board_w = w;
                    board_h = h;
                }
            }
            "--spacing" => {
                i += 1;
                if i < args.len() {
                    spacing = args[i].parse().unwrap_or(24.0);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output = PathBuf::from(&args[i]);
                }
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
            _ => inputs.push(args[i].clone()),
        }
        i += 1;
    }

    if inputs.is_empty() {
        eprintln!("Usage: moodboard layout <files|dirs> [-s strategy] [--boards N]");
        eprintln!("         [--board-size WxH] [--spacing N] [--seed N] [-o layout.json]");
        process::exit(1);
    }

    // Configuration is validated here, before any placement runs.
    let spread = Spread::new(board_count, board_w, board_h, spacing).unwrap_or_else(|e| {
        eprintln!("Invalid spread: {}", e);
        process::exit(1);
    });

    let sources = collect_sources(&inputs).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    if sources.is_empty() {
        eprintln!("No image sources found in the given inputs.");
        process::exit(1);
    }

    let seed = seed.unwrap_or_else(rand::random::<u64>);
    let (items, names) = build_items(&sources, &spread);

    let mut items = items;
    let mut rng = moodboard::rng::Rng::new(seed);
    let report = strategy.place(&mut items, &spread, &PlacePolicy::default(), &mut rng);

    if !report.is_clean() {
        eprintln!(
            "Warning: {} item(s) placed via fallback and may overlap: {:?}",
            report.fallbacks.len(),
            report.fallbacks
        );
    }
    let violations = audit_overlaps(&items, spread.spacing());
    if !violations.is_empty() {
        eprintln!("Warning: {} overlapping pair(s) after placement", violations.len());
    }

    let snap = Snapshot::capture(spread, &items, |id| names[id as usize].clone());
    if let Err(e) = save_snapshot(&snap, &output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!(
        "Placed {} item(s) with '{}' (seed {}) -> {}",
        items.len(),
        strategy.name(),
        seed,
        output.display()
    );
}

/// Build items from source paths: probe natural sizes, derive a size
/// hint from each source's aspect, skip unreadable files with a
/// warning.
pub fn build_items(sources: &[PathBuf], spread: &Spread) -> (Vec<Item>, Vec<String>) {
    let mut items = Vec::new();
    let mut names = Vec::new();

    for path in sources {
        let natural = match probe_natural_size(path) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let (w, h) = hint_size(natural, spread);

        let id = items.len() as u64;
        let mut item = Item::new(id, Rect::new(0.0, 0.0, w, h), items.len());
        item.natural = Some(natural);
        item.floor_size();
        items.push(item);
        names.push(path.to_string_lossy().into_owned());
    }

    (items, names)
}

/// Frame size hint for a source: a quarter of the board height tall,
/// width following the source's aspect, then capped into the board's
/// usable interior so a wide panorama never starts out larger than
/// any board can hold.
pub fn hint_size(natural: NaturalSize, spread: &Spread) -> (f64, f64) {
    let spacing = spread.spacing();
    let max_w = (spread.board_w() - 2.0 * spacing).max(MIN_ITEM_SIZE);
    let max_h = (spread.board_h() - 2.0 * spacing).max(MIN_ITEM_SIZE);

    let mut h = (spread.board_h() * HINT_HEIGHT_FRACTION)
        .max(MIN_ITEM_SIZE)
        .min(max_h);
    let mut w = h * natural.aspect();
    if w > max_w {
        h *= max_w / w;
        w = max_w;
    }
    (w.max(MIN_ITEM_SIZE), h.max(MIN_ITEM_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_follows_source_aspect() {
        let spread = Spread::new(3, 1080.0, 1320.0, 24.0).unwrap();
        let (w, h) = hint_size(NaturalSize::new(400, 300), &spread);
        assert_eq!(h, 330.0);
        assert!((w / h - 4.0 / 3.0).abs() < 1e-9);
    }

    // A ~4:1 panorama at the default board would hint wider than the
    // board itself; the hint must shrink to the usable interior.
    #[test]
    fn panorama_hint_fits_board_interior() {
        let spread = Spread::new(3, 1080.0, 1320.0, 24.0).unwrap();
        let (w, h) = hint_size(NaturalSize::new(4000, 1000), &spread);
        assert!(w <= 1080.0 - 2.0 * 24.0, "hint width {} exceeds interior", w);
        assert!((w / h - 4.0).abs() < 1e-9, "aspect must survive the cap");
    }

    #[test]
    fn tiny_board_hint_keeps_minimum_size() {
        let spread = Spread::new(1, 60.0, 60.0, 20.0).unwrap();
        let (w, h) = hint_size(NaturalSize::new(100, 100), &spread);
        assert!(w >= MIN_ITEM_SIZE && h >= MIN_ITEM_SIZE);
        assert!(w <= 60.0 && h <= 60.0);
    }
}
