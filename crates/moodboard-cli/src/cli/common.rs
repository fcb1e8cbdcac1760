//! Common utilities shared across CLI commands.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use moodboard::{NaturalSize, Snapshot};

/// Extensions accepted as photo sources.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Collect source image paths from a list of files and/or directories.
/// Directories are scanned one level deep; results are sorted for
/// stable item ids across runs.
pub fn collect_sources(inputs: &[String]) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut sources = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            for entry in fs::read_dir(path)? {
                let p = entry?.path();
                if p.is_file() && has_image_extension(&p) {
                    sources.push(p);
                }
            }
        } else if path.is_file() {
            sources.push(path.to_path_buf());
        } else {
            return Err(format!("no such file or directory: {}", input).into());
        }
    }
    sources.sort();
    sources.dedup();
    Ok(sources)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read a source's true pixel size from its header without decoding
/// the full image.
pub fn probe_natural_size(path: &Path) -> Result<NaturalSize, Box<dyn Error>> {
    let (w, h) = image::image_dimensions(path)?;
    if w == 0 || h == 0 {
        return Err(format!("{}: degenerate image size {}x{}", path.display(), w, h).into());
    }
    Ok(NaturalSize::new(w, h))
}

/// Load a snapshot from a JSON file. Spread validation happens inside
/// deserialization, so a bad config fails here, not mid-export.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn Error>> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let snap: Snapshot = serde_json::from_str(&data)
        .map_err(|e| format!("{} is not a valid layout: {}", path.display(), e))?;
    Ok(snap)
}

/// Write a snapshot as pretty JSON.
pub fn save_snapshot(snap: &Snapshot, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(snap)?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    Ok(())
}

/// Resolve a snapshot item's source reference against the snapshot's
/// own directory.
pub fn resolve_source(snapshot_path: &Path, source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(p)
    }
}

/// Parse a `WxH` board size argument, e.g. `1080x1320`.
pub fn parse_board_size(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let w: f64 = w.trim().parse().ok()?;
    let h: f64 = h.trim().parse().ok()?;
    if w > 0.0 && h > 0.0 {
        Some((w, h))
    } else {
        None
    }
}

/// Parse an `RRGGBB` hex background color.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_size_parses() {
        assert_eq!(parse_board_size("1080x1320"), Some((1080.0, 1320.0)));
        assert_eq!(parse_board_size("100X50.5"), Some((100.0, 50.5)));
        assert_eq!(parse_board_size("0x100"), None);
        assert_eq!(parse_board_size("wide"), None);
    }

    #[test]
    fn hex_color_parses() {
        assert_eq!(parse_hex_color("ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#102030"), Some([16, 32, 48]));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("fff"), None);
    }

    #[test]
    fn image_extension_filter() {
        assert!(has_image_extension(Path::new("a.JPG")));
        assert!(has_image_extension(Path::new("b.webp")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("noext")));
    }

    #[test]
    fn relative_sources_resolve_next_to_snapshot() {
        let p = resolve_source(Path::new("/tmp/out/layout.json"), "img/a.png");
        assert_eq!(p, PathBuf::from("/tmp/out/img/a.png"));
        let abs = resolve_source(Path::new("/tmp/out/layout.json"), "/data/a.png");
        assert_eq!(abs, PathBuf::from("/data/a.png"));
    }
}
