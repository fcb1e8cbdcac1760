//! Audit command - re-check a saved layout's invariants.
//!
//! Placement fallbacks are reported, not fatal, so a snapshot on disk
//! may contain overlapping frames. This command re-runs the overlap
//! audit and a bounds check so the damage can be surfaced (and exits
//! non-zero when anything is off, for scripting).

use std::path::Path;
use std::process;

use moodboard::{audit_overlaps, Snapshot};

use super::common::load_snapshot;

/// Execute the audit command.
pub fn cmd_audit(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Usage: moodboard audit <layout.json>");
        process::exit(1);
    };

    let snap = match load_snapshot(Path::new(path)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let problems = audit_snapshot(&snap);
    if problems.is_empty() {
        println!(
            "OK: {} item(s), no overlaps at spacing {}, all within bounds",
            snap.items.len(),
            snap.spread.spacing()
        );
    } else {
        for p in &problems {
            println!("{}", p);
        }
        eprintln!("{} problem(s) found", problems.len());
        process::exit(2);
    }
}

/// Human-readable invariant violations in a snapshot.
pub fn audit_snapshot(snap: &Snapshot) -> Vec<String> {
    let items = snap.restore();
    let spread = snap.spread;
    let mut problems = Vec::new();

    for (a, b) in audit_overlaps(&items, spread.spacing()) {
        problems.push(format!(
            "overlap: items {} and {} violate spacing {}",
            a,
            b,
            spread.spacing()
        ));
    }

    let bounds = spread.bounds();
    for it in &items {
        if it.rect.x < 0.0
            || it.rect.y < 0.0
            || it.rect.right() > bounds.w
            || it.rect.bottom() > bounds.h
        {
            problems.push(format!("out of bounds: item {} at {:?}", it.id, it.rect));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodboard::{Spread, SnapshotItem};

    fn snap(items: Vec<SnapshotItem>) -> Snapshot {
        Snapshot {
            spread: Spread::new(2, 100.0, 100.0, 10.0).unwrap(),
            items,
        }
    }

    fn snap_item(id: u64, x: f64, y: f64, w: f64, h: f64) -> SnapshotItem {
        SnapshotItem { id, source: format!("{}.png", id), x, y, w, h, z: id as usize }
    }

    #[test]
    fn clean_layout_has_no_problems() {
        let s = snap(vec![
            snap_item(0, 10.0, 10.0, 30.0, 30.0),
            snap_item(1, 60.0, 10.0, 30.0, 30.0),
        ]);
        assert!(audit_snapshot(&s).is_empty());
    }

    #[test]
    fn detects_spacing_violation() {
        let s = snap(vec![
            snap_item(0, 10.0, 10.0, 30.0, 30.0),
            snap_item(1, 45.0, 10.0, 30.0, 30.0), // 5 apart, spacing 10
        ]);
        let problems = audit_snapshot(&s);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("overlap"));
    }

    #[test]
    fn detects_out_of_bounds() {
        let s = snap(vec![snap_item(0, 180.0, 10.0, 30.0, 30.0)]);
        let problems = audit_snapshot(&s);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("out of bounds"));
    }
}
