//! Plan command - declarative layout + export from a YAML file.
//!
//! A plan bundles the spread config, strategy, sources, and output
//! options so a board set can be regenerated with one command:
//!
//! ```yaml
//! name: lookbook
//! spread:
//!   board_count: 3
//!   board_w: 1080
//!   board_h: 1320
//!   spacing: 24
//! strategy: masonry
//! seed: 42
//! sources:
//!   - photos/
//! output:
//!   dir: boards
//!   scale: 2.0
//!   background: "f4f1ec"
//! ```

use std::path::{Path, PathBuf};
use std::process;

use serde::Deserialize;

use moodboard::{PlacePolicy, Snapshot, Spread, Strategy};

use super::common::{collect_sources, parse_hex_color, save_snapshot};
use super::export::run_export;
use super::layout;

/// A complete plan file.
#[derive(Debug, Deserialize)]
pub struct Plan {
    /// Plan name, used for the default output directory.
    pub name: String,

    /// Spread configuration (validated on parse).
    pub spread: Spread,

    /// Strategy name, as accepted by `Strategy::from_name`.
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// RNG seed; omit for a random layout each run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Source files and/or directories.
    pub sources: Vec<String>,

    /// Output options.
    #[serde(default)]
    pub output: OutputOptions,
}

fn default_strategy() -> String {
    "scatter".to_string()
}

/// Output section of a plan.
#[derive(Debug, Deserialize)]
pub struct OutputOptions {
    /// Output directory (default: the plan name).
    #[serde(default)]
    pub dir: Option<String>,

    /// Uniform output scale applied to destination geometry.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Background fill as RRGGBB hex.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_scale() -> f64 {
    1.0
}

fn default_background() -> String {
    "ffffff".to_string()
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: None,
            scale: default_scale(),
            background: default_background(),
        }
    }
}

/// Execute the plan command.
pub fn cmd_plan(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Usage: moodboard plan <plan.yaml>");
        process::exit(1);
    };

    let plan = match load_plan(Path::new(path)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let strategy = Strategy::from_name(&plan.strategy).unwrap_or_else(|| {
        eprintln!("Unknown strategy in plan: {}", plan.strategy);
        process::exit(1);
    });
    let background = parse_hex_color(&plan.output.background).unwrap_or_else(|| {
        eprintln!("Invalid background color in plan: {}", plan.output.background);
        process::exit(1);
    });
    if plan.output.scale <= 0.0 {
        eprintln!("Output scale must be positive, got {}", plan.output.scale);
        process::exit(1);
    }

    let sources = collect_sources(&plan.sources).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    if sources.is_empty() {
        eprintln!("Plan has no usable image sources.");
        process::exit(1);
    }

    let out_dir = PathBuf::from(plan.output.dir.clone().unwrap_or_else(|| plan.name.clone()));
    let seed = plan.seed.unwrap_or_else(rand::random::<u64>);

    let (mut items, names) = layout::build_items(&sources, &plan.spread);
    let mut rng = moodboard::rng::Rng::new(seed);
    let report = strategy.place(&mut items, &plan.spread, &PlacePolicy::default(), &mut rng);
    if !report.is_clean() {
        eprintln!(
            "Warning: {} item(s) placed via fallback: {:?}",
            report.fallbacks.len(),
            report.fallbacks
        );
    }

    let snap = Snapshot::capture(plan.spread, &items, |id| names[id as usize].clone());
    let snapshot_path = out_dir.join("layout.json");
    if let Err(e) = std::fs::create_dir_all(&out_dir).map_err(Into::into).and_then(|_| save_snapshot(&snap, &snapshot_path)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    match run_export(&snapshot_path, &out_dir, plan.output.scale, background) {
        Ok(count) => println!(
            "Plan '{}': {} item(s), {} board(s) (seed {}) -> {}",
            plan.name,
            items.len(),
            count,
            seed,
            out_dir.display()
        ),
        Err(e) => {
            eprintln!("Export failed: {}", e);
            process::exit(1);
        }
    }
}

/// Load and parse a plan file.
pub fn load_plan(path: &Path) -> Result<Plan, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let plan: Plan = serde_yaml::from_str(&data)
        .map_err(|e| format!("{} is not a valid plan: {}", path.display(), e))?;
    Ok(plan)
}
