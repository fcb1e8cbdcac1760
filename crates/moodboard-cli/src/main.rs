//! moodboard - CLI for photo board layout and export
//!
//! Usage:
//!   moodboard layout <files|dirs> [options]   Place photos, write layout.json
//!   moodboard export <layout.json> [options]  Rasterize one PNG per board
//!   moodboard audit <layout.json>             Check a layout's invariants
//!   moodboard plan <plan.yaml>                Run a declarative plan
//!   moodboard strategies                      List placement strategies

use std::env;
use std::process;

use moodboard::Strategy;

mod cli;

use cli::{cmd_audit, cmd_export, cmd_layout, cmd_plan};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "layout" => cmd_layout(&args[2..]),
        "export" => cmd_export(&args[2..]),
        "audit" => cmd_audit(&args[2..]),
        "plan" => cmd_plan(&args[2..]),
        "strategies" => cmd_strategies(),
        "help" | "-h" | "--help" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn cmd_strategies() {
    println!("Available placement strategies:\n");
    for s in Strategy::all() {
        println!("  {:<18} {}", s.name(), s.describe());
    }
}

fn print_usage() {
    println!("moodboard - photo board layout and export");
    println!();
    println!("Commands:");
    println!("  layout <files|dirs>   Place photos on a spread, write a layout snapshot");
    println!("      -s, --strategy <name>    Placement strategy (default: scatter)");
    println!("      --boards <n>             Board count, 1-20 (default: 3)");
    println!("      --board-size <WxH>       Board size (default: 1080x1320)");
    println!("      --spacing <n>            Minimum gap between items (default: 24)");
    println!("      --seed <n>               RNG seed for a reproducible layout");
    println!("      -o, --output <file>      Snapshot path (default: layout.json)");
    println!("  export <layout.json>  Rasterize the layout, one PNG per board");
    println!("      --scale <f>              Output scale factor (default: 1.0)");
    println!("      --out <dir>              Output directory (default: timestamped)");
    println!("      --background <RRGGBB>    Background fill (default: ffffff)");
    println!("  audit <layout.json>   Re-check overlap and bounds invariants");
    println!("  plan <plan.yaml>      Layout + export from a declarative plan");
    println!("  strategies            List placement strategies");
}
