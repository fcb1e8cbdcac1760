//! CLI command implementations.
//!
//! - `layout` - place source photos on a spread and write a snapshot
//! - `export` - rasterize a snapshot into one PNG per board
//! - `audit` - check a snapshot for overlap and bounds violations
//! - `plan` - run a YAML plan (layout + export in one step)
//! - `strategies` - list placement strategies

pub mod audit;
pub mod common;
pub mod export;
pub mod layout;
pub mod plan;

pub use audit::cmd_audit;
pub use export::cmd_export;
pub use layout::cmd_layout;
pub use plan::cmd_plan;
