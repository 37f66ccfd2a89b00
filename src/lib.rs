//! storeassets core library.
//!
//! This crate exposes programmatic APIs for generating placeholder store
//! assets, composing the feature graphic, and validating an assets tree
//! against a per-category rule table.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `validate`: Directory scan producing a `ValidationReport`.
//! - `checks`: Pure rule checks (count, bytes, exact size, ratio, sides).
//! - `generate`: Placeholder PNG generation.
//! - `feature`: Feature graphic composition.
//! - `draw` / `fonts`: Canvas primitives and text rasterization.
//! - `models`: Rule table, placeholder plan, violations and reports.
//! - `output`: Human/JSON printers.
//! - `utils`: Console prefixes and path display.
pub mod checks;
pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod feature;
pub mod fonts;
pub mod generate;
pub mod models;
pub mod output;
pub mod utils;
pub mod validate;

pub use error::{AssetError, Result};
pub use models::rules::{AssetRule, RuleShape, RuleTable};
pub use models::{ValidationReport, Violation, ViolationKind};
pub use validate::run_validate;
