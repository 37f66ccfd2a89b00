//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "storeassets",
    version,
    about = "Generate and validate app store listing assets",
    long_about = "storeassets — generate placeholder store assets, compose the feature graphic, and validate a release-assets tree against the store's size, ratio and count rules.\n\nConfiguration precedence: CLI > storeassets.toml > defaults.",
    after_help = "Examples:\n  storeassets generate\n  storeassets feature --out release-assets/feature-graphic/feature_1024x500.png\n  storeassets validate\n  storeassets validate path/to/release-assets --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for generating and validating assets.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current storeassets version.")]
    Version,
    /// Validate the assets tree against the rule table
    #[command(
        about = "Validate store assets",
        long_about = "Check every category directory for file count, byte size, decodability and dimensions. Exits 1 when any violation is found.",
        after_help = "Examples:\n  storeassets validate\n  storeassets validate release-assets --output json"
    )]
    Validate {
        #[arg(help = "Assets root directory (default: release-assets under the repo root)")]
        root: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Generate placeholder images
    #[command(
        about = "Generate placeholder images",
        long_about = "Write solid-color placeholder PNGs with centered labels for every entry of the placeholder plan.",
        after_help = "Examples:\n  storeassets generate\n  storeassets generate --root /tmp/assets"
    )]
    Generate {
        #[arg(long, help = "Assets root directory (default: release-assets under the repo root)")]
        root: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Compose the 1024x500 feature graphic
    #[command(
        about = "Compose the feature graphic",
        long_about = "Render the 1024x500 feature graphic (grid background, accent bars, title block and code panel) to PNG. Exits 1 when the file exceeds 15 MB.",
        after_help = "Examples:\n  storeassets feature\n  storeassets feature --out banner.png"
    )]
    Feature {
        #[arg(long, help = "Output file (default: <root>/feature-graphic/feature_1024x500.png)")]
        out: Option<String>,
        #[arg(long, help = "Assets root directory (default: release-assets under the repo root)")]
        root: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the effective rule table
    #[command(
        about = "Show rules",
        long_about = "Print the rule table after applying storeassets.toml overrides."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
