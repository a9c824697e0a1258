//! Command-line argument definitions.

use crate::formatting::ColorMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Structural diff for RBS-style type signature files.
///
/// Compares an original (hand-written) signature file against a generated
/// one, or every signature file of two directory trees with `--dir`. Exits
/// with status 0 only when no differences are found.
#[derive(Parser, Debug, Clone)]
#[command(name = "sigcompare", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Original signature file (a directory with --dir)
    #[arg(value_name = "ORIGINAL")]
    pub original: PathBuf,

    /// Generated signature file (a directory with --dir)
    #[arg(value_name = "GENERATED")]
    pub generated: PathBuf,

    /// Compare every signature file under two directories
    #[arg(long)]
    pub dir: bool,

    /// Treat parameter names as significant, not just their types
    #[arg(long)]
    pub strict_param_names: bool,

    /// Treat `A | B` and `B | A` as the same type
    #[arg(long)]
    pub normalize_unions: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Only list files that fail
    #[arg(short, long)]
    pub quiet: bool,

    /// File extension to compare in directory mode (repeatable)
    #[arg(long = "ext", value_name = "EXT", action = ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Glob of relative paths to skip in directory mode (repeatable)
    #[arg(long, value_name = "GLOB", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// ASCII-only output without colors
    #[arg(long)]
    pub plain: bool,

    /// Worker threads for directory mode (0 = one per CPU)
    #[arg(short, long, default_value_t = 0, env = "SIGCOMPARE_JOBS")]
    pub jobs: usize,

    /// Configuration file (default: nearest .sigcompare.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shell command that regenerates the generated side before comparing
    #[arg(long, value_name = "COMMAND")]
    pub generate: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
