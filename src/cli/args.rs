//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Revinject asset revision injector CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: revinject.toml)
    #[arg(short = 'C', long, default_value = "revinject.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show per-region resolution details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite all configured files with versioned asset references
    #[command(visible_alias = "r")]
    Run,

    /// Scan configured files and report regions without writing output
    #[command(visible_alias = "c")]
    Check,
}
