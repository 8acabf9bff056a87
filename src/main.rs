//! Revinject - rewrite placeholder regions with content-versioned asset references.

mod assetmap;
mod cli;
mod config;
mod logger;
mod pipeline;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RevConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = RevConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Run => cli::run::run_files(&config).await,
        Commands::Check => cli::check::check_files(&config).await,
    }
}
