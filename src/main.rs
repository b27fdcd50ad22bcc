//! Lantern - A static site generator for template-driven blogs.

mod cli;
mod compiler;
mod config;
mod data;
mod docs;
mod generator;
mod logger;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{
    Cli, Commands,
    build::{build_site, write_artifacts},
};
use config::SiteConfig;
use utils::plural::plural_count;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config),
        Commands::Query { args } => cli::query::run_query(args, &config),
    }
}

/// Build in memory, then write everything in one go.
fn build_all(config: &SiteConfig) -> Result<()> {
    let site = build_site(config)?;
    write_artifacts(&config.build.output, &site.artifacts, config.build.clean)?;
    log!("build"; "done, {}", plural_count(site.posts.len(), "post"));
    Ok(())
}
