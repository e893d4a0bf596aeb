//! Folio - data index and export tool for a static works gallery.

mod check;
mod cli;
mod config;
mod data;
mod export;
mod logger;
mod query;

use anyhow::{Context, Result};
use check::check_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use data::SiteIndex;
use export::export_site;
use std::io::stdout;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let index = load_index(&config)?;

    let mut out = stdout();
    match &cli.command {
        Commands::Check { strict } => check_site(&config, &index, *strict),
        Commands::Creators { json } => query::list_creators(&index, *json, &mut out),
        Commands::Works {
            work_type,
            creator,
            json,
        } => query::list_works(&index, work_type.as_deref(), creator.as_deref(), *json, &mut out),
        Commands::Creator { id } => query::show_creator(&index, id, &mut out),
        Commands::Work { id } => query::show_work(&index, id, &mut out),
        Commands::Timeline { json } => query::show_timeline(&index, *json, &mut out),
        Commands::Export { .. } => export_site(&config, &index).map(|_| ()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;
    config.validate()?;
    Ok(config)
}

/// Build the index once; every command borrows it.
fn load_index(config: &SiteConfig) -> Result<SiteIndex> {
    data::load_index(&config.data.works)
        .with_context(|| format!("Failed to load works from {}", config.data.works.display()))
}
