//! CLI commands for catalog lookups and config files

use std::path::Path;

use ishtar::report::format_weapon;

use super::catalog;
use crate::cli::Context;
use crate::commands::format_duration;
use crate::config::GhostConfig;
use crate::state::CatalogState;

/// Print weapons matching `query`
pub async fn weapon(ctx: &Context, query: &str, limit: usize) -> anyhow::Result<()> {
    let catalog = catalog::require(ctx).await?;
    let matches = catalog.search_weapons(query, limit);
    if matches.is_empty() {
        println!("No weapons found matching \"{query}\".");
        return Ok(());
    }
    for entry in matches {
        println!("{}\n", format_weapon(&catalog, entry));
    }
    Ok(())
}

/// Print catalog status
pub async fn status(ctx: &Context) -> anyhow::Result<()> {
    let state = catalog::load(ctx).await;
    println!("Catalog: {}", state.describe());
    if let CatalogState::Ready(catalog) = &state {
        println!(
            "Fetched: {} (cache {}{})",
            catalog.fetched_at().format("%Y-%m-%d %H:%M UTC"),
            format_duration(catalog.cache_duration()),
            if catalog.is_stale() { ", stale" } else { "" }
        );
    }
    Ok(())
}

pub fn show_config(ctx: &Context) -> anyhow::Result<()> {
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

pub fn config_path() -> anyhow::Result<()> {
    match GhostConfig::default_path() {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("no config directory on this platform"),
    }
    Ok(())
}

/// Write a default config file
pub fn init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => GhostConfig::default_path()
            .ok_or_else(|| anyhow::anyhow!("no config directory on this platform"))?,
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, GhostConfig::default().to_toml()?)?;
    println!("Wrote {}", path.display());
    Ok(())
}
