//! Catalog loading with console progress

use std::time::Instant;

use crate::cli::Context;
use crate::cli::progress::{SATELLITE, print_done, print_step, print_warning, simple_spinner};
use crate::state::CatalogState;

/// Build the catalog for a command, showing a spinner while it loads.
/// An unavailable catalog is reported but not an error.
pub async fn load(ctx: &Context) -> CatalogState {
    let source = match &ctx.config.manifest.tables_dir {
        Some(dir) => format!("Loading tables from {}...", dir.display()),
        None => "Downloading the Bungie.net manifest...".to_string(),
    };
    print_step(1, 1, SATELLITE, &source);

    let started = Instant::now();
    let pb = simple_spinner("Building item catalog");
    let state = CatalogState::initialize(&ctx.config, ctx.secrets.bungie_api_key.clone()).await;
    pb.finish_and_clear();

    match &state {
        CatalogState::Ready(_) => print_done(started.elapsed()),
        CatalogState::Unavailable(reason) => {
            print_warning(&format!("Item catalog unavailable: {reason}"));
        }
    }
    state
}

/// Like [`load`], but a missing catalog is an error
pub async fn require(ctx: &Context) -> anyhow::Result<std::sync::Arc<ishtar::manifest::Catalog>> {
    match load(ctx).await {
        CatalogState::Ready(catalog) => Ok(catalog),
        CatalogState::Unavailable(reason) => anyhow::bail!("item catalog unavailable: {reason}"),
    }
}
