//! CLI commands for share links and loadout reviews

use std::io::Read;
use std::path::Path;

use ishtar::loadout::{LoadoutDecoder, decode_link, share_link};
use ishtar::report::format_report;
use ishtar::synergy::SynergyEvaluator;

use super::catalog;
use crate::cli::Context;
use crate::cli::progress::{LINK, print_step};
use crate::commands::analyze_guarded;

fn hosts(ctx: &Context) -> Vec<&str> {
    ctx.config.sharing_hosts.iter().map(String::as_str).collect()
}

/// Review a share link and print the scorecard (or JSON)
pub async fn review(ctx: &Context, link: &str, json: bool) -> anyhow::Result<()> {
    let catalog = catalog::require(ctx).await?;
    let decoder = LoadoutDecoder::new(catalog).with_hosts(ctx.config.sharing_hosts.iter().cloned());

    let loadout = decoder.decode(link)?;
    let result = analyze_guarded(&SynergyEvaluator::default(), &loadout)
        .map_err(|description| anyhow::anyhow!("Analysis error: {description}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_report(&result));
    }
    Ok(())
}

/// Print the payload behind a share link, optionally resolved to a loadout
pub async fn decode(ctx: &Context, link: &str, resolve: bool) -> anyhow::Result<()> {
    print_step(1, 1, LINK, "Decoding share link...");
    let payload = decode_link(link, &hosts(ctx))?;

    if resolve {
        let catalog = catalog::require(ctx).await?;
        let record = LoadoutDecoder::new(catalog).resolve(&payload)?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(())
}

/// Build a share link from a payload file (`-` reads stdin)
pub fn encode(source: &Path) -> anyhow::Result<()> {
    let text = if source == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(source)?
    };

    let payload: serde_json::Value = serde_json::from_str(&text)?;
    println!("{}", share_link(&payload)?);
    Ok(())
}
