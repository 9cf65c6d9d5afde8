//! Ghost CLI - run the bot on the console or query the engine directly

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::{GhostConfig, Secrets};

#[derive(Parser)]
#[command(name = "ghost")]
#[command(
    about = "Ghost: Destiny 2 loadout reviews, weapon lookup and god rolls",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/ghost/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load definition tables from a directory instead of Bungie.net
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand
pub struct Context {
    pub config: GhostConfig,
    pub secrets: Secrets,
}

/// Run the Ghost CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = GhostConfig::load(cli.config.as_deref())?;
    if let Some(tables) = cli.tables {
        config.manifest.tables_dir = Some(tables);
    }
    let context = Context {
        config,
        secrets: Secrets::from_env(),
    };
    tracing::debug!("Secrets: {:?}", context.secrets);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(cli.command.execute(&context))
}
