//! Command execution implementations

use super::Commands;
use super::definitions::ConfigCommands;
use super::{loadout, lookup, run};
use crate::cli::Context;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            Commands::Run { user_id, user_name } => run::execute(ctx, *user_id, user_name).await,
            Commands::Review { link, json } => loadout::review(ctx, link, *json).await,
            Commands::Weapon { query, limit } => lookup::weapon(ctx, query, *limit).await,
            Commands::Status => lookup::status(ctx).await,
            Commands::Decode { link, resolve } => loadout::decode(ctx, link, *resolve).await,
            Commands::Encode { source } => loadout::encode(source),
            Commands::Config { command } => command.execute(ctx),
        }
    }
}

impl ConfigCommands {
    /// Execute the selected config command.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be written.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            ConfigCommands::Show => lookup::show_config(ctx),
            ConfigCommands::Path => lookup::config_path(),
            ConfigCommands::Init { path, force } => lookup::init_config(path.as_deref(), *force),
        }
    }
}
