//! Run the bot over stdin/stdout

use tokio::io::{self, BufReader};

use super::catalog;
use crate::bot::Bot;
use crate::cli::Context;
use crate::commands::Author;
use crate::config::DISCORD_TOKEN_VAR;
use crate::console::run_console;

pub async fn execute(ctx: &Context, user_id: u64, user_name: &str) -> anyhow::Result<()> {
    let state = catalog::load(ctx).await;

    if ctx.secrets.discord_token.is_some() {
        tracing::info!("{DISCORD_TOKEN_VAR} is set; serving the console transport");
    }

    let mut bot = Bot::new(ctx.config.clone(), state);
    let user = Author::new(user_id, user_name);
    run_console(&mut bot, BufReader::new(io::stdin()), io::stdout(), &user).await?;

    tracing::info!("Served {} commands", bot.handler().served());
    Ok(())
}
