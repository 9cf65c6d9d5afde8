//! Line-based console transport
//!
//! Each input line is a chat message from one local user. While a god-roll
//! prompt waits on that user, a bare number or keycap line answers it.

use std::future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant};

use crate::bot::{Bot, Message};
use crate::commands::Author;
use crate::error::Result;
use crate::reaction::parse_reaction;

/// Drive `bot` from `input` until it closes, writing replies to `output`.
/// Prompt deadlines are serviced while waiting for input.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub async fn run_console<R, W>(bot: &mut Bot, input: R, mut output: W, user: &Author) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for line in bot.startup_lines() {
        tracing::info!("{line}");
    }

    let mut lines = input.lines();
    loop {
        let deadline = bot.pending_deadline();
        let expired = async {
            match deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("Console input closed");
                    break;
                };
                let replies = handle_line(bot, user, &line);
                write_lines(&mut output, &replies).await?;
            }
            () = expired => {
                if let Some(notice) = bot.on_tick(Instant::now()) {
                    write_lines(&mut output, &[notice]).await?;
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

fn handle_line(bot: &mut Bot, user: &Author, line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    if bot.awaiting_reaction_from() == Some(user.id) && parse_reaction(line).is_some() {
        return bot.on_reaction(user.id, line, Instant::now()).into_iter().collect();
    }
    bot.on_message(&Message::new(user.clone(), line))
}

async fn write_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}
