//! Chat command surface
//!
//! | Command | Argument | Reply |
//! |---------|----------|-------|
//! | `status`, `info` | - | catalog and bot status |
//! | `review` | share link | loadout scorecard |
//! | `weapon` | name | matching weapons with stats |
//! | `godroll` | name | reaction prompt, then recommended perks |
//! | `help` | - | command list |
//! | `hello` | - | greeting |
//! | `ping` | - | handler latency |

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use ishtar::loadout::{LoadoutDecoder, LoadoutRecord};
use ishtar::report::{format_report, format_weapon};
use ishtar::synergy::{AnalysisResult, SynergyEvaluator};
use tokio::time::Instant;

use crate::config::GhostConfig;
use crate::godroll::{GodRollOption, format_god_roll};
use crate::reaction::keycap;
use crate::state::CatalogState;

/// Matches shown by the weapon and godroll commands
pub const SEARCH_LIMIT: usize = 5;

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Review(Option<String>),
    Weapon(Option<String>),
    GodRoll(Option<String>),
    Help,
    Hello,
    Ping,
}

impl Command {
    /// Parse a message. `None` for messages without the prefix and for
    /// unknown commands.
    #[must_use]
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let body = content.trim_start().strip_prefix(prefix)?;
        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body.trim_end(), ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match name.to_lowercase().as_str() {
            "status" | "info" => Some(Self::Status),
            "review" => Some(Self::Review(arg)),
            "weapon" => Some(Self::Weapon(arg)),
            "godroll" => Some(Self::GodRoll(arg)),
            "help" => Some(Self::Help),
            "hello" => Some(Self::Hello),
            "ping" => Some(Self::Ping),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Review(_) => "review",
            Self::Weapon(_) => "weapon",
            Self::GodRoll(_) => "godroll",
            Self::Help => "help",
            Self::Hello => "hello",
            Self::Ping => "ping",
        }
    }
}

/// Author of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

impl Author {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Chat mention markup
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Result of one command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    /// Text that opens a reaction prompt over `options`
    Prompt {
        text: String,
        options: Vec<GodRollOption>,
    },
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Prompt { text, .. } => text,
        }
    }
}

/// Routes commands to the engine
pub struct CommandHandler {
    catalog: CatalogState,
    decoder: Option<LoadoutDecoder>,
    evaluator: SynergyEvaluator,
    config: GhostConfig,
    started: Instant,
    served: u64,
}

impl CommandHandler {
    #[must_use]
    pub fn new(config: GhostConfig, catalog: CatalogState) -> Self {
        let decoder = catalog.catalog().map(|catalog| {
            LoadoutDecoder::new(catalog.clone()).with_hosts(config.sharing_hosts.iter().cloned())
        });
        Self {
            catalog,
            decoder,
            evaluator: SynergyEvaluator::default(),
            config,
            started: Instant::now(),
            served: 0,
        }
    }

    /// Replace the evaluator (custom rule tables)
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: SynergyEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GhostConfig {
        &self.config
    }

    #[must_use]
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Run a command. `received` is when the message arrived.
    pub fn handle(&mut self, command: &Command, author: &Author, received: Instant) -> Reply {
        self.served += 1;
        tracing::info!("{} ran {}", author.name, command.name());

        match command {
            Command::Status => Reply::Text(self.status()),
            Command::Review(link) => Reply::Text(self.review(link.as_deref())),
            Command::Weapon(query) => Reply::Text(self.weapon(query.as_deref())),
            Command::GodRoll(query) => self.god_roll(query.as_deref()),
            Command::Help => Reply::Text(self.help()),
            Command::Hello => Reply::Text(format!("Hello {}!", author.mention())),
            Command::Ping => Reply::Text(format!(
                "Pong! Latency: {}ms",
                received.elapsed().as_millis()
            )),
        }
    }

    /// Reply for a weapon chosen from a god-roll prompt
    #[must_use]
    pub fn god_roll_choice(&self, option: &GodRollOption) -> String {
        format_god_roll(option, self.catalog.catalog().map(AsRef::as_ref))
    }

    fn status(&self) -> String {
        let mut lines = vec![format!("**{} Status**", self.config.bot.name)];
        match &self.catalog {
            CatalogState::Ready(catalog) => {
                lines.push("Catalog: ✅ ready".to_string());
                lines.push(format!("Items: {}", catalog.item_count()));
                if !catalog.version().is_empty() {
                    lines.push(format!("Manifest: {}", catalog.version()));
                }
                lines.push(format!(
                    "Cache age: {} of {}{}",
                    format_duration(catalog.age()),
                    format_duration(catalog.cache_duration()),
                    if catalog.is_stale() { " (stale)" } else { "" }
                ));
            }
            CatalogState::Unavailable(reason) => {
                lines.push(format!("Catalog: ❌ unavailable ({reason})"));
            }
        }
        lines.push(format!("Uptime: {}", format_duration(self.started.elapsed())));
        lines.push(format!("Commands served: {}", self.served));
        lines.join("\n")
    }

    fn review(&self, link: Option<&str>) -> String {
        let Some(link) = link else {
            return format!("Usage: `{}review <DIM loadout link>`", self.config.prefix);
        };
        let Some(decoder) = &self.decoder else {
            return self.unavailable_text();
        };
        let Some(loadout) = decoder.parse(link) else {
            return format!(
                "❌ Could not parse that loadout link. Share a link from {}.",
                self.config.sharing_hosts.join(" or ")
            );
        };

        match analyze_guarded(&self.evaluator, &loadout) {
            Ok(result) => format_report(&result),
            Err(description) => {
                tracing::error!("Analysis failed: {description}");
                format!("Analysis error: {description}")
            }
        }
    }

    fn weapon(&self, query: Option<&str>) -> String {
        let Some(query) = query else {
            return format!("Usage: `{}weapon <name>`", self.config.prefix);
        };
        let Some(catalog) = self.catalog.catalog() else {
            return self.unavailable_text();
        };

        let matches = catalog.search_weapons(query, SEARCH_LIMIT);
        if matches.is_empty() {
            return format!("No weapons found matching \"{query}\".");
        }
        matches
            .iter()
            .map(|entry| format_weapon(catalog, entry))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn god_roll(&self, query: Option<&str>) -> Reply {
        let Some(query) = query else {
            return Reply::Text(format!("Usage: `{}godroll <weapon name>`", self.config.prefix));
        };
        let Some(catalog) = self.catalog.catalog() else {
            return Reply::Text(self.unavailable_text());
        };

        let options: Vec<GodRollOption> = catalog
            .search_weapons(query, SEARCH_LIMIT)
            .into_iter()
            .map(GodRollOption::from_entry)
            .collect();

        match options.len() {
            0 => Reply::Text(format!("No weapons found matching \"{query}\".")),
            1 => Reply::Text(self.god_roll_choice(&options[0])),
            _ => {
                let mut lines = vec!["Which weapon?".to_string()];
                lines.extend(
                    options
                        .iter()
                        .enumerate()
                        .map(|(i, o)| format!("{} {} ({})", keycap(i), o.name, o.weapon_type)),
                );
                lines.push(format!(
                    "React with a number within {}s.",
                    self.config.reaction_timeout_secs
                ));
                Reply::Prompt {
                    text: lines.join("\n"),
                    options,
                }
            }
        }
    }

    fn help(&self) -> String {
        let p = &self.config.prefix;
        [
            "**Commands**".to_string(),
            format!("`{p}review <link>`: review a DIM loadout"),
            format!("`{p}weapon <name>`: look up weapon stats"),
            format!("`{p}godroll <name>`: recommended perks for a weapon"),
            format!("`{p}status` / `{p}info`: catalog and bot status"),
            format!("`{p}hello`: say hello"),
            format!("`{p}ping`: handler latency"),
            format!("`{p}help`: this list"),
        ]
        .join("\n")
    }

    fn unavailable_text(&self) -> String {
        match &self.catalog {
            CatalogState::Unavailable(reason) => {
                format!(
                    "⚠️ The item catalog is unavailable ({reason}). Try `{}status`.",
                    self.config.prefix
                )
            }
            CatalogState::Ready(_) => "⚠️ The item catalog is unavailable.".to_string(),
        }
    }
}

/// Run the evaluator, turning a panic into its message
///
/// # Errors
/// Returns the panic description if evaluation panicked.
pub fn analyze_guarded(
    evaluator: &SynergyEvaluator,
    loadout: &LoadoutRecord,
) -> Result<AnalysisResult, String> {
    panic::catch_unwind(AssertUnwindSafe(|| evaluator.analyze(loadout))).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown error".to_string()
    }
}

/// Compact duration (`1h 5m`, `42s`)
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        secs / 3_600 % 24,
        secs / 60 % 60,
        secs % 60,
    );
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ishtar::manifest::{Catalog, CatalogEntry, ItemCategory};
    use indexmap::IndexMap;

    fn weapon(hash: u32, name: &str, item_type: &str, tier: i32) -> CatalogEntry {
        CatalogEntry {
            hash,
            name: name.to_string(),
            item_type: item_type.to_string(),
            category: ItemCategory::Weapon,
            tier,
            class_type: 3,
            stats: IndexMap::new(),
            damage_type: 3,
            damage_type_hash: None,
            plug_category: String::new(),
            flavor_text: String::new(),
        }
    }

    fn handler() -> CommandHandler {
        let mut catalog = Catalog::empty();
        catalog.insert(weapon(1, "Sunshot", "Hand Cannon", 6));
        catalog.insert(weapon(2, "Sunshot (Adept)", "Hand Cannon", 5));
        catalog.insert(weapon(3, "Palindrome", "Hand Cannon", 5));
        CommandHandler::new(GhostConfig::default(), CatalogState::ready(catalog))
    }

    fn run(handler: &mut CommandHandler, content: &str) -> Reply {
        let command = Command::parse(content, "!").unwrap();
        handler.handle(&command, &Author::new(7, "guardian"), Instant::now())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("!info", "!"), Some(Command::Status));
        assert_eq!(Command::parse("!STATUS  ", "!"), Some(Command::Status));
        assert_eq!(
            Command::parse("!review   https://dim.gg/x ", "!"),
            Some(Command::Review(Some("https://dim.gg/x".to_string())))
        );
        assert_eq!(Command::parse("!weapon", "!"), Some(Command::Weapon(None)));
        assert_eq!(Command::parse("!dance", "!"), None);
        assert_eq!(Command::parse("hello", "!"), None);
        assert_eq!(Command::parse("?ping", "?"), Some(Command::Ping));
    }

    #[test]
    fn test_usage_and_unavailable() {
        let mut handler = handler();
        assert_eq!(run(&mut handler, "!review").text(), "Usage: `!review <DIM loadout link>`");

        let mut offline = CommandHandler::new(
            GhostConfig::default(),
            CatalogState::Unavailable("BUNGIE_API_KEY is not set".to_string()),
        );
        let reply = run(&mut offline, "!weapon sunshot");
        assert!(reply.text().contains("unavailable (BUNGIE_API_KEY is not set)"));
        assert!(run(&mut offline, "!status").text().contains("Catalog: ❌ unavailable"));
    }

    #[test]
    fn test_review_bad_link() {
        let mut handler = handler();
        let reply = run(&mut handler, "!review https://example.com/#abc");
        assert_eq!(
            reply.text(),
            "❌ Could not parse that loadout link. Share a link from dim.gg or destinyitemmanager.com."
        );
    }

    #[test]
    fn test_weapon_lookup() {
        let mut handler = handler();
        let text = run(&mut handler, "!weapon sun").text().to_string();
        assert!(text.starts_with("**Sunshot** (Exotic Hand Cannon, Solar)"));
        assert!(text.contains("**Sunshot (Adept)**"));
        assert_eq!(run(&mut handler, "!weapon zzz").text(), "No weapons found matching \"zzz\".");
    }

    #[test]
    fn test_god_roll_prompt_and_single_match() {
        let mut handler = handler();
        match run(&mut handler, "!godroll sun") {
            Reply::Prompt { text, options } => {
                assert_eq!(options.len(), 2);
                assert!(text.contains("1️⃣ Sunshot (Hand Cannon)"));
                assert!(text.contains("within 60s"));
            }
            other => panic!("expected a prompt, got {other:?}"),
        }
        let single = run(&mut handler, "!godroll palin");
        assert!(single.text().starts_with("🎲 **Palindrome**"));
    }

    #[test]
    fn test_hello_ping_and_counts() {
        let mut handler = handler();
        assert_eq!(run(&mut handler, "!hello").text(), "Hello <@7>!");
        assert!(run(&mut handler, "!ping").text().starts_with("Pong! Latency: "));
        let help = run(&mut handler, "!help").text().to_string();
        assert!(help.contains("`!ping`: handler latency"));
        let status = run(&mut handler, "!status").text().to_string();
        assert!(status.contains("Items: 3"));
        assert!(status.contains("Commands served: 4"));
    }

    #[test]
    fn test_analysis_panic_is_caught() {
        let message = panic_message(Box::new("rule table corrupted"));
        assert_eq!(message, "rule table corrupted");
        let message = panic_message(Box::new(String::from("index out of bounds")));
        assert_eq!(message, "index out of bounds");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3_900)), "1h 5m");
        assert_eq!(format_duration(Duration::from_secs(90_000)), "1d 1h");
    }
}
