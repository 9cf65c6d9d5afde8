//! Message and reaction routing
//!
//! [`Bot`] is transport-agnostic: a chat gateway (or the local console)
//! feeds it messages, reactions and clock ticks and sends back whatever
//! lines it returns.

use tokio::time::Instant;

use crate::commands::{Author, Command, CommandHandler, Reply};
use crate::config::GhostConfig;
use crate::godroll::GodRollOption;
use crate::reaction::ReactionFlow;
use crate::state::CatalogState;

/// An incoming chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub author: Author,
    pub content: String,
    pub received: Instant,
}

impl Message {
    #[must_use]
    pub fn new(author: Author, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            received: Instant::now(),
        }
    }
}

pub struct Bot {
    handler: CommandHandler,
    flow: ReactionFlow<GodRollOption>,
    /// Author allowed to answer the open prompt
    prompt_owner: Option<u64>,
}

impl Bot {
    #[must_use]
    pub fn new(config: GhostConfig, catalog: CatalogState) -> Self {
        let flow = ReactionFlow::new(config.reaction_timeout());
        Self {
            handler: CommandHandler::new(config, catalog),
            flow,
            prompt_owner: None,
        }
    }

    #[must_use]
    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    #[must_use]
    pub fn config(&self) -> &GhostConfig {
        self.handler.config()
    }

    /// Lines to print once the bot is up
    #[must_use]
    pub fn startup_lines(&self) -> Vec<String> {
        let config = self.config();
        vec![
            format!("{} is online (prefix `{}`)", config.bot.name, config.prefix),
            format!("Item catalog: {}", self.handler.catalog().describe()),
        ]
    }

    /// Handle a message. Alert lines for the author come first, then the
    /// command reply. The bot's own messages are ignored.
    pub fn on_message(&mut self, message: &Message) -> Vec<String> {
        let config = self.handler.config();
        if config.bot.user_id != 0 && message.author.id == config.bot.user_id {
            return Vec::new();
        }

        let mut out: Vec<String> = config
            .alerts_for(message.author.id)
            .map(ToString::to_string)
            .collect();

        let Some(command) = Command::parse(&message.content, &config.prefix) else {
            return out;
        };

        match self.handler.handle(&command, &message.author, message.received) {
            Reply::Text(text) => out.push(text),
            Reply::Prompt { text, options } => {
                if self.flow.start(options, message.received) {
                    tracing::debug!("Replaced an open god-roll prompt");
                }
                self.prompt_owner = Some(message.author.id);
                out.push(text);
            }
        }
        out
    }

    /// Handle a reaction on the open prompt. Only the author who opened the
    /// prompt can answer it. Past the deadline the reply is the timeout
    /// notice.
    pub fn on_reaction(&mut self, user_id: u64, reaction: &str, now: Instant) -> Option<String> {
        if self.prompt_owner != Some(user_id) {
            return None;
        }
        // a late answer closes the prompt with the timeout notice
        if let Some(notice) = self.on_tick(now) {
            return Some(notice);
        }
        let (_, option) = self.flow.on_reaction(reaction, now)?;
        self.prompt_owner = None;
        tracing::info!("God roll chosen: {}", option.name);
        Some(self.handler.god_roll_choice(&option))
    }

    /// Advance the clock. Returns the timeout notice when a prompt expires.
    pub fn on_tick(&mut self, now: Instant) -> Option<String> {
        if !self.flow.on_tick(now) {
            return None;
        }
        self.prompt_owner = None;
        Some(format!(
            "⏰ No selection made within {}s. Run `{}godroll` again to retry.",
            self.flow.timeout().as_secs(),
            self.config().prefix
        ))
    }

    /// When the open prompt expires
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.flow.deadline()
    }

    /// Author the open prompt waits on
    #[must_use]
    pub fn awaiting_reaction_from(&self) -> Option<u64> {
        self.prompt_owner.filter(|_| self.flow.is_awaiting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlertRule;
    use ishtar::manifest::{Catalog, CatalogEntry, ItemCategory};
    use std::time::Duration;

    fn hand_cannon(hash: u32, name: &str) -> CatalogEntry {
        CatalogEntry {
            hash,
            name: name.to_string(),
            item_type: "Hand Cannon".to_string(),
            category: ItemCategory::Weapon,
            tier: 5,
            class_type: 3,
            stats: indexmap::IndexMap::new(),
            damage_type: 1,
            damage_type_hash: None,
            plug_category: String::new(),
            flavor_text: String::new(),
        }
    }

    fn bot(config: GhostConfig) -> Bot {
        let mut catalog = Catalog::empty();
        catalog.insert(hand_cannon(1, "Palindrome"));
        catalog.insert(hand_cannon(2, "Palmyra-B"));
        Bot::new(config, CatalogState::ready(catalog))
    }

    fn from(id: u64, content: &str) -> Message {
        Message::new(Author::new(id, "guardian"), content)
    }

    #[test]
    fn test_alerts_precede_reply() {
        let mut config = GhostConfig::default();
        config.alerts.push(AlertRule {
            author_id: 9,
            message: "🚨 Alert 🚨".to_string(),
        });
        let mut bot = bot(config);

        assert_eq!(bot.on_message(&from(9, "!hello")), vec!["🚨 Alert 🚨", "Hello <@9>!"]);
        assert_eq!(bot.on_message(&from(9, "just chatting")), vec!["🚨 Alert 🚨"]);
        assert!(bot.on_message(&from(3, "just chatting")).is_empty());
    }

    #[test]
    fn test_ignores_itself() {
        let mut config = GhostConfig::default();
        config.bot.user_id = 100;
        let mut bot = bot(config);
        assert!(bot.on_message(&from(100, "!ping")).is_empty());
    }

    #[test]
    fn test_prompt_owner_only() {
        let mut bot = bot(GhostConfig::default());
        let message = from(5, "!godroll pal");
        let lines = bot.on_message(&message);
        assert!(lines[0].starts_with("Which weapon?"));
        assert_eq!(bot.awaiting_reaction_from(), Some(5));

        assert_eq!(bot.on_reaction(6, "1️⃣", message.received), None);
        let reply = bot.on_reaction(5, "2️⃣", message.received).unwrap();
        assert!(reply.starts_with("🎲 **Palmyra-B** (Hand Cannon)"));
        assert_eq!(bot.awaiting_reaction_from(), None);
        assert_eq!(bot.pending_deadline(), None);
    }

    #[test]
    fn test_prompt_timeout_notice() {
        let mut bot = bot(GhostConfig::default());
        let message = from(5, "!godroll pal");
        bot.on_message(&message);
        let deadline = bot.pending_deadline().unwrap();
        assert_eq!(deadline, message.received + Duration::from_secs(60));

        assert_eq!(bot.on_tick(message.received), None);
        assert_eq!(
            bot.on_tick(deadline).as_deref(),
            Some("⏰ No selection made within 60s. Run `!godroll` again to retry.")
        );
        assert_eq!(bot.on_reaction(5, "1", deadline), None);
    }

    #[test]
    fn test_late_reaction_gets_timeout_notice() {
        let mut bot = bot(GhostConfig::default());
        let message = from(5, "!godroll pal");
        bot.on_message(&message);
        let late = bot.pending_deadline().unwrap() + Duration::from_secs(1);

        assert_eq!(
            bot.on_reaction(5, "1", late).as_deref(),
            Some("⏰ No selection made within 60s. Run `!godroll` again to retry.")
        );
        assert_eq!(bot.awaiting_reaction_from(), None);
        assert_eq!(bot.on_tick(late), None);
        assert_eq!(bot.on_reaction(5, "1", late), None);
    }
}
