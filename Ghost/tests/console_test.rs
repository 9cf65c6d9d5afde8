//! End-to-end console sessions against an in-memory catalog

use std::time::Duration;

use ghost::config::AlertRule;
use ghost::console::run_console;
use ghost::ishtar::manifest::{Catalog, CatalogEntry, ItemCategory};
use ghost::{Author, Bot, CatalogState, GhostConfig};
use indexmap::IndexMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

fn weapon(hash: u32, name: &str, item_type: &str) -> CatalogEntry {
    CatalogEntry {
        hash,
        name: name.to_string(),
        item_type: item_type.to_string(),
        category: ItemCategory::Weapon,
        tier: 5,
        class_type: 3,
        stats: IndexMap::new(),
        damage_type: 4,
        damage_type_hash: None,
        plug_category: String::new(),
        flavor_text: String::new(),
    }
}

fn bot(config: GhostConfig) -> Bot {
    let mut catalog = Catalog::empty();
    catalog.insert(weapon(10, "Palindrome", "Hand Cannon"));
    catalog.insert(weapon(11, "Palmyra-B", "Rocket Launcher"));
    catalog.insert(weapon(12, "Funnelweb", "Submachine Gun"));
    Bot::new(config, CatalogState::ready(catalog))
}

/// Feed `input` to a console session, keep stdin open for `hold`, return
/// everything the bot wrote.
async fn session(mut bot: Bot, input: &str, hold: Duration) -> String {
    let (mut input_tx, input_rx) = tokio::io::duplex(64 * 1024);
    let (output_tx, mut output_rx) = tokio::io::duplex(64 * 1024);
    let user = Author::new(42, "tester");

    let writer = async move {
        input_tx.write_all(input.as_bytes()).await.unwrap();
        tokio::time::sleep(hold).await;
        drop(input_tx);
    };
    let (result, ()) = tokio::join!(
        run_console(&mut bot, BufReader::new(input_rx), output_tx, &user),
        writer
    );
    result.unwrap();

    let mut out = String::new();
    output_rx.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test(start_paused = true)]
async fn test_godroll_prompt_times_out() {
    let out = session(
        bot(GhostConfig::default()),
        "!godroll pal\n",
        Duration::from_secs(120),
    )
    .await;

    assert!(out.contains("Which weapon?"));
    assert!(out.contains("1️⃣ Palindrome (Hand Cannon)"));
    assert!(out.contains("2️⃣ Palmyra-B (Rocket Launcher)"));
    assert!(
        out.trim_end()
            .ends_with("⏰ No selection made within 60s. Run `!godroll` again to retry.")
    );
}

#[tokio::test(start_paused = true)]
async fn test_godroll_prompt_answered() {
    let out = session(
        bot(GhostConfig::default()),
        "!godroll pal\n2\n",
        Duration::from_secs(1),
    )
    .await;

    assert!(out.contains("🎲 **Palmyra-B** (Rocket Launcher)"));
    assert!(out.contains("PvE: Reconstruction + Bait and Switch"));
    assert!(!out.contains("No selection made"));
}

#[tokio::test(start_paused = true)]
async fn test_reaction_past_deadline_is_ignored() {
    let mut config = GhostConfig::default();
    config.reaction_timeout_secs = 5;
    let mut bot = bot(config);
    let user = Author::new(42, "tester");

    let (mut input_tx, input_rx) = tokio::io::duplex(1024);
    let (output_tx, mut output_rx) = tokio::io::duplex(64 * 1024);
    let writer = async move {
        input_tx.write_all(b"!godroll pal\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        input_tx.write_all(b"1\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
    };
    let (result, ()) = tokio::join!(
        run_console(&mut bot, BufReader::new(input_rx), output_tx, &user),
        writer
    );
    result.unwrap();

    let mut out = String::new();
    output_rx.read_to_string(&mut out).await.unwrap();
    assert!(out.contains("No selection made within 5s"));
    assert!(!out.contains("🎲"));
}

#[tokio::test]
async fn test_greeting_ping_and_alerts() {
    let mut config = GhostConfig::default();
    config.alerts.push(AlertRule {
        author_id: 42,
        message: "🚨 Alert 🚨".to_string(),
    });
    let out = session(bot(config), "!hello\n!ping\n!nope\n", Duration::ZERO).await;
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "🚨 Alert 🚨");
    assert_eq!(lines[1], "Hello <@42>!");
    assert_eq!(lines[2], "🚨 Alert 🚨");
    assert!(lines[3].starts_with("Pong! Latency: "));
    // unknown command: alert only
    assert_eq!(lines[4], "🚨 Alert 🚨");
    assert_eq!(lines.len(), 5);
}

#[tokio::test]
async fn test_weapon_and_status() {
    let out = session(bot(GhostConfig::default()), "!weapon funnel\n!info\n", Duration::ZERO).await;

    assert!(out.contains("**Funnelweb** (Legendary Submachine Gun, Void)"));
    assert!(out.contains("Items: 3"));
    assert!(out.contains("Commands served: 2"));
}

#[tokio::test]
async fn test_unavailable_catalog_still_answers() {
    let bot = Bot::new(
        GhostConfig::default(),
        CatalogState::Unavailable("BUNGIE_API_KEY is not set".to_string()),
    );
    let out = session(bot, "!review https://dim.gg/abc\n!hello\n", Duration::ZERO).await;

    assert!(out.contains("The item catalog is unavailable (BUNGIE_API_KEY is not set)"));
    assert!(out.contains("Hello <@42>!"));
}
