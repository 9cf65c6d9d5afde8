//! Text rendering of analyses and catalog entries
//!
//! Output is chat-flavoured Markdown: bold section headings, one bullet per
//! line. Rendering is pure; the same input always gives the same text.

use std::fmt::Write as _;

use crate::loadout::CharacterClass;
use crate::manifest::{Catalog, CatalogEntry};
use crate::synergy::{AnalysisResult, WeaponAnalysis};

/// Width of a stat bar in cells
pub const BAR_WIDTH: usize = 10;
const MAX_RATING: u8 = 10;

/// Qualitative label for a rating
#[must_use]
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        8.. => "Excellent",
        6..=7 => "Good",
        4..=5 => "Needs Work",
        _ => "Poor",
    }
}

/// Ten-star strip with `rating` stars filled
#[must_use]
pub fn stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING);
    let mut out = "★".repeat(usize::from(filled));
    out.push_str(&"☆".repeat(usize::from(MAX_RATING - filled)));
    out
}

/// Bar for a 0-100 stat, one cell per tier
#[must_use]
pub fn stat_bar(value: i32) -> String {
    let filled = usize::try_from(value / 10).unwrap_or(0).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render a full scorecard
#[must_use]
pub fn format_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let title = result.loadout_name.as_deref().unwrap_or("Loadout Review");
    let _ = writeln!(out, "**{title}**");
    if let Some(line) = identity_line(result) {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(
        out,
        "Rating: {} {}/{MAX_RATING} ({})",
        stars(result.rating),
        result.rating,
        rating_label(result.rating)
    );

    if !result.weapons.is_empty() {
        section(&mut out, "Weapons");
        for weapon in &result.weapons {
            let _ = writeln!(out, "{}", weapon_line(weapon));
        }
    }

    if !result.armor.is_empty() {
        section(&mut out, "Armor");
        for piece in &result.armor {
            let _ = writeln!(
                out,
                "• {}: {}{} (total {})",
                piece.slot.as_str(),
                piece.name,
                if piece.is_exotic { " [Exotic]" } else { "" },
                piece.total_stats
            );
        }
    }

    if !result.stats.is_empty() {
        section(&mut out, "Stats");
        let width = result.stats.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (stat, value) in &result.stats {
            let _ = writeln!(
                out,
                "`{stat:<width$}` {} {value} (tier {})",
                stat_bar(*value),
                value / 10
            );
        }
    }

    if !result.elements.is_empty() {
        section(&mut out, "Element Distribution");
        for (element, count) in &result.elements {
            let _ = writeln!(out, "• {element}: {count}");
        }
    }

    bullets(&mut out, "Exotics", "•", &result.exotics);
    bullets(&mut out, "Synergies", "✅", &result.synergies);
    bullets(&mut out, "Weaknesses", "⚠️", &result.weaknesses);
    bullets(&mut out, "Suggestions", "💡", &result.suggestions);

    out.trim_end().to_string()
}

/// Render one weapon for the lookup command
#[must_use]
pub fn format_weapon(catalog: &Catalog, entry: &CatalogEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "**{}** ({} {}, {})",
        entry.name,
        entry.tier_name(),
        entry.item_type,
        catalog.element_of(entry)
    );

    let stats = catalog.weapon_stats(entry);
    if stats.is_empty() {
        let _ = writeln!(out, "No stat data");
    } else {
        let listed: Vec<String> = stats
            .iter()
            .map(|(name, value)| format!("{name} {value}"))
            .collect();
        let _ = writeln!(out, "{}", listed.join(" · "));
    }

    if !entry.flavor_text.is_empty() {
        let _ = writeln!(out, "_{}_", entry.flavor_text.trim());
    }
    out.trim_end().to_string()
}

fn identity_line(result: &AnalysisResult) -> Option<String> {
    let mut parts = Vec::new();
    if result.class != CharacterClass::Unknown {
        parts.push(result.class.to_string());
    }
    if let Some(subclass) = &result.subclass {
        if result.subclass_element.is_known() {
            parts.push(format!("{subclass} ({})", result.subclass_element));
        } else {
            parts.push(subclass.clone());
        }
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn weapon_line(weapon: &WeaponAnalysis) -> String {
    let mut line = format!("• {}: {} ({}", weapon.slot.as_str(), weapon.name, weapon.weapon_type);
    if weapon.element.is_known() {
        let _ = write!(line, ", {}", weapon.element);
    }
    line.push(')');
    if weapon.is_exotic {
        line.push_str(" [Exotic]");
    }
    if !weapon.notable_stats.is_empty() {
        let notable: Vec<String> = weapon
            .notable_stats
            .iter()
            .map(|s| format!("{} {} ({})", s.name, s.value, s.grade.as_str()))
            .collect();
        let _ = write!(line, "\n  {}", notable.join(", "));
    }
    line
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n**{title}**");
}

fn bullets(out: &mut String, title: &str, marker: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section(out, title);
    for item in items {
        let _ = writeln!(out, "{marker} {item}");
    }
}
