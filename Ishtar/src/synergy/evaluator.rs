//! Synergy evaluation

use indexmap::{IndexMap, IndexSet};

use crate::loadout::{CharacterClass, LoadoutRecord, WeaponInfo};
use crate::manifest::Element;

use super::rules::RuleTable;
use super::types::{AnalysisResult, ArmorAnalysis, NotableStat, StatGrade, WeaponAnalysis};

/// Score every loadout starts from
pub const BASE_RATING: f64 = 5.0;
const SYNERGY_WEIGHT: f64 = 0.3;
const SYNERGY_CAP: f64 = 3.0;
const EXOTIC_BONUS: f64 = 0.5;
const STRONG_STATS_BONUS: f64 = 0.5;
const STRONG_STATS_FOR_BONUS: usize = 3;
const STRONG_STATS_FOR_BALANCE: usize = 4;
const WEAKNESS_PENALTY: f64 = 0.8;

/// Final 1-10 rating from the evaluation counts. Halves round to even.
#[must_use]
pub fn compute_rating(
    synergies: usize,
    weaknesses: usize,
    has_exotic: bool,
    strong_stats: usize,
) -> u8 {
    let mut score = BASE_RATING;
    score += (synergies as f64 * SYNERGY_WEIGHT).min(SYNERGY_CAP);
    if has_exotic {
        score += EXOTIC_BONUS;
    }
    if strong_stats >= STRONG_STATS_FOR_BONUS {
        score += STRONG_STATS_BONUS;
    }
    score -= weaknesses as f64 * WEAKNESS_PENALTY;
    score.clamp(1.0, 10.0).round_ties_even() as u8
}

/// Applies a [`RuleTable`] to loadouts. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct SynergyEvaluator {
    rules: RuleTable,
}

impl SynergyEvaluator {
    #[must_use]
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Evaluate a loadout. Every rule category runs before the rating is
    /// computed from the final counts.
    #[must_use]
    pub fn analyze(&self, loadout: &LoadoutRecord) -> AnalysisResult {
        let mut result = AnalysisResult {
            loadout_name: loadout.name.clone(),
            class: loadout.class,
            subclass: loadout.subclass.as_ref().map(|s| s.name.clone()),
            subclass_element: loadout.subclass_element(),
            synergies: Vec::new(),
            weaknesses: Vec::new(),
            suggestions: Vec::new(),
            weapons: Vec::new(),
            armor: Vec::new(),
            stats: IndexMap::new(),
            elements: IndexMap::new(),
            exotics: Vec::new(),
            rating: 0,
        };

        self.analyze_weapons(loadout, &mut result);
        self.analyze_armor(loadout, &mut result);
        self.analyze_subclass(loadout, &mut result);
        self.analyze_elements(loadout, &mut result);
        self.analyze_exotic_pairing(loadout, &mut result);
        self.analyze_stat_tiers(loadout, &mut result);

        let strong_stats = self.strong_stat_count(&result);
        result.rating = compute_rating(
            result.synergies.len(),
            result.weaknesses.len(),
            !result.exotics.is_empty(),
            strong_stats,
        );

        tracing::debug!(
            "Analysis: {} synergies, {} weaknesses, {} suggestions, rating {}",
            result.synergies.len(),
            result.weaknesses.len(),
            result.suggestions.len(),
            result.rating
        );
        result
    }

    fn analyze_weapons(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        for weapon in &loadout.weapons {
            result.weapons.push(WeaponAnalysis {
                name: weapon.name.clone(),
                weapon_type: weapon.weapon_type.clone(),
                element: weapon.element,
                slot: weapon.slot,
                is_exotic: weapon.is_exotic,
                notable_stats: self.notable_stats(weapon),
            });
            if weapon.is_exotic {
                result.exotics.push(weapon.name.clone());
            }
        }

        let types: IndexSet<&str> = loadout
            .weapons
            .iter()
            .map(|w| w.weapon_type.as_str())
            .collect();
        if loadout.weapons.len() == 3 && types.len() == 3 {
            let listed: Vec<&str> = types.iter().copied().collect();
            result
                .synergies
                .push(format!("Weapon variety: {} cover every range", listed.join(", ")));
        } else if loadout.weapons.len() >= 2 && types.len() == 1 {
            result.weaknesses.push(format!(
                "Every weapon is a {}; mix weapon types to cover more ranges",
                types[0]
            ));
        }

        let exotic_weapons: Vec<&str> = loadout
            .weapons
            .iter()
            .filter(|w| w.is_exotic)
            .map(|w| w.name.as_str())
            .collect();
        if exotic_weapons.len() > 1 {
            result.weaknesses.push(format!(
                "Multiple exotic weapons ({}); only one exotic weapon can be equipped",
                exotic_weapons.join(", ")
            ));
        }
    }

    fn notable_stats(&self, weapon: &WeaponInfo) -> Vec<NotableStat> {
        let mut notable: Vec<NotableStat> = weapon
            .stats
            .iter()
            .filter(|(_, value)| **value >= self.rules.good_stat)
            .map(|(name, value)| NotableStat {
                name: name.clone(),
                value: *value,
                grade: if *value >= self.rules.exceptional_stat {
                    StatGrade::Exceptional
                } else {
                    StatGrade::Good
                },
            })
            .collect();
        notable.sort_by(|a, b| b.value.cmp(&a.value));
        notable.truncate(self.rules.notable_stats_per_weapon);
        notable
    }

    fn analyze_armor(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        for piece in &loadout.armor {
            for (stat, value) in &piece.stats {
                *result.stats.entry(stat.clone()).or_insert(0) += value;
            }
            result.armor.push(ArmorAnalysis {
                name: piece.name.clone(),
                armor_type: piece.armor_type.clone(),
                slot: piece.slot,
                is_exotic: piece.is_exotic,
                total_stats: piece.total_stats(),
            });
            if piece.is_exotic {
                result.exotics.push(piece.name.clone());
            }
        }

        let exotic_armor: Vec<&str> = loadout
            .armor
            .iter()
            .filter(|a| a.is_exotic)
            .map(|a| a.name.as_str())
            .collect();
        match exotic_armor.as_slice() {
            [] => {}
            [single] => result.synergies.push(format!("Exotic armor: {single}")),
            many => result.weaknesses.push(format!(
                "Multiple exotic armor pieces ({}); only one exotic armor piece can be equipped",
                many.join(", ")
            )),
        }
    }

    fn analyze_subclass(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        let element = loadout.subclass_element();
        let Some(rule) = self.rules.element(element) else {
            return;
        };

        let matching = loadout.weapons.iter().filter(|w| w.element == element).count();
        if matching > 0 {
            result.synergies.push(format!(
                "{matching} weapon{} match{} your {element} subclass",
                if matching == 1 { "" } else { "s" },
                if matching == 1 { "es" } else { "" },
            ));
        }

        for weapon in &loadout.weapons {
            if rule.likes_weapon_type(&weapon.weapon_type) {
                result.synergies.push(format!(
                    "{} ({}) pairs well with {element}",
                    weapon.name, weapon.weapon_type
                ));
            }
            if weapon.is_exotic && rule.likes_exotic(&weapon.name) {
                result
                    .synergies
                    .push(format!("Strong exotic synergy: {} is built for {element}", weapon.name));
            }
        }

        let fragments: Vec<&str> = loadout
            .fragments
            .iter()
            .filter(|f| rule.matches_fragment(f))
            .map(String::as_str)
            .collect();
        match fragments.as_slice() {
            [] => {}
            [single] => result.synergies.push(format!("{element} fragment: {single}")),
            many => result
                .synergies
                .push(format!("{element} fragment combo: {}", many.join(" + "))),
        }
    }

    fn analyze_elements(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        for weapon in loadout.weapons.iter().filter(|w| w.element.is_known()) {
            *result.elements.entry(weapon.element).or_insert(0) += 1;
        }

        match result.elements.len() {
            1 => {
                let element = result.elements.keys().next().copied().unwrap_or(Element::Unknown);
                result.suggestions.push(format!(
                    "Every weapon deals {element} damage; carry a second element for shields"
                ));
            }
            3 => {
                let listed: Vec<&str> = result.elements.keys().map(|e| e.as_str()).collect();
                result
                    .synergies
                    .push(format!("Full element coverage: {}", listed.join(", ")));
            }
            _ => {}
        }
    }

    fn analyze_exotic_pairing(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        let exotic_weapons: Vec<&WeaponInfo> =
            loadout.weapons.iter().filter(|w| w.is_exotic).collect();
        let exotic_armor: Vec<&str> = loadout
            .armor
            .iter()
            .filter(|a| a.is_exotic)
            .map(|a| a.name.as_str())
            .collect();

        if let ([weapon], [armor]) = (exotic_weapons.as_slice(), exotic_armor.as_slice()) {
            result
                .synergies
                .push(format!("Exotic pairing: {} with {armor}", weapon.name));
        }

        let element = loadout.subclass_element();
        if element.is_known() {
            for weapon in exotic_weapons.iter().filter(|w| w.element == element) {
                result.synergies.push(format!(
                    "Perfect synergy: {} matches your {element} subclass",
                    weapon.name
                ));
            }
        }
    }

    fn analyze_stat_tiers(&self, loadout: &LoadoutRecord, result: &mut AnalysisResult) {
        if result.stats.is_empty() {
            return;
        }
        let priorities = match loadout.class {
            CharacterClass::Unknown => None,
            class => self.rules.priorities(class),
        };

        for (rank, stat) in priorities.into_iter().flatten().enumerate() {
            let tier = result.stat_tier(stat);
            match tier {
                10.. => result.synergies.push(format!("{stat} maxed (tier {tier})")),
                8..=9 => result.synergies.push(format!("Excellent {stat} (tier {tier})")),
                6..=7 => result.synergies.push(format!("Good {stat} (tier {tier})")),
                _ if rank == 0 => result.suggestions.push(format!(
                    "Raise {stat} (tier {tier}); it matters most for a {}",
                    loadout.class
                )),
                _ => {}
            }
        }

        let strong = self.strong_stat_count(result);
        if strong >= STRONG_STATS_FOR_BALANCE {
            result.synergies.push(format!(
                "Well-balanced stats: {strong} stats at {} or higher",
                self.rules.good_stat
            ));
        }
    }

    fn strong_stat_count(&self, result: &AnalysisResult) -> usize {
        result
            .stats
            .values()
            .filter(|value| **value >= self.rules.good_stat)
            .count()
    }
}
