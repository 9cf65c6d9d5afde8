//! Synergy rule tables
//!
//! Everything the evaluator judges by lives here as plain data, so tables can
//! be extended or swapped without touching the evaluation logic.

use crate::loadout::CharacterClass;
use crate::manifest::Element;
use crate::utils::contains_ignore_case;

/// What pairs well with one subclass element
#[derive(Debug, Clone, Copy)]
pub struct ElementRule {
    pub element: Element,
    /// Fragment name fragments that belong to the element (e.g., "ember")
    pub keywords: &'static [&'static str],
    /// Weapon types that play well with the element's verbs
    pub weapon_types: &'static [&'static str],
    /// Exotic weapons built around the element
    pub exotics: &'static [&'static str],
}

impl ElementRule {
    #[must_use]
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        self.keywords.iter().any(|k| contains_ignore_case(fragment, k))
    }

    #[must_use]
    pub fn likes_weapon_type(&self, weapon_type: &str) -> bool {
        self.weapon_types.iter().any(|t| t.eq_ignore_ascii_case(weapon_type.trim()))
    }

    #[must_use]
    pub fn likes_exotic(&self, name: &str) -> bool {
        self.exotics.iter().any(|e| e.eq_ignore_ascii_case(name.trim()))
    }
}

/// The three stats a class should prioritize, most important first
#[derive(Debug, Clone, Copy)]
pub struct ClassPriority {
    pub class: CharacterClass,
    pub stats: [&'static str; 3],
}

/// Standard element rules
pub const ELEMENT_RULES: &[ElementRule] = &[
    ElementRule {
        element: Element::Solar,
        keywords: &["ember", "solar", "radiant", "scorch", "ignit", "restoration", "cure"],
        weapon_types: &["Hand Cannon", "Sidearm", "Fusion Rifle", "Grenade Launcher", "Sword"],
        exotics: &[
            "Sunshot",
            "Polaris Lance",
            "Prometheus Lens",
            "Skyburner's Oath",
            "Ticuu's Divination",
            "Dragon's Breath",
            "Heir Apparent",
        ],
    },
    ElementRule {
        element: Element::Arc,
        keywords: &["spark", "arc", "jolt", "amplif", "blind", "ionic"],
        weapon_types: &["Auto Rifle", "Submachine Gun", "Pulse Rifle", "Shotgun"],
        exotics: &[
            "Riskrunner",
            "Trinity Ghoul",
            "Thunderlord",
            "Coldheart",
            "Centrifuse",
            "Delicate Tomb",
        ],
    },
    ElementRule {
        element: Element::Void,
        keywords: &["echo", "void", "volatile", "devour", "weaken", "invisib", "overshield"],
        weapon_types: &["Pulse Rifle", "Scout Rifle", "Machine Gun", "Rocket Launcher"],
        exotics: &[
            "Graviton Lance",
            "Le Monarque",
            "Collective Obligation",
            "Gjallarhorn",
            "Deterministic Chaos",
            "Funnelweb",
        ],
    },
    ElementRule {
        element: Element::Stasis,
        keywords: &["whisper", "stasis", "crystal", "slow", "freez", "shatter"],
        weapon_types: &["Sidearm", "Hand Cannon", "Trace Rifle", "Glaive"],
        exotics: &["Ager's Scepter", "Cryosthesia 77K", "Verglas Curve", "Salvation's Grip"],
    },
    ElementRule {
        element: Element::Strand,
        keywords: &["thread", "strand", "tangle", "sever", "suspend", "unravel", "woven"],
        weapon_types: &["Submachine Gun", "Glaive", "Combat Bow", "Auto Rifle"],
        exotics: &[
            "Osteo Striga",
            "Quicksilver Storm",
            "Final Warning",
            "Euphony",
            "Verity's Brow",
        ],
    },
];

/// Standard class stat priorities
pub const CLASS_PRIORITIES: &[ClassPriority] = &[
    ClassPriority {
        class: CharacterClass::Titan,
        stats: ["Resilience", "Recovery", "Strength"],
    },
    ClassPriority {
        class: CharacterClass::Hunter,
        stats: ["Recovery", "Mobility", "Discipline"],
    },
    ClassPriority {
        class: CharacterClass::Warlock,
        stats: ["Recovery", "Discipline", "Intellect"],
    },
];

/// Weapon stats at or above this are exceptional
pub const EXCEPTIONAL_STAT: i32 = 80;
/// Stats at or above this are good; also the "strong stat" line for armor totals
pub const GOOD_STAT: i32 = 60;
/// Notable stats kept per weapon
pub const NOTABLE_STATS_PER_WEAPON: usize = 3;

/// Complete set of rules the evaluator reads
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub elements: Vec<ElementRule>,
    pub class_priorities: Vec<ClassPriority>,
    pub exceptional_stat: i32,
    pub good_stat: i32,
    pub notable_stats_per_weapon: usize,
}

impl RuleTable {
    /// The built-in tables
    #[must_use]
    pub fn standard() -> Self {
        Self {
            elements: ELEMENT_RULES.to_vec(),
            class_priorities: CLASS_PRIORITIES.to_vec(),
            exceptional_stat: EXCEPTIONAL_STAT,
            good_stat: GOOD_STAT,
            notable_stats_per_weapon: NOTABLE_STATS_PER_WEAPON,
        }
    }

    #[must_use]
    pub fn element(&self, element: Element) -> Option<&ElementRule> {
        self.elements.iter().find(|rule| rule.element == element)
    }

    #[must_use]
    pub fn priorities(&self, class: CharacterClass) -> Option<&[&'static str; 3]> {
        self.class_priorities
            .iter()
            .find(|p| p.class == class)
            .map(|p| &p.stats)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_has_a_rule() {
        let rules = RuleTable::standard();
        for element in Element::ALL.into_iter().filter(|e| *e != Element::Kinetic) {
            assert!(rules.element(element).is_some(), "{element} has no rule");
        }
        assert!(rules.element(Element::Kinetic).is_none());
    }

    #[test]
    fn test_osteo_striga_is_strand_only() {
        let rules = RuleTable::standard();
        let owners: Vec<_> = rules
            .elements
            .iter()
            .filter(|rule| rule.likes_exotic("osteo striga"))
            .map(|rule| rule.element)
            .collect();
        assert_eq!(owners, vec![Element::Strand]);
    }

    #[test]
    fn test_fragment_keywords() {
        let solar = RuleTable::standard().element(Element::Solar).copied().unwrap();
        assert!(solar.matches_fragment("Ember of Torches"));
        assert!(!solar.matches_fragment("Echo of Expulsion"));
        assert!(solar.likes_weapon_type("hand cannon"));
        assert!(!solar.likes_weapon_type("Submachine Gun"));
    }

    #[test]
    fn test_class_priorities() {
        let rules = RuleTable::standard();
        assert_eq!(rules.priorities(CharacterClass::Titan).unwrap()[0], "Resilience");
        assert_eq!(rules.priorities(CharacterClass::Warlock).unwrap()[2], "Intellect");
        assert!(rules.priorities(CharacterClass::Unknown).is_none());
    }
}
