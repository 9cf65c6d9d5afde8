//! Analysis result types

use indexmap::IndexMap;
use serde::Serialize;

use crate::loadout::{ArmorSlot, CharacterClass, WeaponSlot};
use crate::manifest::Element;

/// How a weapon stat rates against the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatGrade {
    Exceptional,
    Good,
}

impl StatGrade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatGrade::Exceptional => "exceptional",
            StatGrade::Good => "good",
        }
    }
}

/// A weapon stat worth calling out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotableStat {
    pub name: String,
    pub value: i32,
    pub grade: StatGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponAnalysis {
    pub name: String,
    pub weapon_type: String,
    pub element: Element,
    pub slot: WeaponSlot,
    pub is_exotic: bool,
    /// Highest stats at or above the good threshold, best first
    pub notable_stats: Vec<NotableStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorAnalysis {
    pub name: String,
    pub armor_type: String,
    pub slot: ArmorSlot,
    pub is_exotic: bool,
    pub total_stats: i32,
}

/// Everything the evaluator concluded about one loadout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub loadout_name: Option<String>,
    pub class: CharacterClass,
    pub subclass: Option<String>,
    pub subclass_element: Element,
    pub synergies: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub weapons: Vec<WeaponAnalysis>,
    pub armor: Vec<ArmorAnalysis>,
    /// Armor stat totals, in order of first appearance
    pub stats: IndexMap<String, i32>,
    /// Weapon count per element, in order of first appearance
    pub elements: IndexMap<Element, usize>,
    pub exotics: Vec<String>,
    /// 1-10
    pub rating: u8,
}

impl AnalysisResult {
    /// Tier of an aggregate stat (value / 10), zero when absent
    #[must_use]
    pub fn stat_tier(&self, stat: &str) -> i32 {
        self.stats.get(stat).map_or(0, |value| value / 10)
    }
}
