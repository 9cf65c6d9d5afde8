//! Loadout synergy evaluation
//!
//! [`SynergyEvaluator::analyze`] runs every rule category over a
//! [`LoadoutRecord`](crate::loadout::LoadoutRecord) and rates the result:
//!
//! - weapon types and the one-exotic-weapon rule
//! - armor stat totals and the one-exotic-armor rule
//! - subclass element matches, fragment keywords and curated exotics
//! - element coverage across the weapons
//! - exotic pairing
//! - class stat priorities (tier = value / 10)
//!
//! The rating is `5.0 + min(0.3 × synergies, 3.0) + 0.5 (any exotic)
//! + 0.5 (three stats at 60+) − 0.8 × weaknesses`, clamped to 1-10.

mod evaluator;
pub mod rules;
mod types;

pub use evaluator::{BASE_RATING, SynergyEvaluator, compute_rating};
pub use rules::{ClassPriority, ElementRule, RuleTable};
pub use types::{AnalysisResult, ArmorAnalysis, NotableStat, StatGrade, WeaponAnalysis};
