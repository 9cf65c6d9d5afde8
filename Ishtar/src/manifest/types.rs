//! Catalog entry types

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::definitions::ItemDefinition;

/// `tierType` code Bungie uses for exotic items.
pub const EXOTIC_TIER: i32 = 6;
/// `tierType` code for legendary items.
pub const LEGENDARY_TIER: i32 = 5;

/// Damage element of a weapon or subclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Kinetic,
    Arc,
    Solar,
    Void,
    Stasis,
    Strand,
    /// No damage type, or a code this crate does not know.
    Unknown,
}

impl Element {
    /// All real elements, in display order.
    pub const ALL: [Element; 6] = [
        Element::Kinetic,
        Element::Arc,
        Element::Solar,
        Element::Void,
        Element::Stasis,
        Element::Strand,
    ];

    /// Map the `DamageType` enum value used in item definitions.
    #[must_use]
    pub fn from_damage_type(code: i32) -> Self {
        match code {
            1 => Element::Kinetic,
            2 => Element::Arc,
            3 => Element::Solar,
            4 => Element::Void,
            6 => Element::Stasis,
            7 => Element::Strand,
            _ => Element::Unknown,
        }
    }

    /// Parse an element name, case-insensitively. "Thermal" is Bungie's
    /// internal name for Solar.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "kinetic" => Element::Kinetic,
            "arc" => Element::Arc,
            "solar" | "thermal" => Element::Solar,
            "void" => Element::Void,
            "stasis" => Element::Stasis,
            "strand" => Element::Strand,
            _ => Element::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Kinetic => "Kinetic",
            Element::Arc => "Arc",
            Element::Solar => "Solar",
            Element::Void => "Void",
            Element::Stasis => "Stasis",
            Element::Strand => "Strand",
            Element::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Element::Unknown
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad item category derived from `itemType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Armor,
    Weapon,
    Subclass,
    /// Mods, fragments, aspects, supers and other socket plugs
    Plug,
    Other,
}

impl ItemCategory {
    #[must_use]
    pub fn from_item_type(item_type: i32) -> Self {
        match item_type {
            2 => ItemCategory::Armor,
            3 => ItemCategory::Weapon,
            16 => ItemCategory::Subclass,
            19 => ItemCategory::Plug,
            _ => ItemCategory::Other,
        }
    }
}

/// A resolved item definition, immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unsigned manifest hash
    pub hash: u32,
    /// Display name (e.g., "Osteo Striga")
    pub name: String,
    /// Item type display name (e.g., "Submachine Gun", "Solar Fragment")
    pub item_type: String,
    pub category: ItemCategory,
    /// Raw `tierType` code (6 = exotic)
    pub tier: i32,
    /// `classType` (0 Titan, 1 Hunter, 2 Warlock, 3 any)
    pub class_type: i32,
    /// Stat hash -> value, in definition order
    pub stats: IndexMap<u32, i32>,
    /// Raw `DamageType` code
    pub damage_type: i32,
    /// Hash into the damage type table, when the definition carries one
    pub damage_type_hash: Option<u32>,
    /// Plug category identifier for socket plugs (e.g., "`hunter.solar.fragments`")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plug_category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flavor_text: String,
}

impl CatalogEntry {
    #[must_use]
    pub fn is_exotic(&self) -> bool {
        self.tier == EXOTIC_TIER
    }

    #[must_use]
    pub fn is_legendary(&self) -> bool {
        self.tier == LEGENDARY_TIER
    }

    /// Rarity label for display
    #[must_use]
    pub fn tier_name(&self) -> &'static str {
        match self.tier {
            EXOTIC_TIER => "Exotic",
            LEGENDARY_TIER => "Legendary",
            4 => "Rare",
            3 => "Common",
            2 => "Basic",
            _ => "Unknown",
        }
    }

    /// Element from the definition's damage type code. Subclass items keep
    /// theirs on the talent grid, which `from_definition` folds in.
    #[must_use]
    pub fn element(&self) -> Element {
        Element::from_damage_type(self.damage_type)
    }

    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.category == ItemCategory::Weapon
    }

    /// Build an entry from a raw item definition
    #[must_use]
    pub fn from_definition(def: ItemDefinition) -> Self {
        let damage_type = if def.default_damage_type != 0 {
            def.default_damage_type
        } else {
            def.talent_grid.as_ref().map_or(0, |grid| grid.hud_damage_type)
        };

        let stats = def
            .stats
            .map(|block| {
                block
                    .stats
                    .into_values()
                    .map(|stat| (stat.stat_hash, stat.value.max(0)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            hash: def.hash,
            name: def.display_properties.name,
            item_type: def.item_type_display_name,
            category: ItemCategory::from_item_type(def.item_type),
            tier: def.inventory.tier_type,
            class_type: def.class_type,
            stats,
            damage_type,
            damage_type_hash: def.default_damage_type_hash,
            plug_category: def.plug.map(|p| p.plug_category_identifier).unwrap_or_default(),
            flavor_text: def.flavor_text,
        }
    }
}
