//! Raw Bungie.net definition shapes
//!
//! Only the fields the catalog uses are modelled. Everything is defaulted so a
//! definition missing a block still deserializes.

use indexmap::IndexMap;
use serde::Deserialize;

/// Item definitions (weapons, armor, subclasses, plugs)
pub const ITEM_TABLE: &str = "DestinyInventoryItemDefinition";
/// Stat definitions (hash -> stat name)
pub const STAT_TABLE: &str = "DestinyStatDefinition";
/// Damage type definitions (hash -> element)
pub const DAMAGE_TYPE_TABLE: &str = "DestinyDamageTypeDefinition";
/// Class definitions
pub const CLASS_TABLE: &str = "DestinyClassDefinition";
/// Sandbox perk definitions
pub const PERK_TABLE: &str = "DestinySandboxPerkDefinition";

/// Every table the catalog fetches, in fetch order.
pub const REQUIRED_TABLES: &[&str] = &[
    ITEM_TABLE,
    STAT_TABLE,
    DAMAGE_TYPE_TABLE,
    CLASS_TABLE,
    PERK_TABLE,
];

/// Bungie platform response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformEnvelope<T> {
    pub response: Option<T>,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_status: String,
    #[serde(default)]
    pub message: String,
}

/// `ErrorCode` value Bungie uses for success.
pub const PLATFORM_SUCCESS: i64 = 1;

/// The manifest index (`/Destiny2/Manifest/`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestIndex {
    pub version: String,
    /// locale -> table name -> content path
    pub json_world_component_content_paths: IndexMap<String, IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayProperties {
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryBlock {
    pub tier_type: i32,
    pub tier_type_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatValue {
    pub stat_hash: u32,
    pub value: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatsBlock {
    pub stats: IndexMap<String, StatValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentGridBlock {
    pub hud_damage_type: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlugBlock {
    pub plug_category_identifier: String,
}

/// `DestinyInventoryItemDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDefinition {
    pub hash: u32,
    pub display_properties: DisplayProperties,
    pub item_type_display_name: String,
    pub flavor_text: String,
    pub item_type: i32,
    pub class_type: i32,
    pub inventory: InventoryBlock,
    pub stats: Option<StatsBlock>,
    pub default_damage_type: i32,
    pub default_damage_type_hash: Option<u32>,
    pub talent_grid: Option<TalentGridBlock>,
    pub plug: Option<PlugBlock>,
}

/// `DestinyStatDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatDefinition {
    pub hash: u32,
    pub display_properties: DisplayProperties,
}

/// `DestinyDamageTypeDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageTypeDefinition {
    pub hash: u32,
    pub display_properties: DisplayProperties,
    pub enum_value: i32,
}

/// `DestinyClassDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassDefinition {
    pub hash: u32,
    pub class_type: i32,
    pub display_properties: DisplayProperties,
}

/// `DestinySandboxPerkDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerkDefinition {
    pub hash: u32,
    pub display_properties: DisplayProperties,
    pub is_displayable: bool,
}
