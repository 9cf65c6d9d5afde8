//! Resolved loadout types

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::manifest::Element;

/// Guardian class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterClass {
    Titan,
    Hunter,
    Warlock,
    /// Any code outside 0-2
    #[default]
    Unknown,
}

impl CharacterClass {
    /// Map the `characterClass` code of a share payload
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => CharacterClass::Titan,
            1 => CharacterClass::Hunter,
            2 => CharacterClass::Warlock,
            _ => CharacterClass::Unknown,
        }
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            CharacterClass::Titan => 0,
            CharacterClass::Hunter => 1,
            CharacterClass::Warlock => 2,
            CharacterClass::Unknown => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterClass::Titan => "Titan",
            CharacterClass::Hunter => "Hunter",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weapon slot, by position in the equipped list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSlot {
    Kinetic,
    Energy,
    Power,
}

impl WeaponSlot {
    pub const ORDER: [WeaponSlot; 3] = [WeaponSlot::Kinetic, WeaponSlot::Energy, WeaponSlot::Power];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeaponSlot::Kinetic => "Kinetic",
            WeaponSlot::Energy => "Energy",
            WeaponSlot::Power => "Power",
        }
    }
}

/// Armor slot, by position in the equipped list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorSlot {
    Helmet,
    Gauntlets,
    Chest,
    Legs,
    ClassItem,
}

impl ArmorSlot {
    pub const ORDER: [ArmorSlot; 5] = [
        ArmorSlot::Helmet,
        ArmorSlot::Gauntlets,
        ArmorSlot::Chest,
        ArmorSlot::Legs,
        ArmorSlot::ClassItem,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "Helmet",
            ArmorSlot::Gauntlets => "Gauntlets",
            ArmorSlot::Chest => "Chest",
            ArmorSlot::Legs => "Legs",
            ArmorSlot::ClassItem => "Class Item",
        }
    }
}

/// An equipped weapon resolved through the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponInfo {
    pub hash: u32,
    pub name: String,
    /// Weapon type (e.g., "Auto Rifle")
    pub weapon_type: String,
    pub element: Element,
    pub is_exotic: bool,
    pub slot: WeaponSlot,
    /// Stat name -> value
    pub stats: IndexMap<String, i32>,
}

/// An equipped armor piece resolved through the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorInfo {
    pub hash: u32,
    pub name: String,
    /// Armor type (e.g., "Helmet", "Hunter Cloak")
    pub armor_type: String,
    pub element: Element,
    pub is_exotic: bool,
    pub slot: ArmorSlot,
    /// Stat name -> value
    pub stats: IndexMap<String, i32>,
}

impl ArmorInfo {
    /// Sum of all stat values on the piece
    #[must_use]
    pub fn total_stats(&self) -> i32 {
        self.stats.values().sum()
    }
}

/// The equipped subclass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubclassInfo {
    pub hash: u32,
    pub name: String,
    pub element: Element,
    pub super_name: Option<String>,
}

/// A decoded loadout. Built per request and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutRecord {
    /// Loadout name from the share payload, if it carried one
    pub name: Option<String>,
    pub class: CharacterClass,
    pub subclass: Option<SubclassInfo>,
    pub weapons: Vec<WeaponInfo>,
    pub armor: Vec<ArmorInfo>,
    pub fragments: Vec<String>,
    pub aspects: Vec<String>,
}

impl LoadoutRecord {
    /// Element of the equipped subclass, `Unknown` without one
    #[must_use]
    pub fn subclass_element(&self) -> Element {
        self.subclass.as_ref().map_or(Element::Unknown, |s| s.element)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subclass.is_none() && self.weapons.is_empty() && self.armor.is_empty()
    }
}
