//! In-memory catalog built from the manifest definition tables

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::utils::hash::normalize_hash;

use super::definitions::{
    ClassDefinition, DamageTypeDefinition, ItemDefinition, PerkDefinition, StatDefinition,
    CLASS_TABLE, DAMAGE_TYPE_TABLE, ITEM_TABLE, PERK_TABLE, STAT_TABLE,
};
use super::types::{CatalogEntry, Element, ItemCategory};

/// Declared lifetime of a fetched catalog. Reported, never enforced.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Raw JSON text of every definition table, keyed by table role.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub items: String,
    pub stats: String,
    pub damage_types: String,
    pub classes: String,
    pub perks: String,
}

/// Read-only item/stat/damage-type dictionary.
///
/// Built once (from the network or from disk) and then shared behind an
/// `Arc`; every accessor takes `&self`.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    fetched_at: DateTime<Utc>,
    cache_duration: Duration,
    items: HashMap<u32, CatalogEntry>,
    stat_names: HashMap<u32, String>,
    damage_types: HashMap<u32, DamageTypeDefinition>,
    classes: HashMap<u32, ClassDefinition>,
    perks: HashMap<u32, PerkDefinition>,
}

impl Catalog {
    /// Create an empty catalog (every lookup misses)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: String::new(),
            fetched_at: Utc::now(),
            cache_duration: DEFAULT_CACHE_DURATION,
            items: HashMap::new(),
            stat_names: HashMap::new(),
            damage_types: HashMap::new(),
            classes: HashMap::new(),
            perks: HashMap::new(),
        }
    }

    /// Parse a catalog from the raw JSON of each definition table
    ///
    /// # Errors
    /// Returns an error if any table is not a JSON object of definitions.
    pub fn from_tables(version: impl Into<String>, tables: &RawTables) -> Result<Self> {
        let items: HashMap<u32, ItemDefinition> = parse_table(ITEM_TABLE, &tables.items)?;
        let stats: HashMap<u32, StatDefinition> = parse_table(STAT_TABLE, &tables.stats)?;

        let catalog = Self {
            version: version.into(),
            fetched_at: Utc::now(),
            cache_duration: DEFAULT_CACHE_DURATION,
            items: items
                .into_iter()
                .map(|(hash, def)| {
                    let mut entry = CatalogEntry::from_definition(def);
                    entry.hash = hash;
                    (hash, entry)
                })
                .collect(),
            stat_names: stats
                .into_iter()
                .filter(|(_, def)| !def.display_properties.name.is_empty())
                .map(|(hash, def)| (hash, def.display_properties.name))
                .collect(),
            damage_types: parse_table(DAMAGE_TYPE_TABLE, &tables.damage_types)?,
            classes: parse_table(CLASS_TABLE, &tables.classes)?,
            perks: parse_table(PERK_TABLE, &tables.perks)?,
        };

        tracing::info!(
            "Catalog {} ready: {} items, {} stats, {} damage types, {} perks",
            catalog.version,
            catalog.items.len(),
            catalog.stat_names.len(),
            catalog.damage_types.len(),
            catalog.perks.len()
        );

        Ok(catalog)
    }

    /// Load a catalog from a directory holding `<TableName>.json` files
    ///
    /// # Errors
    /// Returns an error if a table file is missing or malformed.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        tracing::info!("Loading catalog tables from {}", dir.display());

        let read = |table: &str| -> Result<String> {
            let path = dir.join(format!("{table}.json"));
            if !path.exists() {
                return Err(Error::TableFileMissing { path });
            }
            Ok(fs::read_to_string(path)?)
        };

        let tables = RawTables {
            items: read(ITEM_TABLE)?,
            stats: read(STAT_TABLE)?,
            damage_types: read(DAMAGE_TYPE_TABLE)?,
            classes: read(CLASS_TABLE)?,
            perks: read(PERK_TABLE)?,
        };
        let version = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_tables(version, &tables)
    }

    /// Override the declared cache duration
    #[must_use]
    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.cache_duration = duration;
        self
    }

    /// Add or replace an entry (used to assemble fixture catalogs)
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.items.insert(entry.hash, entry);
    }

    /// Register a stat name
    pub fn insert_stat_name(&mut self, hash: u32, name: impl Into<String>) {
        self.stat_names.insert(hash, name.into());
    }

    /// Look up an item by hash. Negative hashes are reinterpreted as unsigned.
    #[must_use]
    pub fn lookup(&self, hash: i64) -> Option<&CatalogEntry> {
        self.items.get(&normalize_hash(hash))
    }

    /// Stat name for a stat hash
    #[must_use]
    pub fn stat_name(&self, stat_hash: u32) -> Option<&str> {
        self.stat_names.get(&stat_hash).map(String::as_str)
    }

    /// Named stat map of an entry (stat name -> value), skipping stats the
    /// stat table does not name.
    #[must_use]
    pub fn named_stats(&self, entry: &CatalogEntry) -> IndexMap<String, i32> {
        entry
            .stats
            .iter()
            .filter_map(|(hash, value)| {
                self.stat_name(*hash)
                    .map(|name| (name.to_string(), *value))
            })
            .collect()
    }

    /// Named stats of a weapon, limited to bar stats (0-100). Counters such as
    /// rounds per minute or magazine size are dropped.
    #[must_use]
    pub fn weapon_stats(&self, entry: &CatalogEntry) -> IndexMap<String, i32> {
        self.named_stats(entry)
            .into_iter()
            .filter(|(_, value)| (0..=100).contains(value))
            .collect()
    }

    /// Element of an entry, preferring the damage type table when the
    /// definition links into it.
    #[must_use]
    pub fn element_of(&self, entry: &CatalogEntry) -> Element {
        if let Some(def) = entry.damage_type_hash.and_then(|h| self.damage_types.get(&h)) {
            let element = Element::from_damage_type(def.enum_value);
            if element.is_known() {
                return element;
            }
        }
        entry.element()
    }

    /// Display name of a damage type, given either a damage type hash or a
    /// raw `DamageType` code.
    #[must_use]
    pub fn damage_type_name(&self, hash_or_code: i64) -> String {
        if let Some(def) = self.damage_types.get(&normalize_hash(hash_or_code)) {
            if !def.display_properties.name.is_empty() {
                return def.display_properties.name.clone();
            }
        }
        i32::try_from(hash_or_code)
            .map(Element::from_damage_type)
            .unwrap_or(Element::Unknown)
            .to_string()
    }

    /// Class display name for a `classType`
    #[must_use]
    pub fn class_name(&self, class_type: i32) -> Option<&str> {
        self.classes
            .values()
            .find(|def| def.class_type == class_type)
            .map(|def| def.display_properties.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Perk name by hash
    #[must_use]
    pub fn perk_name(&self, hash: i64) -> Option<&str> {
        self.perks
            .get(&normalize_hash(hash))
            .map(|def| def.display_properties.name.as_str())
    }

    /// Weapons whose name contains `query` (case-insensitive), exotics first,
    /// then alphabetical. Duplicate names (reissues) keep the first hash seen.
    #[must_use]
    pub fn search_weapons(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&CatalogEntry> = self
            .items
            .values()
            .filter(|entry| {
                entry.category == ItemCategory::Weapon
                    && !entry.name.is_empty()
                    && entry.name.to_lowercase().contains(&query)
            })
            .collect();

        matches.sort_by(|a, b| {
            b.is_exotic()
                .cmp(&a.is_exotic())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.hash.cmp(&b.hash))
        });
        matches.dedup_by(|a, b| a.name == b.name);
        matches.truncate(limit);
        matches
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Time since the tables were built
    #[must_use]
    pub fn age(&self) -> Duration {
        (Utc::now() - self.fetched_at).to_std().unwrap_or_default()
    }

    #[must_use]
    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    /// Whether the declared cache duration has elapsed. Nothing refreshes a
    /// stale catalog; callers only report it.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.age() > self.cache_duration
    }
}

/// Parse a `{ "<hash>": definition }` table, normalizing the keys
fn parse_table<T: DeserializeOwned>(table: &str, json: &str) -> Result<HashMap<u32, T>> {
    let raw: HashMap<String, T> = serde_json::from_str(json).map_err(|e| Error::InvalidTable {
        table: table.to_string(),
        message: e.to_string(),
    })?;

    let mut parsed = HashMap::with_capacity(raw.len());
    for (key, def) in raw {
        match key.parse::<i64>() {
            Ok(hash) => {
                parsed.insert(normalize_hash(hash), def);
            }
            Err(_) => tracing::debug!("Skipping non-numeric key {key} in {table}"),
        }
    }
    Ok(parsed)
}
