//! Resolve a decoded share payload into a [`LoadoutRecord`]

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::manifest::{Catalog, CatalogEntry, ItemCategory};
use crate::utils::contains_ignore_case;

use super::codec::{DecodeError, SHARE_HOSTS, decode_link};
use super::types::{
    ArmorInfo, ArmorSlot, CharacterClass, LoadoutRecord, SubclassInfo, WeaponInfo, WeaponSlot,
};

/// Number of weapon slots at the head of `equipped`
const WEAPON_SLOTS: usize = 3;
/// Number of armor slots following the weapons
const ARMOR_SLOTS: usize = 5;

/// One `equipped` entry of a share payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquippedItem {
    /// Item hash as serialized (possibly negative)
    pub hash: i64,
    /// Socket plug hashes chosen for the item, in socket order
    pub socket_overrides: Vec<i64>,
}

impl EquippedItem {
    /// Read an entry given either as a bare hash or as an object with a
    /// `hash` field.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                hash: as_hash(map.get("hash")?)?,
                socket_overrides: map
                    .get("socketOverrides")
                    .map(socket_overrides)
                    .unwrap_or_default(),
            }),
            other => as_hash(other).map(|hash| Self {
                hash,
                socket_overrides: Vec::new(),
            }),
        }
    }
}

/// Kind of subclass plug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugKind {
    Fragment,
    Aspect,
    Super,
    Other,
}

impl PlugKind {
    /// Classify a plug by its type name, falling back to its plug category
    #[must_use]
    pub fn classify(entry: &CatalogEntry) -> Self {
        let checks = [
            ("Fragment", "fragments", PlugKind::Fragment),
            ("Aspect", "aspects", PlugKind::Aspect),
            ("Super", "supers", PlugKind::Super),
        ];
        checks
            .into_iter()
            .find(|(type_name, category, _)| {
                contains_ignore_case(&entry.item_type, type_name)
                    || contains_ignore_case(&entry.plug_category, category)
            })
            .map_or(PlugKind::Other, |(_, _, kind)| kind)
    }
}

/// Decodes share links against an injected catalog
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ishtar::loadout::LoadoutDecoder;
/// use ishtar::manifest::Catalog;
///
/// let decoder = LoadoutDecoder::new(Arc::new(Catalog::empty()));
/// assert!(decoder.parse("https://example.com/#abc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LoadoutDecoder {
    catalog: Arc<Catalog>,
    hosts: Vec<String>,
}

impl LoadoutDecoder {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            hosts: SHARE_HOSTS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the accepted sharing hosts
    #[must_use]
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts
            .into_iter()
            .map(|h| h.into().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Decode a link, or `None` if it is not a readable share link.
    #[must_use]
    pub fn parse(&self, link: &str) -> Option<LoadoutRecord> {
        match self.decode(link) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Could not decode loadout link: {e}");
                None
            }
        }
    }

    /// Decode a link with the reason for any failure
    ///
    /// # Errors
    /// Returns the [`DecodeError`] of the stage that failed.
    pub fn decode(&self, link: &str) -> Result<LoadoutRecord, DecodeError> {
        let hosts: Vec<&str> = self.hosts.iter().map(String::as_str).collect();
        let payload = decode_link(link, &hosts)?;
        self.resolve(&payload)
    }

    /// Map a payload document onto catalog entries
    ///
    /// # Errors
    /// Returns `Shape` if the payload is not a JSON object.
    pub fn resolve(&self, payload: &Value) -> Result<LoadoutRecord, DecodeError> {
        let payload = payload.as_object().ok_or_else(|| {
            DecodeError::Shape(format!("expected an object, got {}", kind_of(payload)))
        })?;

        let class = payload
            .get("characterClass")
            .or_else(|| payload.get("classType"))
            .and_then(Value::as_i64)
            .map_or(CharacterClass::Unknown, CharacterClass::from_code);

        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let equipped: Vec<Option<EquippedItem>> = payload
            .get("equipped")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(EquippedItem::from_value).collect())
            .unwrap_or_default();

        let mut record = LoadoutRecord {
            name,
            class,
            ..LoadoutRecord::default()
        };

        // The last entry is the subclass when it resolves to one; it then
        // takes no part in the positional weapon and armor slots.
        let mut slotted = equipped.as_slice();
        if let Some((Some(last), rest)) = equipped.split_last() {
            if let Some(entry) = self.lookup(last.hash, ItemCategory::Subclass) {
                self.apply_subclass(&mut record, entry, &last.socket_overrides);
                slotted = rest;
            }
        }

        for (position, item) in slotted.iter().enumerate() {
            let Some(item) = item else { continue };
            if position < WEAPON_SLOTS {
                if let Some(entry) = self.lookup(item.hash, ItemCategory::Weapon) {
                    record.weapons.push(self.weapon_info(entry, WeaponSlot::ORDER[position]));
                }
            } else if position < WEAPON_SLOTS + ARMOR_SLOTS {
                if let Some(entry) = self.lookup(item.hash, ItemCategory::Armor) {
                    let slot = ArmorSlot::ORDER[position - WEAPON_SLOTS];
                    record.armor.push(self.armor_info(entry, slot));
                }
            }
        }

        tracing::debug!(
            "Resolved loadout: {} weapons, {} armor, subclass {:?}",
            record.weapons.len(),
            record.armor.len(),
            record.subclass.as_ref().map(|s| s.name.as_str())
        );
        Ok(record)
    }

    fn lookup(&self, hash: i64, category: ItemCategory) -> Option<&CatalogEntry> {
        match self.catalog.lookup(hash) {
            Some(entry) if entry.category == category => Some(entry),
            Some(entry) => {
                tracing::debug!(
                    "Item {} is {:?}, expected {category:?}; dropped",
                    entry.name,
                    entry.category
                );
                None
            }
            None => {
                tracing::debug!("Item hash {hash} not in catalog; dropped");
                None
            }
        }
    }

    fn weapon_info(&self, entry: &CatalogEntry, slot: WeaponSlot) -> WeaponInfo {
        WeaponInfo {
            hash: entry.hash,
            name: entry.name.clone(),
            weapon_type: entry.item_type.clone(),
            element: self.catalog.element_of(entry),
            is_exotic: entry.is_exotic(),
            slot,
            stats: self.catalog.weapon_stats(entry),
        }
    }

    fn armor_info(&self, entry: &CatalogEntry, slot: ArmorSlot) -> ArmorInfo {
        ArmorInfo {
            hash: entry.hash,
            name: entry.name.clone(),
            armor_type: entry.item_type.clone(),
            element: self.catalog.element_of(entry),
            is_exotic: entry.is_exotic(),
            slot,
            stats: self.catalog.named_stats(entry),
        }
    }

    fn apply_subclass(&self, record: &mut LoadoutRecord, entry: &CatalogEntry, plugs: &[i64]) {
        let mut super_name = None;
        for plug in plugs.iter().filter_map(|hash| self.catalog.lookup(*hash)) {
            match PlugKind::classify(plug) {
                PlugKind::Fragment => record.fragments.push(plug.name.clone()),
                PlugKind::Aspect => record.aspects.push(plug.name.clone()),
                PlugKind::Super => super_name = Some(plug.name.clone()),
                PlugKind::Other => {}
            }
        }

        record.subclass = Some(SubclassInfo {
            hash: entry.hash,
            name: entry.name.clone(),
            element: self.catalog.element_of(entry),
            super_name,
        });
    }
}

/// Read a hash serialized as a JSON number or a numeric string
fn as_hash(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_u64().and_then(|v| i64::try_from(v).ok())),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Plug hashes of a `socketOverrides` value, ordered by socket index.
/// Accepts `{ "<index>": hash }` maps and plain arrays.
fn socket_overrides(value: &Value) -> Vec<i64> {
    match value {
        Value::Object(map) => sorted_sockets(map),
        Value::Array(items) => items.iter().filter_map(as_hash).collect(),
        _ => Vec::new(),
    }
}

fn sorted_sockets(map: &Map<String, Value>) -> Vec<i64> {
    let mut sockets: Vec<(u32, i64)> = map
        .iter()
        .filter_map(|(index, hash)| Some((index.parse().ok()?, as_hash(hash)?)))
        .collect();
    sockets.sort_by_key(|(index, _)| *index);
    sockets.into_iter().map(|(_, hash)| hash).collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::codec::share_link;
    use crate::manifest::Element;
    use indexmap::IndexMap;
    use serde_json::json;

    fn entry(hash: u32, name: &str, item_type: &str, category: ItemCategory) -> CatalogEntry {
        CatalogEntry {
            hash,
            name: name.to_string(),
            item_type: item_type.to_string(),
            category,
            tier: 5,
            class_type: 3,
            stats: IndexMap::new(),
            damage_type: 0,
            damage_type_hash: None,
            plug_category: String::new(),
            flavor_text: String::new(),
        }
    }

    fn catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::empty();
        catalog.insert_stat_name(4_043_523_819, "Impact");
        catalog.insert_stat_name(1_943_323_491, "Recovery");

        let mut sunshot = entry(1_345_867_570, "Sunshot", "Hand Cannon", ItemCategory::Weapon);
        sunshot.tier = 6;
        sunshot.damage_type = 3;
        sunshot.stats.insert(4_043_523_819, 84);
        catalog.insert(sunshot);

        let mut adept = entry(
            3_221_225_472,
            "Shadow Price (Adept)",
            "Auto Rifle",
            ItemCategory::Weapon,
        );
        adept.damage_type = 2;
        catalog.insert(adept);

        let mut helmet = entry(100, "Iron Forerunner Mask", "Helmet", ItemCategory::Armor);
        helmet.stats.insert(1_943_323_491, 20);
        catalog.insert(helmet);

        let mut gunslinger = entry(200, "Gunslinger", "Hunter Subclass", ItemCategory::Subclass);
        gunslinger.damage_type = 3;
        catalog.insert(gunslinger);

        let mut ember = entry(301, "Ember of Torches", "Solar Fragment", ItemCategory::Plug);
        ember.plug_category = "shared.solar.fragments".to_string();
        catalog.insert(ember);
        let mut aspect = entry(302, "Knock 'Em Down", "Solar Aspect", ItemCategory::Plug);
        aspect.plug_category = "hunter.solar.aspects".to_string();
        catalog.insert(aspect);
        catalog.insert(entry(303, "Golden Gun: Marksman", "Super Ability", ItemCategory::Plug));

        Arc::new(catalog)
    }

    #[test]
    fn test_positional_mapping() {
        let decoder = LoadoutDecoder::new(catalog());
        let payload = json!({
            "name": " Sunny ",
            "characterClass": 1,
            "equipped": [
                { "hash": 1345867570 },
                { "hash": -1073741824 },
                { "hash": 999 },
                { "hash": 100 },
                { "hash": 200, "socketOverrides": { "2": 302, "0": 303, "7": 301, "9": 4040 } }
            ]
        });
        let record = decoder.resolve(&payload).unwrap();

        assert_eq!(record.name.as_deref(), Some("Sunny"));
        assert_eq!(record.class, CharacterClass::Hunter);

        let weapons: Vec<_> = record.weapons.iter().map(|w| (w.name.as_str(), w.slot)).collect();
        assert_eq!(
            weapons,
            vec![("Sunshot", WeaponSlot::Kinetic), ("Shadow Price (Adept)", WeaponSlot::Energy)]
        );
        assert_eq!(record.weapons[0].element, Element::Solar);
        assert_eq!(record.weapons[0].stats.get("Impact"), Some(&84));
        assert!(record.weapons[0].is_exotic);

        assert_eq!(record.armor.len(), 1);
        assert_eq!(record.armor[0].slot, ArmorSlot::Helmet);
        assert_eq!(record.armor[0].total_stats(), 20);

        let subclass = record.subclass.unwrap();
        assert_eq!(subclass.name, "Gunslinger");
        assert_eq!(subclass.element, Element::Solar);
        assert_eq!(subclass.super_name.as_deref(), Some("Golden Gun: Marksman"));
        assert_eq!(record.fragments, vec!["Ember of Torches"]);
        assert_eq!(record.aspects, vec!["Knock 'Em Down"]);
    }

    #[test]
    fn test_unknown_class_and_bare_hashes() {
        let decoder = LoadoutDecoder::new(catalog());
        let record = decoder
            .resolve(&json!({ "characterClass": 9, "equipped": [1345867570, "100", null] }))
            .unwrap();
        assert_eq!(record.class, CharacterClass::Unknown);
        assert_eq!(record.weapons.len(), 1);
        // "100" sits in a weapon slot, so the helmet is dropped
        assert!(record.armor.is_empty());
        assert!(record.subclass.is_none());
    }

    #[test]
    fn test_non_object_payload() {
        let decoder = LoadoutDecoder::new(catalog());
        assert!(matches!(decoder.resolve(&json!([1, 2])), Err(DecodeError::Shape(_))));
    }

    #[test]
    fn test_parse_share_link() {
        let decoder = LoadoutDecoder::new(catalog());
        let link = share_link(&json!({
            "characterClass": 1,
            "equipped": [{ "hash": 1345867570 }, { "hash": 200 }]
        }))
        .unwrap();

        let record = decoder.parse(&link).unwrap();
        assert_eq!(record.weapons.len(), 1);
        assert_eq!(record.subclass_element(), Element::Solar);
    }

    #[test]
    fn test_foreign_and_custom_hosts() {
        let payload = json!({ "characterClass": 0, "equipped": [] });
        let link = share_link(&payload).unwrap();
        let foreign = link.replace("app.destinyitemmanager.com", "example.com");

        let decoder = LoadoutDecoder::new(catalog());
        assert!(decoder.parse(&foreign).is_none());
        assert!(matches!(decoder.decode(&foreign), Err(DecodeError::UnknownHost(_))));

        let custom = LoadoutDecoder::new(catalog()).with_hosts(["Example.com"]);
        assert!(custom.parse(&foreign).is_some());
        assert!(custom.parse(&link).is_none());
    }
}
