use std::fs;
use std::sync::Arc;

use ishtar::loadout::share_link;
use ishtar::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

const ITEMS: &str = r#"{
    "1345867570": {
        "hash": 1345867570,
        "displayProperties": { "name": "Sunshot" },
        "itemTypeDisplayName": "Hand Cannon",
        "itemType": 3,
        "inventory": { "tierType": 6 },
        "defaultDamageType": 3,
        "stats": { "stats": { "4043523819": { "statHash": 4043523819, "value": 84 } } }
    },
    "3221225472": {
        "hash": 3221225472,
        "displayProperties": { "name": "Calus Mini-Tool" },
        "itemTypeDisplayName": "Submachine Gun",
        "itemType": 3,
        "inventory": { "tierType": 5 },
        "defaultDamageType": 3
    },
    "2000": {
        "hash": 2000,
        "displayProperties": { "name": "Hothead" },
        "itemTypeDisplayName": "Rocket Launcher",
        "itemType": 3,
        "inventory": { "tierType": 5 },
        "defaultDamageType": 3
    },
    "3000": {
        "hash": 3000,
        "displayProperties": { "name": "Sunbracers" },
        "itemTypeDisplayName": "Gauntlets",
        "itemType": 2,
        "classType": 2,
        "inventory": { "tierType": 6 },
        "stats": { "stats": { "1943323491": { "statHash": 1943323491, "value": 30 } } }
    },
    "3001": {
        "hash": 3001,
        "displayProperties": { "name": "Vesper Robes" },
        "itemTypeDisplayName": "Chest Armor",
        "itemType": 2,
        "classType": 2,
        "inventory": { "tierType": 5 },
        "stats": { "stats": { "1943323491": { "statHash": 1943323491, "value": 38 } } }
    },
    "4000": {
        "hash": 4000,
        "displayProperties": { "name": "Dawnblade" },
        "itemTypeDisplayName": "Warlock Subclass",
        "itemType": 16,
        "talentGrid": { "hudDamageType": 3 }
    },
    "5000": {
        "hash": 5000,
        "displayProperties": { "name": "Ember of Torches" },
        "itemTypeDisplayName": "Solar Fragment",
        "itemType": 19,
        "plug": { "plugCategoryIdentifier": "shared.solar.fragments" }
    },
    "5001": {
        "hash": 5001,
        "displayProperties": { "name": "Ember of Solace" },
        "itemTypeDisplayName": "Solar Fragment",
        "itemType": 19,
        "plug": { "plugCategoryIdentifier": "shared.solar.fragments" }
    },
    "5002": {
        "hash": 5002,
        "displayProperties": { "name": "Well of Radiance" },
        "itemTypeDisplayName": "Super Ability",
        "itemType": 19,
        "plug": { "plugCategoryIdentifier": "warlock.solar.supers" }
    }
}"#;

const STATS: &str = r#"{
    "4043523819": { "hash": 4043523819, "displayProperties": { "name": "Impact" } },
    "1943323491": { "hash": 1943323491, "displayProperties": { "name": "Recovery" } }
}"#;

const DAMAGE_TYPES: &str = r#"{
    "1847026933": { "hash": 1847026933, "enumValue": 3, "displayProperties": { "name": "Solar" } }
}"#;

const CLASSES: &str = r#"{
    "2271682572": { "hash": 2271682572, "classType": 2, "displayProperties": { "name": "Warlock" } }
}"#;

fn fixture_catalog() -> Arc<Catalog> {
    let dir = tempdir().unwrap();
    for (table, json) in [
        ("DestinyInventoryItemDefinition", ITEMS),
        ("DestinyStatDefinition", STATS),
        ("DestinyDamageTypeDefinition", DAMAGE_TYPES),
        ("DestinyClassDefinition", CLASSES),
        ("DestinySandboxPerkDefinition", "{}"),
    ] {
        fs::write(dir.path().join(format!("{table}.json")), json).unwrap();
    }
    Arc::new(Catalog::from_dir(dir.path()).unwrap())
}

#[test]
fn test_missing_table_file() {
    let dir = tempdir().unwrap();
    let err = Catalog::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::TableFileMissing { .. }));
}

#[test]
fn test_link_to_scorecard() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.item_count(), 9);

    let link = share_link(&json!({
        "name": "Sunny Days",
        "characterClass": 2,
        "equipped": [
            { "hash": 1345867570 },
            { "hash": -1073741824 },
            { "hash": 2000 },
            { "hash": 123456 },
            { "hash": 3000 },
            { "hash": 3001 },
            { "hash": 4000, "socketOverrides": { "0": 5002, "3": 5000, "4": 5001 } }
        ]
    }))
    .unwrap();

    let decoder = LoadoutDecoder::new(Arc::clone(&catalog));
    let loadout = decoder.parse(&link).unwrap();
    assert_eq!(loadout.class, CharacterClass::Warlock);
    assert_eq!(loadout.weapons.len(), 3);
    // the unknown helmet hash is dropped
    assert_eq!(loadout.armor.len(), 2);
    assert_eq!(loadout.fragments, vec!["Ember of Torches", "Ember of Solace"]);
    assert_eq!(
        loadout.subclass.as_ref().and_then(|s| s.super_name.as_deref()),
        Some("Well of Radiance")
    );

    let result = SynergyEvaluator::default().analyze(&loadout);
    assert_eq!(result.stats.get("Recovery"), Some(&68));
    assert_eq!(result.elements.get(&Element::Solar), Some(&3));
    assert!(result.weaknesses.is_empty());
    assert!(result.synergies.iter().any(|s| s.starts_with("Perfect synergy: Sunshot")));

    let report = format_report(&result);
    assert!(report.starts_with("**Sunny Days**\nWarlock · Dawnblade (Solar)\n"));
    assert!(report.contains("**Stats**\n`Recovery` ██████░░░░ 68 (tier 6)"));
    assert!(report.contains("✅ Solar fragment combo: Ember of Torches + Ember of Solace"));
    assert!(report.contains("💡 Every weapon deals Solar damage"));
    assert!(!report.contains("**Weaknesses**"));
}

#[test]
fn test_foreign_link_is_absent() {
    let decoder = LoadoutDecoder::new(fixture_catalog());
    let link = share_link(&json!({ "characterClass": 0, "equipped": [] }))
        .unwrap()
        .replace("app.destinyitemmanager.com", "bungie.net");
    assert!(decoder.parse(&link).is_none());
}
