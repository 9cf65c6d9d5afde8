//! Recommended perk rolls per weapon type

use ishtar::manifest::{Catalog, CatalogEntry};

/// Recommended perks for one weapon type
#[derive(Debug, Clone, Copy)]
pub struct GodRoll {
    pub weapon_type: &'static str,
    pub barrel: &'static str,
    pub magazine: &'static str,
    pub pve: [&'static str; 2],
    pub pvp: [&'static str; 2],
}

/// Fallback for weapon types without an entry
pub const GENERIC_ROLL: GodRoll = GodRoll {
    weapon_type: "Any",
    barrel: "Arrowhead Brake",
    magazine: "Tactical Mag",
    pve: ["Rampage", "Explosive Payload"],
    pvp: ["Eye of the Storm", "Moving Target"],
};

pub const GOD_ROLLS: &[GodRoll] = &[
    GodRoll {
        weapon_type: "Hand Cannon",
        barrel: "Hammer-Forged Rifling",
        magazine: "Accurized Rounds",
        pve: ["Outlaw", "Explosive Payload"],
        pvp: ["Eye of the Storm", "Opening Shot"],
    },
    GodRoll {
        weapon_type: "Auto Rifle",
        barrel: "Arrowhead Brake",
        magazine: "Extended Mag",
        pve: ["Subsistence", "Target Lock"],
        pvp: ["Zen Moment", "Tap the Trigger"],
    },
    GodRoll {
        weapon_type: "Pulse Rifle",
        barrel: "Arrowhead Brake",
        magazine: "Ricochet Rounds",
        pve: ["Heating Up", "Kill Clip"],
        pvp: ["Rangefinder", "Headseeker"],
    },
    GodRoll {
        weapon_type: "Scout Rifle",
        barrel: "Full Bore",
        magazine: "Accurized Rounds",
        pve: ["Fourth Time's the Charm", "Explosive Payload"],
        pvp: ["Zen Moment", "Moving Target"],
    },
    GodRoll {
        weapon_type: "Submachine Gun",
        barrel: "Chambered Compensator",
        magazine: "Tactical Mag",
        pve: ["Subsistence", "Frenzy"],
        pvp: ["Perpetual Motion", "Surrounded"],
    },
    GodRoll {
        weapon_type: "Sidearm",
        barrel: "Polygonal Rifling",
        magazine: "Ricochet Rounds",
        pve: ["Threat Detector", "Golden Tricorn"],
        pvp: ["Perpetual Motion", "Rangefinder"],
    },
    GodRoll {
        weapon_type: "Shotgun",
        barrel: "Rifled Barrel",
        magazine: "Assault Mag",
        pve: ["Auto-Loading Holster", "Trench Barrel"],
        pvp: ["Slideshot", "Opening Shot"],
    },
    GodRoll {
        weapon_type: "Sniper Rifle",
        barrel: "Fluted Barrel",
        magazine: "Appended Mag",
        pve: ["Triple Tap", "Vorpal Weapon"],
        pvp: ["Snapshot Sights", "Moving Target"],
    },
    GodRoll {
        weapon_type: "Fusion Rifle",
        barrel: "Fluted Barrel",
        magazine: "Liquid Coils",
        pve: ["Reservoir Burst", "Controlled Burst"],
        pvp: ["Under Pressure", "Backup Plan"],
    },
    GodRoll {
        weapon_type: "Grenade Launcher",
        barrel: "Quick Launch",
        magazine: "Spike Grenades",
        pve: ["Auto-Loading Holster", "Chain Reaction"],
        pvp: ["Field Prep", "Blinding Grenades"],
    },
    GodRoll {
        weapon_type: "Rocket Launcher",
        barrel: "Quick Launch",
        magazine: "Impact Casing",
        pve: ["Reconstruction", "Bait and Switch"],
        pvp: ["Impulse Amplifier", "Tracking Module"],
    },
    GodRoll {
        weapon_type: "Machine Gun",
        barrel: "Arrowhead Brake",
        magazine: "Extended Mag",
        pve: ["Envious Assassin", "Target Lock"],
        pvp: ["Dynamic Sway Reduction", "Killing Wind"],
    },
    GodRoll {
        weapon_type: "Sword",
        barrel: "Jagged Edge",
        magazine: "Swordmaster's Guard",
        pve: ["Relentless Strikes", "Eager Edge"],
        pvp: ["Tireless Blade", "Whirlwind Blade"],
    },
    GodRoll {
        weapon_type: "Glaive",
        barrel: "Honed Edge",
        magazine: "Enhanced Battery",
        pve: ["Repulsor Brace", "Unstoppable Force"],
        pvp: ["Impulse Amplifier", "Close to Melee"],
    },
    GodRoll {
        weapon_type: "Combat Bow",
        barrel: "Fiberglass String",
        magazine: "Carbon Arrow Shaft",
        pve: ["Archer's Tempo", "Explosive Head"],
        pvp: ["Dragonfly", "Moving Target"],
    },
];

/// A weapon offered in a god-roll prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GodRollOption {
    pub hash: u32,
    pub name: String,
    pub weapon_type: String,
    pub is_exotic: bool,
}

impl GodRollOption {
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            hash: entry.hash,
            name: entry.name.clone(),
            weapon_type: entry.item_type.clone(),
            is_exotic: entry.is_exotic(),
        }
    }
}

/// Roll for a weapon type, falling back to [`GENERIC_ROLL`]
#[must_use]
pub fn roll_for(weapon_type: &str) -> &'static GodRoll {
    GOD_ROLLS
        .iter()
        .find(|roll| roll.weapon_type.eq_ignore_ascii_case(weapon_type.trim()))
        .unwrap_or(&GENERIC_ROLL)
}

/// Text reply for a chosen weapon
#[must_use]
pub fn format_god_roll(option: &GodRollOption, catalog: Option<&Catalog>) -> String {
    let mut lines = vec![format!("🎲 **{}** ({})", option.name, option.weapon_type)];

    if option.is_exotic {
        lines.push(
            "Exotic weapons have fixed perks; pick a catalyst and a good masterwork.".to_string(),
        );
    } else {
        let roll = roll_for(&option.weapon_type);
        lines.push(format!("Barrel: {}", roll.barrel));
        lines.push(format!("Magazine: {}", roll.magazine));
        lines.push(format!("PvE: {} + {}", roll.pve[0], roll.pve[1]));
        lines.push(format!("PvP: {} + {}", roll.pvp[0], roll.pvp[1]));
        if roll.weapon_type == GENERIC_ROLL.weapon_type {
            lines.push("(no curated roll for this weapon type; showing general picks)".to_string());
        }
    }

    if let Some(entry) = catalog.and_then(|c| c.lookup(i64::from(option.hash))) {
        if !entry.flavor_text.is_empty() {
            lines.push(format!("_{}_", entry.flavor_text.trim()));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, weapon_type: &str, is_exotic: bool) -> GodRollOption {
        GodRollOption {
            hash: 1,
            name: name.to_string(),
            weapon_type: weapon_type.to_string(),
            is_exotic,
        }
    }

    #[test]
    fn test_roll_lookup() {
        assert_eq!(roll_for("hand cannon").pve[0], "Outlaw");
        assert_eq!(roll_for("Trace Rifle").weapon_type, "Any");
    }

    #[test]
    fn test_format_legendary_roll() {
        let text = format_god_roll(&option("Palindrome", "Hand Cannon", false), None);
        assert_eq!(
            text,
            "🎲 **Palindrome** (Hand Cannon)\nBarrel: Hammer-Forged Rifling\nMagazine: Accurized Rounds\nPvE: Outlaw + Explosive Payload\nPvP: Eye of the Storm + Opening Shot"
        );
    }

    #[test]
    fn test_format_exotic_and_fallback() {
        let exotic = format_god_roll(&option("Sunshot", "Hand Cannon", true), None);
        assert!(exotic.contains("fixed perks"));
        let fallback = format_god_roll(&option("Ruinous Effigy", "Trace Rifle", false), None);
        assert!(fallback.contains("general picks"));
    }
}
