// src/specs/heuristics.rs
//! Versioned lookup tables for name/category heuristics.
//!
//! All matching is case-insensitive substring matching against the
//! lowercase phrases below. Order matters wherever a table is a slice:
//! earlier rows win.

use crate::core::sanitize::{contains_ci, find_ci, to_lower};
use crate::model::Category;

/// Bump when any table changes in a way that moves units between buckets.
pub const HEURISTICS_VERSION: u32 = 1;

/// Entries whose name contains this are legacy content and never ingested.
pub const LEGACY_MARKER: &str = "[Legends]";

/// Category-reference names recognized as structural categories.
/// Epic hero and character are resolved by priority, see [`category_from_refs`].
pub const CATEGORY_REFERENCES: &[(&str, Category)] = &[
    ("Epic Hero", Category::EpicHeroes),
    ("Epic Heroes", Category::EpicHeroes),
    ("Character", Category::Characters),
    ("Troops", Category::Troops),
    ("Battleline", Category::Troops),
    ("Elites", Category::Elites),
    ("Fast Attack", Category::FastAttack),
    ("Heavy Support", Category::HeavySupport),
    ("Flyer", Category::Flyer),
    ("Aircraft", Category::Flyer),
    ("Transport", Category::Transport),
    ("Dedicated Transport", Category::Transport),
    ("Fortification", Category::Fortification),
];

/// Command-staff titles: a name containing one implies `characters` when the
/// entry carries no recognized category reference.
pub const COMMAND_TITLES: &[&str] = &[
    "captain", "chaplain", "librarian", "lieutenant", "techmarine",
    "apothecary", "ancient", "champion", "judiciar", "master", "biologis",
];

/// Weapon/equipment descriptors stripped from entry names to get the base
/// (reconciliation) name. First match wins.
pub const WEAPON_SUFFIXES: &[&str] = &[
    " with bolt rifles",
    " with stalker bolt rifles",
    " with auto bolt rifles",
    " with heavy bolt rifles",
    " with assault bolt rifles",
    " with plasma incinerators",
    " with melta rifles",
    " with heavy plasma incinerators",
    " with thunder hammers",
    " with storm bolters",
    " with chainswords",
    " with plasma pistols",
    " with power fists",
    " with power swords",
    " with combi-weapons",
    " with missile launchers",
    " with heavy bolters",
    " with lascannons",
    " with multi-meltas",
    " with assault cannons",
    " with flamers",
    " with meltaguns",
    " with plasma guns",
    " with grav-guns",
    " with volkite weapons",
    " with inferno pistols",
    " with master-crafted",
    " with relic",
    " with terminator",
    " armed with",
    " equipped with",
];

/// A nested entry whose name contains one of these is probably wargear.
pub const WARGEAR_KEYWORDS: &[&str] = &[
    "bolt", "plasma", "melta", "flamer", "rifle", "pistol", "sword",
    "hammer", "axe", "shield", "armour", "grenade", "launcher",
    "cannon", "gun", "weapon", "blade", "staff", "spear", "claw",
    "whip", "chain", "power", "force", "storm", "heavy", "assault",
    "rapid fire", "combi", "multi", "twin", "master-crafted", "relic",
];

/// ... unless it also contains one of these.
pub const WARGEAR_EXCLUSIONS: &[&str] = &[
    "upgrade", "psyker", "mark of", "warlord", "detachment", "enhancement",
];

/// Items that can name a loadout.
pub const LOADOUT_WEAPON_WORDS: &[&str] = &[
    "rifle", "cannon", "launcher", "pistol", "sword", "hammer", "bolter",
    "plasma", "melta", "flamer",
];

/// Items that never name a loadout.
pub const LOADOUT_NON_WEAPON_WORDS: &[&str] = &["grenades", "armour", "equipment"];

/// Characteristic name → abbreviation used in stat summaries. Matched
/// ignoring case: catalogs spell these "SV", "Sv" or "Save".
pub const STAT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Movement", "M"),
    ("M", "M"),
    ("Weapon Skill", "WS"),
    ("WS", "WS"),
    ("Ballistic Skill", "BS"),
    ("BS", "BS"),
    ("Strength", "S"),
    ("S", "S"),
    ("Toughness", "T"),
    ("T", "T"),
    ("Wounds", "W"),
    ("W", "W"),
    ("Attacks", "A"),
    ("A", "A"),
    ("Leadership", "Ld"),
    ("Ld", "Ld"),
    ("Save", "Sv"),
    ("Sv", "Sv"),
];

/// Reference-table categorization, checked top to bottom.
pub const REFERENCE_CATEGORIES: &[(Category, &[&str])] = &[
    (Category::EpicHeroes, &[
        "asurmen", "avatar of khaine", "baharroth", "eldrad ulthran", "fuegan",
        "jain zar", "maugan ra", "the visarch", "the yncarne", "yvraine",
        "belisarius cawl", "morvenn vahl", "saint celestine", "junith eruita",
        "daemonifuge", "aestred thurga", "trajann valoris", "valerian", "aleya",
        "commander dante", "chief librarian mephiston", "astorath", "lemartes",
        "the sanguinor", "high marshal helbrecht", "chaplain grimaldus",
        "emperor's champion", "ursula creed", "lord solar leontus", "lord marshal dreir",
        "gaunt's ghosts", "sly marbo", "nork deddog", "triumph of saint katherine",
    ]),
    (Category::Characters, &[
        "captain", "chaplain", "librarian", "lieutenant", "canoness", "palatine",
        "dialogus", "dogmata", "hospitaller", "imagifier", "ministorum priest",
        "shield-captain", "blade champion", "knight-centura", "castellan", "marshal",
        "crusade ancient", "autarch", "farseer", "spiritseer", "warlock", "shadowseer",
        "troupe master", "solitaire", "death jester", "tech-priest", "skitarii marshal",
        "cybernetica datasmith", "technoarcheologist", "archon", "succubus",
        "commissar", "cadian castellan", "primaris psyker", "ogryn bodyguard",
        "sanguinary priest", "death company captain",
    ]),
    (Category::Troops, &[
        "battle sisters squad", "guardian defenders", "storm guardians", "dire avengers",
        "rangers", "kabalite warriors", "wyches", "skitarii rangers", "skitarii vanguard",
        "corsair voidreavers", "cadian shock troops", "catachan jungle fighters",
        "death korps of krieg", "tempestus scions", "kasrkin", "crusader squad",
        "death company marines with bolt rifles",
    ]),
    (Category::HeavySupport, &[
        "predator", "land raider", "baneblade", "leman russ", "basilisk", "manticore",
        "exorcist", "castigator", "rogal dorn", "fire prism", "night spinner",
        "wraithknight", "skorpius disintegrator", "onager dunecrawler", "kastelan robots",
        "kataphron", "dreadnought", "wraithlord", "war walker", "dark reapers",
        "heavy weapons squad", "retributor squad", "devastator squad", "havocs",
        "field ordnance battery", "deathstrike", "wyvern", "hydra", "shadowsword",
        "stormlord", "stormsword", "hellhammer", "banehammer", "banesword", "doomhammer",
    ]),
    (Category::Elites, &[
        "terminators", "sternguard", "vanguard", "sword brethren", "sanguinary guard",
        "death company marines", "celestian sacresants", "repentia squad", "arco-flagellants",
        "mortifiers", "penitent engines", "paragon warsuits", "sanctifiers", "custodian",
        "allarus", "wardens", "venerable", "striking scorpions", "howling banshees",
        "fire dragons", "warp spiders", "wraithblades", "wraithguard", "incubi",
        "electro-priests", "sicarian", "pteraxii", "bullgryn squad", "ogryn squad",
        "ratlings", "krieg combat engineers", "eversor", "culexus", "callidus", "vindicare",
    ]),
    (Category::FastAttack, &[
        "seraphim squad", "zephyrim squad", "dominion squad", "sisters novitiate squad",
        "shining spears", "swooping hawks", "windriders", "skyweavers", "vyper",
        "reavers", "hellions", "scourges", "serberys", "ironstrider", "sydonian dragoons",
        "vertus praetors", "venatari", "agamatus", "aquilon", "attack bike", "bike squad",
        "assault squad", "jump pack", "rough riders", "death riders", "scout sentinels",
        "armoured sentinels", "shroud runners",
    ]),
    (Category::Flyer, &[
        "valkyrie", "vendetta", "vulture", "lightning", "thunderbolt", "avenger strike fighter",
        "crimson hunter", "hemlock wraithfighter", "razorwing jetfighter", "voidraven bomber",
        "archaeopter", "storm eagle", "fire raptor", "caestus", "thunderhawk", "corvus",
        "storm raven", "storm talon", "xiphon", "storm hawk", "nephilim jetfighter",
        "dark talon", "ares gunship", "orion assault dropship",
    ]),
    (Category::Transport, &[
        "rhino", "razorback", "impulsor", "repulsor", "chimera", "taurox", "immolator",
        "wave serpent", "falcon", "starweaver", "voidweaver", "raider", "venom",
        "skorpius dunerider", "terrax-pattern", "hades", "coronus grav-carrier",
        "caladius grav-tank", "pallas grav-attack", "land speeder", "drop pod",
    ]),
    (Category::Fortification, &[
        "aegis defence line", "bastion", "fortress of redemption", "firestorm redoubt",
        "vengeance weapon battery", "plasma obliterator", "void shield generator",
        "imperial bunker", "gun emplacement", "defence line", "cannon platform",
        "d-cannon platform", "shadow weaver platform", "vibro cannon platform",
    ]),
];

fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| lower.contains(n))
}

/// Structural category for one category-reference name (exact match,
/// ignoring case and surrounding space).
pub fn category_for_ref(name: &str) -> Option<Category> {
    let name = name.trim();
    CATEGORY_REFERENCES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

/// Resolve an entry's category from its category-reference names.
///
/// Epic hero beats character, character beats anything else; among the
/// rest the first recognized reference wins. `None` when nothing matched.
pub fn category_from_refs<'a>(refs: impl IntoIterator<Item = &'a str>) -> Option<Category> {
    let found: Vec<Category> = refs.into_iter().filter_map(category_for_ref).collect();
    [Category::EpicHeroes, Category::Characters]
        .into_iter()
        .find(|c| found.contains(c))
        .or_else(|| found.first().copied())
}

pub fn is_command_title(name: &str) -> bool {
    contains_any(&to_lower(name), COMMAND_TITLES)
}

pub fn is_legacy(name: &str) -> bool {
    contains_ci(name, LEGACY_MARKER)
}

/// Entry name with its first recognized weapon descriptor (and everything
/// after it) removed.
pub fn base_name(name: &str) -> String {
    for suffix in WEAPON_SUFFIXES {
        if let Some(at) = find_ci(name, suffix) {
            return name[..at].trim().to_string();
        }
    }
    name.trim().to_string()
}

pub fn is_wargear_item(name: &str) -> bool {
    let lower = to_lower(name);
    !contains_any(&lower, WARGEAR_EXCLUSIONS) && contains_any(&lower, WARGEAR_KEYWORDS)
}

pub fn is_loadout_weapon(name: &str) -> bool {
    let lower = to_lower(name);
    !contains_any(&lower, LOADOUT_NON_WEAPON_WORDS) && contains_any(&lower, LOADOUT_WEAPON_WORDS)
}

pub fn stat_abbreviation(characteristic: &str) -> Option<&'static str> {
    let name = characteristic.trim();
    STAT_ABBREVIATIONS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, abbr)| *abbr)
}

/// Reference-table bucket for a unit name; `troops` when nothing matches.
pub fn reference_category(name: &str) -> Category {
    let lower = to_lower(name);
    REFERENCE_CATEGORIES
        .iter()
        .find(|(_, needles)| contains_any(&lower, needles))
        .map(|(c, _)| *c)
        .unwrap_or(Category::Troops)
}
