// src/fallback.rs
//! Minimal embedded dataset served when an ingestion pass yields nothing.
//! Small on purpose: enough to browse and build a list at reduced fidelity.

use crate::model::{Category, Faction, Loadout, Unit, WargearOption};

fn loadout(id: &str, name: &str, wargear: Vec<String>) -> Loadout {
    Loadout { id: s!(id), name: s!(name), wargear_list: wargear }
}

pub fn factions() -> Vec<Faction> {
    vec![space_marines()]
}

fn space_marines() -> Faction {
    let mut f = Faction::new("space-marines", "Space Marines", "accent");

    f.push(
        Category::EpicHeroes,
        Unit::new("Marneus Calgar", 185)
            .with_stats("M6 WS2+ BS2+ S4 T5 W6 A5 Ld9 Sv2+")
            .with_abilities(strings!["Deep Strike", "Rites of Battle", "Adept of the Codex"])
            .with_keywords(strings!["Epic Hero", "Character"])
            .with_loadout(loadout(
                "standard",
                "Standard Loadout",
                strings!["Gauntlets of Ultramar", "Armour of Heraclus"],
            )),
    );

    f.push(
        Category::Characters,
        Unit::new("Captain in Terminator Armour", 115)
            .with_stats("M5 WS2+ BS2+ S4 T5 W6 A4 Ld9 Sv2+")
            .with_abilities(strings!["Deep Strike", "Rites of Battle"])
            .with_keywords(strings!["Character", "Terminator"])
            .with_loadout(loadout("standard", "Standard Loadout", strings!["Storm bolter", "Power fist"]))
            .with_loadout(loadout("relic", "Relic Blade", strings!["Storm bolter", "Relic blade"]))
            .with_option(WargearOption::new("Relic Blade", 10))
            .with_option(WargearOption::new("Digital Weapons", 5)),
    );

    f.push(
        Category::Troops,
        Unit::new("Intercessor Squad", 100)
            .with_sizes(5, 10, 20)
            .with_stats("M6 WS3+ BS3+ S4 T4 W2 A2 Ld7 Sv3+")
            .with_abilities(strings!["Combat Squads"])
            .with_keywords(strings!["Primaris"])
            .with_loadout(loadout("standard", "Bolt Rifles", strings!["Bolt rifle", "Frag & Krak grenades"]))
            .with_loadout(loadout("auto", "Auto Bolt Rifles", strings!["Auto bolt rifle", "Frag & Krak grenades"])),
    );

    f.push(
        Category::HeavySupport,
        Unit::new("Devastator Squad", 90)
            .with_sizes(5, 10, 18)
            .with_stats("M6 WS3+ BS3+ S4 T4 W1 A1 Ld7 Sv3+")
            .with_abilities(strings!["Signum"])
            .with_loadout(loadout("missile", "Missile Launchers", strings!["Missile launcher", "Frag & Krak grenades"]))
            .with_loadout(loadout("lascannon", "Lascannons", strings!["Lascannon", "Frag & Krak grenades"])),
    );

    f
}
