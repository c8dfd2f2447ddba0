// src/reconcile.rs
//! Unit reconciliation: weapon-variant entries sharing a base name collapse
//! into one unit carrying every distinct loadout.

use std::collections::HashMap;

use crate::core::sanitize::slugify;
use crate::error::ParseError;
use crate::factions::FactionInfo;
use crate::model::{Category, Faction, Unit};
use crate::specs::catalog::{parse_catalog, EntryExtract};

/// Accumulates extracts in document order. The first entry seen for an id
/// fixes the unit's category, stats, cost, abilities and keywords; later
/// ones only contribute loadouts.
#[derive(Default)]
pub struct Reconciler {
    units: Vec<(Category, Unit)>,
    index: HashMap<String, usize>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: EntryExtract) {
        let id = slugify(&entry.base_name);
        let slot = match self.index.get(&id) {
            Some(&i) => i,
            None => {
                let i = self.units.len();
                self.units.push((entry.category, first_encounter(&entry)));
                self.index.insert(id, i);
                i
            }
        };

        let unit = &mut self.units[slot].1;
        if !unit.loadouts.iter().any(|l| l.id == entry.loadout.id) {
            unit.loadouts.push(entry.loadout);
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units with their fixed categories, first-encounter order.
    pub fn finish(self) -> Vec<(Category, Unit)> {
        self.units
    }
}

fn first_encounter(entry: &EntryExtract) -> Unit {
    let mut unit = Unit::new(&entry.base_name, entry.cost.base)
        .with_stats(&entry.stats)
        .with_abilities(entry.abilities.clone())
        .with_keywords(entry.keywords.clone());

    if entry.category.is_command() {
        unit.wargear_options = entry.wargear_options.clone();
    } else {
        unit.min_size = entry.cost.min_size;
        unit.max_size = entry.cost.max_size;
        unit.per_model_cost = entry.cost.per_model;
    }
    unit
}

/// Reconcile a whole entry stream.
pub fn reconcile(entries: impl IntoIterator<Item = EntryExtract>) -> Vec<(Category, Unit)> {
    let mut r = Reconciler::new();
    for entry in entries {
        r.add(entry);
    }
    r.finish()
}

/// Catalog text → bucketed faction.
pub fn faction_from_catalog(info: &FactionInfo, text: &str) -> Result<Faction, ParseError> {
    let entries = parse_catalog(text)?;
    let mut faction = Faction::new(info.id, info.name, info.color_tag);
    for (category, unit) in reconcile(entries) {
        faction.push(category, unit);
    }
    Ok(faction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Loadout, WargearOption};
    use crate::specs::catalog::CostInfo;

    fn extract(name: &str, base: &str, category: Category, loadout: &str) -> EntryExtract {
        EntryExtract {
            name: s!(name),
            base_name: s!(base),
            category,
            stats: s!("M6\""),
            cost: CostInfo { base: 80, min_size: Some(5), max_size: Some(10), per_model: Some(16) },
            abilities: strings!["Oath of Moment"],
            keywords: strings!["Infantry"],
            wargear_options: vec![WargearOption::new("Relic Shield", 15)],
            loadout: Loadout::new(loadout, strings!["Bolt rifle"]),
        }
    }

    #[test]
    fn variants_merge_and_duplicates_collapse() {
        let units = reconcile([
            extract("Intercessors with bolt rifles", "Intercessors", Category::Troops, "bolt rifles"),
            extract("Intercessors with Bolt Rifles", "Intercessors", Category::Elites, "Bolt Rifles"),
            extract("Intercessors with auto bolt rifles", "Intercessors", Category::Elites, "auto bolt rifles"),
        ]);
        assert_eq!(units.len(), 1);
        let (category, unit) = &units[0];
        assert_eq!(*category, Category::Troops);
        assert_eq!(unit.id, "intercessors");
        let ids: Vec<_> = unit.loadouts.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["bolt-rifles", "auto-bolt-rifles"]);
    }

    #[test]
    fn command_units_get_options_not_sizes() {
        let units = reconcile([
            extract("Captain", "Captain", Category::Characters, "Standard Loadout"),
            extract("Tactical Squad", "Tactical Squad", Category::Troops, "Standard Loadout"),
        ]);
        let captain = &units[0].1;
        assert_eq!(captain.min_size, None);
        assert_eq!(captain.per_model_cost, None);
        assert_eq!(captain.wargear_options.len(), 1);

        let squad = &units[1].1;
        assert_eq!(squad.min_size, Some(5));
        assert_eq!(squad.max_size, Some(10));
        assert_eq!(squad.per_model_cost, Some(16));
        assert!(squad.wargear_options.is_empty());
    }

    #[test]
    fn encounter_order_is_kept() {
        let units = reconcile([
            extract("B", "Bravo", Category::Troops, "x"),
            extract("A", "Alpha", Category::Troops, "x"),
            extract("B2", "Bravo", Category::Troops, "y"),
        ]);
        let names: Vec<_> = units.iter().map(|(_, u)| u.name.as_str()).collect();
        assert_eq!(names, vec!["Bravo", "Alpha"]);
    }
}
