// src/specs/reference.rs
//! Reference-table *spec*: the hand-maintained points table.
//!
//! The table only knows names, model counts and points, so every unit comes
//! out with sentinel stats and abilities and one loadout per variation.
//! Categories come from `heuristics::reference_category`, never from the
//! catalog heuristics.

use serde::Deserialize;

use crate::core::sanitize::{leading_int, round_div};
use crate::error::ReferenceError;
use crate::factions::{self, DEFAULT_COLOR_TAG};
use crate::model::{Faction, Loadout, Unit};
use crate::specs::heuristics::reference_category;

pub const NOT_YET_AVAILABLE: &str = "Not yet available";

const EMBEDDED: &str = include_str!("../../data/reference_table.json");

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceTable {
    pub factions: Vec<ReferenceFaction>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceFaction {
    pub id: String,
    pub name: String,
    pub units: Vec<ReferenceRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceRow {
    pub name: String,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Variation {
    /// Model count as printed, sometimes descriptive: "10 (1 SB, 5 Init.)".
    pub models: String,
    pub points: u32,
}

impl Variation {
    /// Leading integer of the count; missing or zero counts as one model.
    pub fn model_count(&self) -> u32 {
        leading_int(&self.models).filter(|n| *n > 0).unwrap_or(1)
    }
}

impl ReferenceTable {
    /// The table compiled into the crate.
    pub fn embedded() -> Result<Self, ReferenceError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(text: &str) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn faction(&self, id: &str) -> Option<&ReferenceFaction> {
        self.factions.iter().find(|f| f.id == id)
    }

    /// Every faction in table order.
    pub fn to_factions(&self) -> Vec<Faction> {
        self.factions.iter().map(ReferenceFaction::to_faction).collect()
    }
}

impl ReferenceFaction {
    pub fn to_faction(&self) -> Faction {
        // color from the faction table, name as the reference table spells it
        let color = factions::lookup(&self.id).map_or(DEFAULT_COLOR_TAG, |f| f.color_tag);
        let mut faction = Faction::new(&self.id, &self.name, color);
        for row in &self.units {
            if let Some(unit) = row.to_unit() {
                faction.push(reference_category(&row.name), unit);
            }
        }
        faction
    }
}

impl ReferenceRow {
    /// `None` for a row with no variations.
    pub fn to_unit(&self) -> Option<Unit> {
        let first = self.variations.first()?;
        let min = first.model_count();

        let mut unit = Unit::new(&self.name, first.points)
            .with_stats(NOT_YET_AVAILABLE)
            .with_abilities(strings![NOT_YET_AVAILABLE]);
        unit.min_size = Some(min);

        if self.variations.len() > 1 {
            unit.max_size = self.variations.iter().map(Variation::model_count).max();
            unit.per_model_cost = Some(round_div(first.points, min));
        }

        for (i, v) in self.variations.iter().enumerate() {
            let label = format!("{} models", v.models.trim());
            unit.loadouts.push(Loadout {
                id: format!("variation-{i}"),
                wargear_list: vec![format!("{label} - {} points", v.points)],
                name: label,
            });
        }
        Some(unit)
    }
}
