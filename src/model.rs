// src/model.rs
//! Canonical roster schema shared by both ingestion pipelines.
//!
//! Units and loadouts are built once per ingestion pass and treated as
//! read-only snapshots afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::sanitize::slugify;

/// Roster-role buckets. Declaration order is the fixed display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    EpicHeroes,
    Characters,
    Troops,
    Elites,
    FastAttack,
    HeavySupport,
    Flyer,
    Transport,
    Fortification,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::EpicHeroes,
        Category::Characters,
        Category::Troops,
        Category::Elites,
        Category::FastAttack,
        Category::HeavySupport,
        Category::Flyer,
        Category::Transport,
        Category::Fortification,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::EpicHeroes => "epic-heroes",
            Category::Characters => "characters",
            Category::Troops => "troops",
            Category::Elites => "elites",
            Category::FastAttack => "fast-attack",
            Category::HeavySupport => "heavy-support",
            Category::Flyer => "flyer",
            Category::Transport => "transport",
            Category::Fortification => "fortification",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::EpicHeroes => "Epic Heroes",
            Category::Characters => "Characters",
            Category::Troops => "Troops",
            Category::Elites => "Elites",
            Category::FastAttack => "Fast Attack",
            Category::HeavySupport => "Heavy Support",
            Category::Flyer => "Flyer",
            Category::Transport => "Transport",
            Category::Fortification => "Fortification",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Command staff: no squad size, may carry priced wargear options.
    pub fn is_command(self) -> bool {
        matches!(self, Category::EpicHeroes | Category::Characters)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loadout {
    pub id: String,
    pub name: String,
    pub wargear_list: Vec<String>,
}

impl Loadout {
    pub fn new(name: &str, wargear_list: Vec<String>) -> Self {
        Self { id: slugify(name), name: s!(name), wargear_list }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WargearOption {
    pub id: String,
    pub name: String,
    pub points: u32,
}

impl WargearOption {
    pub fn new(name: &str, points: u32) -> Self {
        Self { id: slugify(name), name: s!(name), points }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub base_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_model_cost: Option<u32>,
    pub stat_summary: String,
    pub abilities: Vec<String>,
    pub keywords: Vec<String>,
    pub loadouts: Vec<Loadout>,
    #[serde(default)]
    pub wargear_options: Vec<WargearOption>,
}

impl Unit {
    /// Bare unit with an id derived from `name`; everything else empty.
    pub fn new(name: &str, base_points: u32) -> Self {
        Self {
            id: slugify(name),
            name: s!(name),
            base_points,
            min_size: None,
            max_size: None,
            per_model_cost: None,
            stat_summary: s!(),
            abilities: Vec::new(),
            keywords: Vec::new(),
            loadouts: Vec::new(),
            wargear_options: Vec::new(),
        }
    }

    pub fn with_sizes(mut self, min: u32, max: u32, per_model: u32) -> Self {
        self.min_size = Some(min);
        self.max_size = Some(max);
        self.per_model_cost = Some(per_model);
        self
    }

    pub fn with_stats(mut self, stats: &str) -> Self {
        self.stat_summary = s!(stats);
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<String>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadouts.push(loadout);
        self
    }

    pub fn with_option(mut self, option: WargearOption) -> Self {
        self.wargear_options.push(option);
        self
    }

    /// Absent min size means a fixed single-model unit.
    pub fn min_models(&self) -> u32 {
        self.min_size.unwrap_or(1)
    }

    pub fn max_models(&self) -> u32 {
        self.max_size.unwrap_or(0).max(self.min_models())
    }

    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_models(), self.max_models())
    }

    pub fn default_loadout(&self) -> Option<&Loadout> {
        self.loadouts.first()
    }

    pub fn loadout(&self, id: &str) -> Option<&Loadout> {
        self.loadouts.iter().find(|l| l.id == id)
    }

    pub fn wargear_option(&self, id: &str) -> Option<&WargearOption> {
        self.wargear_options.iter().find(|o| o.id == id)
    }
}

/// Point total for one configured unit:
/// `base + per_model × (size − min) + Σ selected option points`.
///
/// Callers clamp `size` into `[min_models, max_models]` first; a size below
/// the minimum contributes no per-model cost rather than wrapping.
pub fn total_points<S: AsRef<str>>(unit: &Unit, size: u32, selected_wargear: &[S]) -> u32 {
    let per_model = unit.per_model_cost.unwrap_or(0);
    let extra_models = size.saturating_sub(unit.min_models());
    let options: u32 = unit
        .wargear_options
        .iter()
        .filter(|o| selected_wargear.iter().any(|id| id.as_ref() == o.id))
        .fold(0u32, |acc, o| acc.saturating_add(o.points));
    unit.base_points
        .saturating_add(per_model.saturating_mul(extra_models))
        .saturating_add(options)
}

/// Display metadata for one faction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionSummary {
    pub id: String,
    pub name: String,
    pub color_tag: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    pub id: String,
    pub name: String,
    pub color_tag: String,
    pub units: BTreeMap<Category, Vec<Unit>>,
}

impl Faction {
    /// Empty faction with every category bucket present.
    pub fn new(id: &str, name: &str, color_tag: &str) -> Self {
        Self {
            id: s!(id),
            name: s!(name),
            color_tag: s!(color_tag),
            units: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, category: Category, unit: Unit) {
        self.units.entry(category).or_default().push(unit);
    }

    pub fn units_in(&self, category: Category) -> &[Unit] {
        self.units.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every unit with its bucket, in category display order.
    pub fn iter_units(&self) -> impl Iterator<Item = (Category, &Unit)> {
        self.units.iter().flat_map(|(c, units)| units.iter().map(move |u| (*c, u)))
    }

    pub fn find_unit(&self, unit_id: &str) -> Option<(Category, &Unit)> {
        self.iter_units().find(|(_, u)| u.id == unit_id)
    }

    pub fn unit_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    pub fn summary(&self) -> FactionSummary {
        FactionSummary { id: self.id.clone(), name: self.name.clone(), color_tag: self.color_tag.clone() }
    }
}
