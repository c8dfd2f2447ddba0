// src/army.rs
//! Army list: the consumer side of the catalog. Units are copied in at
//! their minimum size with their default loadout; every edit keeps the
//! entry inside the unit's size bounds so `total_points` only ever sees
//! valid sizes.

use std::fmt::Write as _;

use crate::error::ArmyError;
use crate::model::{total_points, Category, Faction, Unit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArmyEntry {
    pub unit: Unit,
    pub category: Category,
    pub size: u32,
    /// `None` only for units without any loadout.
    pub loadout_id: Option<String>,
    pub wargear: Vec<String>,
}

impl ArmyEntry {
    pub fn new(unit: &Unit, category: Category) -> Self {
        Self {
            unit: unit.clone(),
            category,
            size: unit.min_models(),
            loadout_id: unit.default_loadout().map(|l| l.id.clone()),
            wargear: Vec::new(),
        }
    }

    pub fn points(&self) -> u32 {
        total_points(&self.unit, self.size, &self.wargear)
    }

    pub fn loadout_name(&self) -> Option<&str> {
        let id = self.loadout_id.as_deref()?;
        self.unit.loadout(id).map(|l| l.name.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArmyList {
    pub faction_id: String,
    pub faction_name: String,
    pub entries: Vec<ArmyEntry>,
}

impl ArmyList {
    pub fn new(faction: &Faction) -> Self {
        Self { faction_id: faction.id.clone(), faction_name: faction.name.clone(), entries: Vec::new() }
    }

    /// Append a unit; returns its position.
    pub fn add(&mut self, unit: &Unit, category: Category) -> usize {
        self.entries.push(ArmyEntry::new(unit, category));
        self.entries.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<ArmyEntry, ArmyError> {
        if index >= self.entries.len() {
            return Err(ArmyError::NoSuchEntry(index));
        }
        Ok(self.entries.remove(index))
    }

    pub fn entry(&self, index: usize) -> Result<&ArmyEntry, ArmyError> {
        self.entries.get(index).ok_or(ArmyError::NoSuchEntry(index))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ArmyEntry, ArmyError> {
        self.entries.get_mut(index).ok_or(ArmyError::NoSuchEntry(index))
    }

    /// Set a size, clamped into the unit's bounds. Returns the size applied.
    pub fn set_size(&mut self, index: usize, size: u32) -> Result<u32, ArmyError> {
        let entry = self.entry_mut(index)?;
        entry.size = entry.unit.clamp_size(size);
        Ok(entry.size)
    }

    /// +/- stepper; clamps like `set_size`.
    pub fn adjust_size(&mut self, index: usize, delta: i32) -> Result<u32, ArmyError> {
        let current = self.entry(index)?.size;
        let wanted = current.saturating_add_signed(delta);
        self.set_size(index, wanted)
    }

    pub fn select_loadout(&mut self, index: usize, loadout_id: &str) -> Result<(), ArmyError> {
        let entry = self.entry_mut(index)?;
        if entry.unit.loadout(loadout_id).is_none() {
            return Err(ArmyError::UnknownLoadout {
                unit: entry.unit.name.clone(),
                loadout: s!(loadout_id),
            });
        }
        entry.loadout_id = Some(s!(loadout_id));
        Ok(())
    }

    /// Flip one wargear option; returns whether it is now selected.
    pub fn toggle_wargear(&mut self, index: usize, option_id: &str) -> Result<bool, ArmyError> {
        let entry = self.entry_mut(index)?;
        if entry.unit.wargear_option(option_id).is_none() {
            return Err(ArmyError::UnknownWargear {
                unit: entry.unit.name.clone(),
                option: s!(option_id),
            });
        }
        if let Some(at) = entry.wargear.iter().position(|w| w == option_id) {
            entry.wargear.remove(at);
            Ok(false)
        } else {
            entry.wargear.push(s!(option_id));
            Ok(true)
        }
    }

    pub fn entry_points(&self, index: usize) -> Result<u32, ArmyError> {
        Ok(self.entry(index)?.points())
    }

    pub fn total_points(&self) -> u32 {
        self.entries.iter().map(ArmyEntry::points).fold(0, u32::saturating_add)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text roster, grouped in category display order.
    pub fn export_text(&self) -> String {
        let mut out = s!();
        let _ = writeln!(out, "{} - {} points", self.faction_name, self.total_points());

        for category in Category::ALL {
            let mut rows = self.entries.iter().filter(|e| e.category == category).peekable();
            if rows.peek().is_none() {
                continue;
            }
            let _ = writeln!(out, "\n{category}");
            for e in rows {
                let _ = write!(out, "  {}", e.unit.name);
                if e.unit.max_models() > 1 {
                    let _ = write!(out, " x{}", e.size);
                }
                let _ = writeln!(out, " ({} pts)", e.points());
                if let Some(name) = e.loadout_name() {
                    let _ = writeln!(out, "    Loadout: {name}");
                }
                for id in &e.wargear {
                    if let Some(o) = e.unit.wargear_option(id) {
                        let _ = writeln!(out, "    + {} ({} pts)", o.name, o.points);
                    }
                }
            }
        }
        out
    }
}
