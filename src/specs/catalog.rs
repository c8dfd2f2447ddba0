// src/specs/catalog.rs
//! Catalog *spec*: reading one faction's catalog document.
//!
//! Purpose:
//! - Turn the parsed document tree into one [`EntryExtract`] per unit
//!   candidate, in document order.
//! - Every field has a documented default, so a thin or odd entry still
//!   yields a usable extract (see the sentinel consts below).
//!
//! Unit candidates are selection entries that are not nested inside another
//! selection entry. Root-level entries typed `upgrade` are shared wargear,
//! not units. Nested entries feed their owner's wargear, profiles, rules and
//! options.
//!
//! Non-responsibilities: merging weapon variants (`reconcile`), fetching,
//! caching.

use crate::core::sanitize::{find_ci, parse_number, round_div};
use crate::core::xml::{parse_document, Document, Node, NodeKind, Visit};
use crate::error::ParseError;
use crate::model::{Category, Loadout, WargearOption};
use crate::specs::heuristics::{
    base_name, category_for_ref, category_from_refs, is_command_title, is_legacy,
    is_loadout_weapon, is_wargear_item, stat_abbreviation,
};

pub const STATS_UNAVAILABLE: &str = "No stats available";
pub const NO_ABILITIES: &str = "No special abilities";
pub const STANDARD_EQUIPMENT: &str = "Standard Equipment";
pub const STANDARD_LOADOUT: &str = "Standard Loadout";

const UNIT_PROFILE: &str = "Unit";
const ABILITIES_PROFILE: &str = "Abilities";

/// Points and squad size for one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CostInfo {
    pub base: u32,
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
    pub per_model: Option<u32>,
}

/// Everything read from one unit candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryExtract {
    /// Name as written in the document.
    pub name: String,
    /// Name with weapon descriptors stripped: the reconciliation key.
    pub base_name: String,
    pub category: Category,
    pub stats: String,
    pub cost: CostInfo,
    pub abilities: Vec<String>,
    pub keywords: Vec<String>,
    pub wargear_options: Vec<WargearOption>,
    pub loadout: Loadout,
}

/// Parse document text and extract every unit candidate.
pub fn parse_catalog(text: &str) -> Result<Vec<EntryExtract>, ParseError> {
    let doc = parse_document(text)?;
    Ok(extract_entries(&doc))
}

pub fn extract_entries(doc: &Document) -> Vec<EntryExtract> {
    unit_candidates(&doc.root).into_iter().filter_map(extract_entry).collect()
}

fn unit_candidates(root: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    root.walk(&mut |node| {
        if node.kind != NodeKind::Entry {
            return Visit::Descend;
        }
        if node.attr("type") != Some("upgrade") {
            out.push(node);
        }
        Visit::Skip
    });
    out
}

/// `None` for nameless and legacy entries.
pub fn extract_entry(entry: &Node) -> Option<EntryExtract> {
    let name = entry.name()?;
    if is_legacy(name) {
        return None;
    }
    let refs: Vec<&str> = entry.scoped(NodeKind::CategoryRef).into_iter().filter_map(Node::name).collect();

    Some(EntryExtract {
        name: s!(name),
        base_name: base_name(name),
        category: category(name, &refs),
        stats: stat_summary(entry),
        cost: cost_info(entry),
        abilities: abilities(entry),
        keywords: keywords(&refs),
        wargear_options: wargear_options(entry),
        loadout: loadout(entry, name),
    })
}

fn category(name: &str, refs: &[&str]) -> Category {
    category_from_refs(refs.iter().copied())
        .or_else(|| is_command_title(name).then_some(Category::Characters))
        .unwrap_or(Category::Troops)
}

fn keywords(refs: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in refs {
        if category_for_ref(r).is_none() && !out.iter().any(|k| k == r) {
            out.push(s!(*r));
        }
    }
    out
}

fn is_profile_type(node: &Node, type_name: &str) -> bool {
    node.attr("typeName").is_some_and(|t| t.trim().eq_ignore_ascii_case(type_name))
}

fn stat_summary(entry: &Node) -> String {
    let Some(profile) = entry
        .descendants(NodeKind::Profile)
        .into_iter()
        .find(|p| is_profile_type(p, UNIT_PROFILE))
    else {
        return s!(STATS_UNAVAILABLE);
    };

    let stats: Vec<String> = profile
        .descendants(NodeKind::Characteristic)
        .into_iter()
        .filter_map(|c| {
            let abbr = stat_abbreviation(c.name()?)?;
            let text = c.text();
            let value = if !text.is_empty() {
                text
            } else {
                c.attr("value").map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).unwrap_or_else(|| s!("-"))
            };
            Some(join!(abbr, &value))
        })
        .collect();

    if stats.is_empty() { s!(STATS_UNAVAILABLE) } else { stats.join(" ") }
}

fn is_points_cost(node: &Node) -> bool {
    node.name()
        .map(|n| n.trim_end_matches('.').to_ascii_lowercase())
        .is_some_and(|n| n == "pts" || n == "points")
}

/// Sum of the entry's own point costs; non-positive values are ignored.
fn own_points(entry: &Node) -> u32 {
    entry
        .scoped(NodeKind::Cost)
        .into_iter()
        .filter(|c| is_points_cost(c))
        .filter_map(|c| parse_number(c.attr("value")?))
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .fold(0u32, u32::saturating_add)
}

fn is_size_field(node: &Node) -> bool {
    matches!(node.attr("field"), Some("selections") | Some("limit"))
}

/// Own min/max selection constraints; later constraints override earlier.
fn own_size_bounds(entry: &Node) -> (Option<u32>, Option<u32>) {
    let mut min = None;
    let mut max = None;
    for c in entry.scoped(NodeKind::Constraint).into_iter().filter(|c| is_size_field(c)) {
        let Some(value) = c.attr("value").and_then(parse_number).filter(|v| *v > 0) else {
            continue;
        };
        let value = u32::try_from(value).unwrap_or(u32::MAX);
        match c.attr("type") {
            Some("min") => min = Some(value),
            Some("max") => max = Some(value),
            _ => {}
        }
    }
    (min, max)
}

/// Squad bounds summed over nested `model` entries.
fn model_size_bounds(entry: &Node) -> (Option<u32>, Option<u32>) {
    let mut models = Vec::new();
    entry.walk(&mut |node| {
        if node.kind == NodeKind::Entry {
            if node.attr("type") == Some("model") {
                models.push(node);
            }
            return Visit::Skip;
        }
        Visit::Descend
    });

    let (mut min, mut max) = (0u32, 0u32);
    for model in models {
        let (lo, hi) = own_size_bounds(model);
        let lo = lo.unwrap_or(0);
        min = min.saturating_add(lo);
        max = max.saturating_add(hi.unwrap_or(lo));
    }
    let min = (min > 0).then_some(min);
    let max = (max > 0).then_some(max.max(min.unwrap_or(0)));
    (min, max)
}

fn has_per_model_modifier(entry: &Node) -> bool {
    entry.scoped(NodeKind::Modifier).into_iter().any(|m| {
        m.attr("type") == Some("multiply") && m.attr("field") == Some("selections")
    })
}

fn cost_info(entry: &Node) -> CostInfo {
    let base = own_points(entry);
    let (mut min_size, mut max_size) = own_size_bounds(entry);
    if min_size.is_none() && max_size.is_none() {
        (min_size, max_size) = model_size_bounds(entry);
    }

    let per_model = match min_size {
        Some(min) if has_per_model_modifier(entry) => Some(round_div(base, min)),
        Some(min) if min > 1 && base > 0 => Some(round_div(base, min)),
        _ => None,
    };

    CostInfo { base, min_size, max_size, per_model }
}

fn push_unique(out: &mut Vec<String>, item: &str) {
    if !out.iter().any(|x| x == item) {
        out.push(s!(item));
    }
}

fn abilities(entry: &Node) -> Vec<String> {
    let mut out = Vec::new();
    entry.walk(&mut |node: &Node| {
        let is_rule = match node.kind {
            NodeKind::Rule => true,
            NodeKind::InfoLink => node.attr("type") == Some("rule"),
            NodeKind::Profile => is_profile_type(node, ABILITIES_PROFILE),
            _ => false,
        };
        if is_rule {
            if let Some(name) = node.name() {
                push_unique(&mut out, name);
            }
        }
        Visit::Descend
    });
    if out.is_empty() {
        out.push(s!(NO_ABILITIES));
    }
    out
}

/// Every entry inside each nested option group, priced by its own costs.
fn wargear_options(entry: &Node) -> Vec<WargearOption> {
    let mut out: Vec<WargearOption> = Vec::new();
    for group in entry.descendants(NodeKind::OptionGroup) {
        let mut members = Vec::new();
        group.walk(&mut |node| match node.kind {
            NodeKind::Entry => {
                members.push(node);
                Visit::Skip
            }
            // visited on its own turn through `descendants`
            NodeKind::OptionGroup => Visit::Skip,
            _ => Visit::Descend,
        });
        for member in members {
            let Some(name) = member.name() else { continue };
            let option = WargearOption::new(name, own_points(member));
            if !out.iter().any(|o| o.id == option.id) {
                out.push(option);
            }
        }
    }
    out
}

fn is_weapon_profile(node: &Node) -> bool {
    node.attr("typeName").is_some_and(|t| t.to_ascii_lowercase().contains("weapon"))
}

fn loadout(entry: &Node, name: &str) -> Loadout {
    let mut wargear: Vec<String> = Vec::new();

    for profile in entry.descendants(NodeKind::Profile) {
        if is_weapon_profile(profile) {
            if let Some(n) = profile.name() {
                push_unique(&mut wargear, n);
            }
        }
    }

    entry.walk(&mut |node: &Node| {
        if matches!(node.kind, NodeKind::Entry | NodeKind::EntryLink) {
            if let Some(n) = node.name().filter(|n| is_wargear_item(n)) {
                push_unique(&mut wargear, n);
            }
        }
        Visit::Descend
    });

    if wargear.is_empty() {
        wargear.push(s!(STANDARD_EQUIPMENT));
    }
    let loadout_name = loadout_name(name, &wargear);
    Loadout::new(&loadout_name, wargear)
}

/// "X with Y" names the loadout Y; otherwise up to two weapons from the
/// wargear list; otherwise the standard name.
pub fn loadout_name(entry_name: &str, wargear: &[String]) -> String {
    if let Some(at) = find_ci(entry_name, " with ") {
        let phrase = entry_name[at + " with ".len()..].trim();
        if !phrase.is_empty() {
            return s!(phrase);
        }
    }

    let weapons: Vec<&str> =
        wargear.iter().map(String::as_str).filter(|w| is_loadout_weapon(w)).collect();
    match weapons.len() {
        0 => s!(STANDARD_LOADOUT),
        1 | 2 => weapons.join(" & "),
        _ => join!(&weapons[..2].join(" & "), " & more"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(xml: &str) -> Vec<EntryExtract> {
        parse_catalog(xml).unwrap()
    }

    #[test]
    fn legacy_and_nameless_entries_are_skipped() {
        let xml = r#"<catalogue><sharedSelectionEntries>
            <selectionEntry type="unit" name="Centurion Assault Squad [Legends]"/>
            <selectionEntry type="unit"/>
            <selectionEntry type="unit" name="Tactical Squad"/>
        </sharedSelectionEntries></catalogue>"#;
        let entries = extract(xml);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Tactical Squad");
    }

    #[test]
    fn root_upgrades_are_not_units() {
        let xml = r#"<catalogue><sharedSelectionEntries>
            <selectionEntry type="upgrade" name="Bolt pistol"/>
            <selectionEntry type="model" name="Captain"/>
        </sharedSelectionEntries></catalogue>"#;
        let names: Vec<_> = extract(xml).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Captain"]);
    }

    #[test]
    fn sentinels_for_thin_entries() {
        let xml = r#"<catalogue><selectionEntries>
            <selectionEntry type="unit" name="Servitors"/>
        </selectionEntries></catalogue>"#;
        let e = &extract(xml)[0];
        assert_eq!(e.stats, STATS_UNAVAILABLE);
        assert_eq!(e.abilities, vec![NO_ABILITIES]);
        assert_eq!(e.category, Category::Troops);
        assert_eq!(e.cost, CostInfo::default());
        assert_eq!(e.loadout.name, STANDARD_LOADOUT);
        assert_eq!(e.loadout.id, "standard-loadout");
        assert_eq!(e.loadout.wargear_list, vec![STANDARD_EQUIPMENT]);
    }

    #[test]
    fn costs_are_summed_and_garbage_is_zero() {
        let xml = r#"<catalogue><selectionEntries>
            <selectionEntry type="unit" name="Scouts">
              <costs>
                <cost name="pts" value="50"/>
                <cost name="Points" value="15.0"/>
                <cost name="pts" value="lots"/>
                <cost name="CP" value="1"/>
              </costs>
              <constraints>
                <constraint type="min" field="selections" value="5"/>
                <constraint type="max" field="selections" value="ten"/>
              </constraints>
            </selectionEntry>
        </selectionEntries></catalogue>"#;
        let e = &extract(xml)[0];
        assert_eq!(e.cost.base, 65);
        assert_eq!(e.cost.min_size, Some(5));
        assert_eq!(e.cost.max_size, None);
        assert_eq!(e.cost.per_model, Some(13));
    }

    #[test]
    fn multiply_modifier_sets_per_model_even_for_single_min() {
        let xml = r#"<catalogue><selectionEntries>
            <selectionEntry type="unit" name="Attack Bikes">
              <costs><cost name="pts" value="70"/></costs>
              <constraints>
                <constraint type="min" field="selections" value="1"/>
                <constraint type="max" field="selections" value="3"/>
              </constraints>
              <modifiers><modifier type="multiply" field="selections" value="1"/></modifiers>
            </selectionEntry>
        </selectionEntries></catalogue>"#;
        let e = &extract(xml)[0];
        assert_eq!(e.cost.per_model, Some(70));
    }

    #[test]
    fn oversized_model_constraints_saturate() {
        let xml = r#"<catalogue><selectionEntries>
            <selectionEntry type="unit" name="Ork Boyz">
              <costs><cost name="pts" value="10"/></costs>
              <selectionEntries>
                <selectionEntry type="model" name="Boss Nob">
                  <constraints><constraint type="min" field="selections" value="99999999999"/></constraints>
                </selectionEntry>
                <selectionEntry type="model" name="Boy">
                  <constraints><constraint type="min" field="selections" value="99999999999"/></constraints>
                </selectionEntry>
              </selectionEntries>
            </selectionEntry>
        </selectionEntries></catalogue>"#;
        let e = &extract(xml)[0];
        assert_eq!(e.cost.min_size, Some(u32::MAX));
        assert_eq!(e.cost.max_size, Some(u32::MAX));
        assert_eq!(e.cost.base, 10);
    }

    #[test]
    fn loadout_name_rules() {
        let gear = strings!["Frag grenades", "Bolt rifle", "Plasma pistol", "Heavy bolter"];
        assert_eq!(loadout_name("Intercessors with auto bolt rifles", &gear), "auto bolt rifles");
        assert_eq!(loadout_name("Intercessors", &gear), "Bolt rifle & Plasma pistol & more");
        assert_eq!(loadout_name("Intercessors", &gear[..2]), "Bolt rifle");
        assert_eq!(loadout_name("Forgewith Engine", &strings!["Frag grenades"]), STANDARD_LOADOUT);
    }

    #[test]
    fn stat_value_falls_back_to_attribute() {
        let xml = r#"<catalogue><selectionEntries>
            <selectionEntry type="model" name="Techmarine">
              <profiles><profile name="Techmarine" typeName="Unit"><characteristics>
                <characteristic name="Movement" value="6&quot;"/>
                <characteristic name="OC">1</characteristic>
                <characteristic name="Save"/>
              </characteristics></profile></profiles>
            </selectionEntry>
        </selectionEntries></catalogue>"#;
        let e = &extract(xml)[0];
        assert_eq!(e.stats, "M6\" Sv-");
        assert_eq!(e.category, Category::Characters);
    }
}
