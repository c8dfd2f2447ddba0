// src/factions.rs
//! Closed table of known factions: internal id → catalog file name and
//! display metadata. Ids missing from this table do not exist.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactionInfo {
    pub id: &'static str,
    pub file_name: &'static str,
    pub name: &'static str,
    pub color_tag: &'static str,
}

/// Color tag for factions that only exist in a reference table.
pub const DEFAULT_COLOR_TAG: &str = "default";

/// Ingestion order is table order.
pub const FACTIONS: &[FactionInfo] = &[
    FactionInfo { id: "space-marines", file_name: "Imperium - Space Marines.cat", name: "Space Marines", color_tag: "accent" },
    FactionInfo { id: "astra-militarum", file_name: "Imperium - Astra Militarum.cat", name: "Astra Militarum", color_tag: "secondary" },
    FactionInfo { id: "custodes", file_name: "Imperium - Adeptus Custodes.cat", name: "Adeptus Custodes", color_tag: "default" },
    FactionInfo { id: "grey-knights", file_name: "Imperium - Grey Knights.cat", name: "Grey Knights", color_tag: "outline" },
    FactionInfo { id: "agents-imperium", file_name: "Imperium - Agents of the Imperium.cat", name: "Agents of the Imperium", color_tag: "secondary" },
    FactionInfo { id: "imperial-knights", file_name: "Imperium - Imperial Knights.cat", name: "Imperial Knights", color_tag: "accent" },
    FactionInfo { id: "adepta-sororitas", file_name: "Imperium - Adepta Sororitas.cat", name: "Adepta Sororitas", color_tag: "destructive" },
    FactionInfo { id: "adeptus-mechanicus", file_name: "Imperium - Adeptus Mechanicus.cat", name: "Adeptus Mechanicus", color_tag: "destructive" },
    FactionInfo { id: "black-templars", file_name: "Imperium - Black Templars.cat", name: "Black Templars", color_tag: "default" },
    FactionInfo { id: "blood-angels", file_name: "Imperium - Blood Angels.cat", name: "Blood Angels", color_tag: "destructive" },
    FactionInfo { id: "dark-angels", file_name: "Imperium - Dark Angels.cat", name: "Dark Angels", color_tag: "secondary" },
    FactionInfo { id: "deathwatch", file_name: "Imperium - Deathwatch.cat", name: "Deathwatch", color_tag: "default" },
    FactionInfo { id: "imperial-fists", file_name: "Imperium - Imperial Fists.cat", name: "Imperial Fists", color_tag: "accent" },
    FactionInfo { id: "iron-hands", file_name: "Imperium - Iron Hands.cat", name: "Iron Hands", color_tag: "default" },
    FactionInfo { id: "raven-guard", file_name: "Imperium - Raven Guard.cat", name: "Raven Guard", color_tag: "default" },
    FactionInfo { id: "salamanders", file_name: "Imperium - Salamanders.cat", name: "Salamanders", color_tag: "accent" },
    FactionInfo { id: "space-wolves", file_name: "Imperium - Space Wolves.cat", name: "Space Wolves", color_tag: "secondary" },
    FactionInfo { id: "ultramarines", file_name: "Imperium - Ultramarines.cat", name: "Ultramarines", color_tag: "accent" },
    FactionInfo { id: "white-scars", file_name: "Imperium - White Scars.cat", name: "White Scars", color_tag: "accent" },
    FactionInfo { id: "chaos-knights", file_name: "Chaos - Chaos Knights.cat", name: "Chaos Knights", color_tag: "destructive" },
    FactionInfo { id: "chaos-space-marines", file_name: "Chaos - Chaos Space Marines.cat", name: "Chaos Space Marines", color_tag: "destructive" },
    FactionInfo { id: "death-guard", file_name: "Chaos - Death Guard.cat", name: "Death Guard", color_tag: "destructive" },
    FactionInfo { id: "thousand-sons", file_name: "Chaos - Thousand Sons.cat", name: "Thousand Sons", color_tag: "destructive" },
    FactionInfo { id: "world-eaters", file_name: "Chaos - World Eaters.cat", name: "World Eaters", color_tag: "destructive" },
    FactionInfo { id: "chaos-daemons", file_name: "Chaos - Chaos Daemons.cat", name: "Chaos Daemons", color_tag: "destructive" },
    FactionInfo { id: "emperors-children", file_name: "Chaos - Emperor's Children.cat", name: "Emperor's Children", color_tag: "destructive" },
    FactionInfo { id: "aeldari-craftworlds", file_name: "Aeldari - Craftworlds.cat", name: "Aeldari - Craftworlds", color_tag: "accent" },
    FactionInfo { id: "drukhari", file_name: "Aeldari - Drukhari.cat", name: "Drukhari", color_tag: "destructive" },
    FactionInfo { id: "ynnari", file_name: "Aeldari - Ynnari.cat", name: "Ynnari", color_tag: "accent" },
    FactionInfo { id: "necrons", file_name: "Necrons.cat", name: "Necrons", color_tag: "secondary" },
    FactionInfo { id: "orks", file_name: "Orks.cat", name: "Orks", color_tag: "destructive" },
    FactionInfo { id: "tau-empire", file_name: "T'au Empire.cat", name: "T'au Empire", color_tag: "accent" },
    FactionInfo { id: "tyranids", file_name: "Tyranids.cat", name: "Tyranids", color_tag: "destructive" },
    FactionInfo { id: "genestealer-cults", file_name: "Genestealer Cults.cat", name: "Genestealer Cults", color_tag: "destructive" },
    FactionInfo { id: "leagues-of-votann", file_name: "Leagues of Votann.cat", name: "Leagues of Votann", color_tag: "secondary" },
    FactionInfo { id: "unaligned-forces", file_name: "Unaligned Forces.cat", name: "Unaligned Forces", color_tag: "outline" },
];

pub fn all() -> &'static [FactionInfo] {
    FACTIONS
}

pub fn lookup(id: &str) -> Option<&'static FactionInfo> {
    FACTIONS.iter().find(|f| f.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_and_files_are_unique() {
        let ids: HashSet<_> = FACTIONS.iter().map(|f| f.id).collect();
        let files: HashSet<_> = FACTIONS.iter().map(|f| f.file_name).collect();
        assert_eq!(ids.len(), FACTIONS.len());
        assert_eq!(files.len(), FACTIONS.len());
        assert!(FACTIONS.iter().all(|f| f.file_name.ends_with(".cat")));
    }

    #[test]
    fn lookup_is_closed() {
        let sm = lookup("space-marines").unwrap();
        assert_eq!(sm.file_name, "Imperium - Space Marines.cat");
        assert_eq!(sm.color_tag, "accent");
        assert!(lookup("squats").is_none());
    }
}
