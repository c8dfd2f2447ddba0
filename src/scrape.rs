// src/scrape.rs
//! Multi-faction ingestion drives (no caching, no fallback decisions).
//!
//! The catalog drive is sequential on purpose: one fetch at a time with a
//! polite pause between successive requests to keep the upstream host from
//! rate-limiting us.

use std::time::Duration;

use crate::core::net::DocumentFetcher;
use crate::error::IngestError;
use crate::factions::FactionInfo;
use crate::model::Faction;
use crate::progress::Progress;
use crate::reconcile::faction_from_catalog;
use crate::specs::reference::ReferenceTable;

/// Result for one roster entry.
#[derive(Debug)]
pub struct FactionOutcome {
    pub info: FactionInfo,
    pub result: Result<Faction, IngestError>,
}

/// Fetch, parse and reconcile one faction.
pub async fn ingest_faction(
    fetcher: &dyn DocumentFetcher,
    info: &FactionInfo,
) -> Result<Faction, IngestError> {
    let text = fetcher.fetch(info.file_name).await?;
    faction_from_catalog(info, &text)
        .map_err(|source| IngestError::Parse { file_name: s!(info.file_name), source })
}

/// Run the catalog pipeline over `roster`, in roster order. One outcome per
/// entry; a failure never stops the pass.
pub async fn collect_catalogs(
    fetcher: &dyn DocumentFetcher,
    roster: &[FactionInfo],
    pause: Duration,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<FactionOutcome> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(roster.len());
        p.log("Fetching catalogs…");
    }

    let mut out = Vec::with_capacity(roster.len());
    for (i, info) in roster.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await; // be polite
        }

        let result = ingest_faction(fetcher, info).await;
        match &result {
            Ok(faction) => {
                logf!("Parsed {} ({} units)", faction.name, faction.unit_count());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(info.id, info.name);
                }
            }
            Err(e) => {
                loge!("Faction {}: {e}", info.id);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(info.id, info.name);
                    p.log(&format!("{}: {e}", info.name));
                }
            }
        }
        out.push(FactionOutcome { info: *info, result });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}

/// Convert every faction of the reference table, in table order.
pub fn collect_reference(
    table: &ReferenceTable,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<Faction> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(table.factions.len());
        p.log("Converting reference table…");
    }

    let mut out = Vec::with_capacity(table.factions.len());
    for rf in &table.factions {
        let faction = rf.to_faction();
        logd!("Reference {} ({} units)", faction.name, faction.unit_count());
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&faction.id, &faction.name);
        }
        out.push(faction);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchCause, FetchError};
    use crate::factions;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl DocumentFetcher for MapFetcher {
        async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
            self.0
                .get(file_name)
                .map(|t| s!(*t))
                .ok_or_else(|| FetchError::new(file_name, FetchCause::NotFound))
        }
    }

    #[derive(Default)]
    struct Recorder {
        done: Vec<String>,
        failed: Vec<String>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn item_done(&mut self, id: &str, _name: &str) {
            self.done.push(s!(id));
        }
        fn item_failed(&mut self, id: &str, _name: &str) {
            self.failed.push(s!(id));
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_pass() {
        let roster = [
            *factions::lookup("orks").unwrap(),
            *factions::lookup("necrons").unwrap(),
            *factions::lookup("tyranids").unwrap(),
        ];
        let fetcher = MapFetcher(HashMap::from([
            ("Orks.cat", r#"<catalogue><selectionEntry type="unit" name="Boyz"/></catalogue>"#),
            ("Tyranids.cat", "<catalogue><broken></catalogue>"),
        ]));
        let mut rec = Recorder::default();

        let out = collect_catalogs(&fetcher, &roster, Duration::ZERO, Some(&mut rec)).await;

        let ids: Vec<_> = out.iter().map(|o| o.info.id).collect();
        assert_eq!(ids, vec!["orks", "necrons", "tyranids"]);
        assert_eq!(out[0].result.as_ref().unwrap().unit_count(), 1);
        assert!(matches!(out[1].result, Err(IngestError::Fetch(_))));
        assert!(matches!(out[2].result, Err(IngestError::Parse { .. })));
        assert_eq!(rec.done, vec!["orks"]);
        assert_eq!(rec.failed, vec!["necrons", "tyranids"]);
        assert!(rec.finished);
    }
}
