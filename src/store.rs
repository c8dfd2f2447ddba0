// src/store.rs
//! Faction catalog store: runs one ingestion pass, keeps the result, serves
//! reads.
//!
//! - `load()` never fails. A pass that yields nothing degrades to the
//!   embedded fallback dataset.
//! - At most one pass runs at a time. Callers arriving while a pass is in
//!   flight wait on the same gate and then read its snapshot.
//! - The durable cache is best-effort: misses, corrupt entries and write
//!   failures are logged and otherwise ignored.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::consts::CACHE_KEY;
use crate::config::options::{CachePolicy, FetchOptions, StoreOptions, Strategy};
use crate::core::net::{DirFetcher, DocumentFetcher, HttpFetcher};
use crate::error::{CacheError, FetchError};
use crate::factions::{self, FactionInfo};
use crate::fallback;
use crate::model::{Faction, FactionSummary};
use crate::progress::{NullProgress, Progress};
use crate::scrape;
use crate::specs::heuristics::HEURISTICS_VERSION;
use crate::specs::reference::ReferenceTable;

/// Where a loaded catalog came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Every faction parsed from its catalog document.
    Catalog,
    /// Reference-table strategy.
    Reference,
    /// Catalog pass with some factions substituted from the reference table.
    Mixed,
    /// Read back from the durable cache.
    Cache,
    /// Embedded fallback dataset.
    Fallback,
}

/// One immutable load result.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Insertion order of the pass.
    pub factions: Vec<Faction>,
    pub source: Source,
    /// Epoch millis of the pass (or of the cached pass).
    pub loaded_at_ms: u64,
}

impl Catalog {
    fn new(factions: Vec<Faction>, source: Source) -> Self {
        Self { factions, source, loaded_at_ms: now_ms() }
    }

    pub fn get(&self, id: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn list(&self) -> Vec<FactionSummary> {
        self.factions.iter().map(Faction::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/* ---------------- Durable cache ---------------- */

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    data: IndexMap<&'a str, &'a Faction>,
    timestamp: u64,
}

#[derive(Deserialize)]
struct Envelope {
    data: IndexMap<String, Faction>,
    timestamp: u64,
}

/// `<store_dir>/<CACHE_KEY>.json` holding `{ data, timestamp }`, where
/// `data` maps faction id to faction in load order.
#[derive(Clone, Debug)]
pub struct DiskCache {
    path: PathBuf,
}

impl DiskCache {
    pub fn new(store_dir: impl AsRef<Path>) -> Self {
        Self { path: store_dir.as_ref().join(format!("{CACHE_KEY}.json")) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` on a missing or unreadable entry.
    pub async fn read(&self) -> Option<(Vec<Faction>, u64)> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) => {
                logd!("Cache miss ({}): {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(env) => Some((env.data.into_values().collect(), env.timestamp)),
            Err(e) => {
                logw!("Ignoring corrupt cache entry {}: {e}", self.path.display());
                None
            }
        }
    }

    pub async fn write(&self, factions: &[Faction], timestamp: u64) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = factions.iter().map(|f| (f.id.as_str(), f)).collect();
        let bytes = serde_json::to_vec(&EnvelopeRef { data, timestamp })?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    /// Removing an entry that is not there is fine.
    pub async fn clear(&self) -> Result<(), CacheError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/* ---------------- Store ---------------- */

pub struct FactionStore {
    options: StoreOptions,
    fetcher: Arc<dyn DocumentFetcher>,
    roster: Vec<FactionInfo>,
    reference: Option<ReferenceTable>,
    cache: Option<DiskCache>,
    /// Single-flight gate; also owns the progress sink of the running pass.
    gate: Mutex<Box<dyn Progress>>,
    snapshot: RwLock<Option<Arc<Catalog>>>,
}

impl FactionStore {
    /// Full faction roster, embedded reference table, disk cache under
    /// `options.store_dir`.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, options: StoreOptions) -> Self {
        let reference = match ReferenceTable::embedded() {
            Ok(t) => Some(t),
            Err(e) => {
                loge!("Embedded reference table unusable: {e}");
                None
            }
        };
        let cache = Some(DiskCache::new(&options.store_dir));
        Self {
            options,
            fetcher,
            roster: factions::all().to_vec(),
            reference,
            cache,
            gate: Mutex::new(Box::new(NullProgress)),
            snapshot: RwLock::new(None),
        }
    }

    /// Store backed by the remote catalog repository.
    pub fn http(options: StoreOptions, fetch: &FetchOptions) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpFetcher::new(fetch)?), options))
    }

    /// Store backed by a local checkout of the catalog repository.
    pub fn from_dir(dir: impl AsRef<Path>, options: StoreOptions) -> Self {
        Self::new(Arc::new(DirFetcher::new(dir)), options)
    }

    pub fn with_roster(mut self, roster: Vec<FactionInfo>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_reference_table(mut self, table: Option<ReferenceTable>) -> Self {
        self.reference = table;
        self
    }

    pub fn with_cache(mut self, cache: Option<DiskCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.gate = Mutex::new(progress);
        self
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Current catalog without triggering a load.
    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_snapshot(&self, catalog: Option<Arc<Catalog>>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = catalog;
    }

    /// Loaded catalog, running an ingestion pass first if there is none.
    pub async fn load(&self) -> Arc<Catalog> {
        if let Some(catalog) = self.snapshot() {
            return catalog;
        }
        let mut progress = self.gate.lock().await;
        // a pass may have finished while we waited on the gate
        if let Some(catalog) = self.snapshot() {
            return catalog;
        }
        let catalog = Arc::new(self.ingest(&mut **progress).await);
        self.set_snapshot(Some(Arc::clone(&catalog)));
        catalog
    }

    /// `None` is the "no such faction" answer.
    pub async fn get(&self, faction_id: &str) -> Option<Faction> {
        self.load().await.get(faction_id).cloned()
    }

    pub async fn list(&self) -> Vec<FactionSummary> {
        self.load().await.list()
    }

    /// Drop the in-memory catalog; the next `load()` runs a new pass.
    pub fn invalidate(&self) {
        self.set_snapshot(None);
    }

    /// Remove the durable cache entry.
    pub async fn clear_cache(&self) -> Result<(), CacheError> {
        match &self.cache {
            Some(cache) => cache.clear().await,
            None => Ok(()),
        }
    }

    fn disk(&self) -> Option<&DiskCache> {
        self.cache.as_ref().filter(|_| self.options.cache != CachePolicy::Off)
    }

    async fn ingest(&self, progress: &mut dyn Progress) -> Catalog {
        let started = Instant::now();

        if let Some(cache) = self.disk() {
            match self.options.cache {
                CachePolicy::Reuse => {
                    if let Some((factions, timestamp)) = cache.read().await {
                        if !factions.is_empty() {
                            logf!("Loaded {} factions from cache", factions.len());
                            return Catalog { factions, source: Source::Cache, loaded_at_ms: timestamp };
                        }
                    }
                }
                CachePolicy::Refresh => {
                    if let Err(e) = cache.clear().await {
                        logw!("Could not clear cache: {e}");
                    }
                }
                CachePolicy::Off => {}
            }
        }

        logf!(
            "Starting ingestion pass ({:?}, heuristics v{HEURISTICS_VERSION})",
            self.options.strategy
        );
        let (factions, source) = match self.options.strategy {
            Strategy::Catalog => self.ingest_catalogs(progress).await,
            Strategy::Reference => match &self.reference {
                Some(table) => (scrape::collect_reference(table, Some(progress)), Source::Reference),
                None => (Vec::new(), Source::Reference),
            },
        };

        if factions.is_empty() {
            logw!("Ingestion produced no factions; serving the embedded fallback");
            return Catalog::new(fallback::factions(), Source::Fallback);
        }

        let catalog = Catalog::new(factions, source);
        logf!(
            "Loaded {} factions ({:?}) in {:.2?}",
            catalog.len(),
            catalog.source,
            started.elapsed()
        );

        if let Some(cache) = self.disk() {
            if let Err(e) = cache.write(&catalog.factions, catalog.loaded_at_ms).await {
                logw!("Could not persist catalog to {}: {e}", cache.path().display());
            }
        }
        catalog
    }

    /// Catalog pass with per-faction reference substitution.
    async fn ingest_catalogs(&self, progress: &mut dyn Progress) -> (Vec<Faction>, Source) {
        let outcomes = scrape::collect_catalogs(
            self.fetcher.as_ref(),
            &self.roster,
            self.options.request_pause,
            Some(progress),
        )
        .await;

        let mut factions = Vec::with_capacity(outcomes.len());
        let (mut parsed, mut substituted) = (0usize, 0usize);
        for outcome in outcomes {
            match outcome.result {
                Ok(faction) => {
                    parsed += 1;
                    factions.push(faction);
                }
                Err(_) if self.options.reference_fallback => {
                    let substitute = self.reference.as_ref().and_then(|t| t.faction(outcome.info.id));
                    if let Some(rf) = substitute {
                        logw!("{}: using reference table instead", outcome.info.name);
                        factions.push(rf.to_faction());
                        substituted += 1;
                    }
                }
                Err(_) => {}
            }
        }

        let source = match (parsed, substituted) {
            (_, 0) => Source::Catalog,
            (0, _) => Source::Reference,
            _ => Source::Mixed,
        };
        (factions, source)
    }
}
