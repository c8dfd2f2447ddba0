// tests/store_load.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use muster::core::DocumentFetcher;
use muster::error::FetchCause;
use muster::factions::{self, FactionInfo};
use muster::specs::reference::{ReferenceTable, NOT_YET_AVAILABLE};
use muster::{CachePolicy, DiskCache, FactionStore, FetchError, Source, StoreOptions, Strategy};

const FIXTURE: &str = include_str!("fixtures/space_marines.cat");

/// Serves the fixture for Space Marines; everything else is missing.
#[derive(Default)]
struct FixtureFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl DocumentFetcher for FixtureFetcher {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if file_name == "Imperium - Space Marines.cat" {
            Ok(FIXTURE.to_string())
        } else {
            Err(FetchError::new(file_name, FetchCause::NotFound))
        }
    }
}

fn roster(ids: &[&str]) -> Vec<FactionInfo> {
    ids.iter().map(|id| *factions::lookup(id).unwrap()).collect()
}

fn options(cache: CachePolicy, dir: &std::path::Path) -> StoreOptions {
    StoreOptions {
        cache,
        request_pause: Duration::ZERO,
        store_dir: dir.to_path_buf(),
        ..StoreOptions::default()
    }
}

fn offline() -> StoreOptions {
    StoreOptions { cache: CachePolicy::Off, request_pause: Duration::ZERO, ..StoreOptions::default() }
}

#[tokio::test]
async fn concurrent_loads_share_one_pass() {
    let fetcher = Arc::new(FixtureFetcher::default());
    let store = FactionStore::new(fetcher.clone(), offline())
        .with_roster(roster(&["space-marines", "orks"]))
        .with_reference_table(None);

    let (a, b) = tokio::join!(store.load(), store.load());

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(a.source, Source::Catalog);

    // cached until invalidated
    store.load().await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    store.invalidate();
    assert!(store.snapshot().is_none());
    store.load().await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn get_and_list() {
    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), offline())
        .with_roster(roster(&["space-marines"]));

    let list = store.list().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "space-marines");
    assert_eq!(list[0].color_tag, "accent");

    let sm = store.get("space-marines").await.unwrap();
    assert_eq!(sm.unit_count(), 8);
    assert!(store.get("squats").await.is_none());
}

#[tokio::test]
async fn total_failure_degrades_to_fallback() {
    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), offline())
        .with_roster(roster(&["orks", "necrons"]))
        .with_reference_table(None);

    let catalog = store.load().await;
    assert_eq!(catalog.source, Source::Fallback);
    assert!(!store.list().await.is_empty());
    assert!(store.get("space-marines").await.is_some());
}

#[tokio::test]
async fn failed_factions_are_substituted_from_reference() {
    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), offline())
        .with_roster(roster(&["space-marines", "adepta-sororitas", "orks"]));

    let catalog = store.load().await;
    assert_eq!(catalog.source, Source::Mixed);
    let ids: Vec<_> = catalog.list().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec!["space-marines", "adepta-sororitas"]);

    let sisters = catalog.get("adepta-sororitas").unwrap();
    assert!(sisters.iter_units().all(|(_, u)| u.stat_summary == NOT_YET_AVAILABLE));
}

#[tokio::test]
async fn substitution_can_be_disabled() {
    let opts = StoreOptions { reference_fallback: false, ..offline() };
    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), opts)
        .with_roster(roster(&["space-marines", "adepta-sororitas"]));

    let catalog = store.load().await;
    assert_eq!(catalog.source, Source::Catalog);
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn reference_strategy_never_fetches() {
    let fetcher = Arc::new(FixtureFetcher::default());
    let opts = StoreOptions { strategy: Strategy::Reference, ..offline() };
    let store = FactionStore::new(fetcher.clone(), opts);

    let catalog = store.load().await;
    assert_eq!(catalog.source, Source::Reference);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    let table = ReferenceTable::embedded().unwrap();
    let expected: Vec<_> = table.factions.iter().map(|f| f.id.clone()).collect();
    let got: Vec<_> = catalog.list().into_iter().map(|f| f.id).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn refresh_writes_and_reuse_reads_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    tokio::fs::write(cache.path(), b"stale garbage").await.unwrap();

    let first = FactionStore::new(Arc::new(FixtureFetcher::default()), options(CachePolicy::Refresh, dir.path()))
        .with_roster(roster(&["space-marines"]));
    let fresh = first.load().await;
    assert_eq!(fresh.source, Source::Catalog);
    assert!(cache.read().await.is_some());

    // nothing can be fetched; the cache alone satisfies the load
    let fetcher = Arc::new(FixtureFetcher::default());
    let second = FactionStore::new(fetcher.clone(), options(CachePolicy::Reuse, dir.path()))
        .with_roster(roster(&["orks"]));
    let cached = second.load().await;
    assert_eq!(cached.source, Source::Cache);
    assert_eq!(cached.factions, fresh.factions);
    assert_eq!(cached.loaded_at_ms, fresh.loaded_at_ms);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    second.clear_cache().await.unwrap();
    assert!(cache.read().await.is_none());
}

#[tokio::test]
async fn fallback_is_never_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), options(CachePolicy::Refresh, dir.path()))
        .with_roster(roster(&["orks"]))
        .with_reference_table(None);

    assert_eq!(store.load().await.source, Source::Fallback);
    assert!(DiskCache::new(dir.path()).read().await.is_none());
}

#[tokio::test]
async fn unwritable_cache_does_not_fail_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    let store = FactionStore::new(Arc::new(FixtureFetcher::default()), options(CachePolicy::Refresh, &blocker))
        .with_roster(roster(&["space-marines"]));

    let catalog = store.load().await;
    assert_eq!(catalog.source, Source::Catalog);
    assert_eq!(catalog.len(), 1);
    assert!(DiskCache::new(&blocker).read().await.is_none());
    assert_eq!(std::fs::read(&blocker).unwrap(), b"occupied");
}
