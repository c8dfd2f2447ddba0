// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Which ingestion pipeline a store pass runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Fetch and parse every mapped catalog document.
    #[default]
    Catalog,
    /// Convert the hand-maintained points reference table.
    Reference,
}

/// What the store does with its durable cache entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Never touch the disk.
    Off,
    /// Clear the entry at the start of every pass, rewrite it on success.
    #[default]
    Refresh,
    /// A valid entry satisfies the load without any fetching.
    Reuse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub strategy: Strategy,
    pub cache: CachePolicy,
    /// Substitute a faction's reference-table rows when its catalog fails.
    pub reference_fallback: bool,
    /// Pause between successive remote fetches.
    pub request_pause: Duration,
    pub store_dir: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Catalog,
            cache: CachePolicy::Refresh,
            reference_fallback: true,
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            store_dir: PathBuf::from(STORE_DIR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(CATALOG_BASE_URL),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
        }
    }
}

impl FetchOptions {
    /// Point at another mirror. A trailing '/' is added so file names join
    /// under the base rather than replacing its last segment.
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = if base.ends_with('/') { s!(base) } else { join!(base, "/") };
        self
    }
}
