// src/config/consts.rs

// Net config
pub const CATALOG_BASE_URL: &str = "https://raw.githubusercontent.com/BSData/wh40k-10e/main/";
pub const USER_AGENT: &str = "muster/0.4";
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_KEY: &str = "muster-v1-faction-data";
pub const LOG_FILE: &str = ".store/debug.log";

// Ingestion
pub const REQUEST_PAUSE_MS: u64 = 200; // be polite to the upstream host
