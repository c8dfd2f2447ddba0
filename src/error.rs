// src/error.rs
//! Error taxonomy.
//!
//! Fetch and parse failures travel up to the store, which picks a fallback.
//! Field-level extraction gaps are never errors; they resolve to sentinels
//! in `specs::catalog`.

use thiserror::Error;

/// A remote (or on-disk) catalog document could not be retrieved.
#[derive(Debug, Error)]
#[error("failed to fetch `{file_name}`: {cause}")]
pub struct FetchError {
    pub file_name: String,
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(file_name: &str, cause: FetchCause) -> Self {
        Self { file_name: s!(file_name), cause }
    }
}

#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("document not found")]
    NotFound,
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("invalid document URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The document text is not well-formed markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed catalog document at byte {position}: {message}")]
pub struct ParseError {
    pub position: u64,
    pub message: String,
}

impl ParseError {
    pub fn new(position: u64, message: impl Into<String>) -> Self {
        Self { position, message: message.into() }
    }
}

/// One faction's ingestion failed. The pass continues with the others.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to parse `{file_name}`: {source}")]
    Parse {
        file_name: String,
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference table is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache entry could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArmyError {
    #[error("no army entry at position {0}")]
    NoSuchEntry(usize),
    #[error("`{unit}` has no loadout `{loadout}`")]
    UnknownLoadout { unit: String, loadout: String },
    #[error("`{unit}` has no wargear option `{option}`")]
    UnknownWargear { unit: String, option: String },
}
