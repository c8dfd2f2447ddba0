// src/specs/mod.rs
//! # Ingestion "specs"
//!
//! Each spec knows how to read one kind of source and shape it into the
//! canonical roster schema (`model`).
//!
//! - `catalog` – per-entry extraction from a catalog document tree
//!   (category, base name, stats, cost, abilities, keywords, options,
//!   loadout candidate). Reconciliation of variants lives in `reconcile`.
//! - `reference` – the hand-maintained points table, converted unit by unit.
//! - `heuristics` – the keyword tables both of the above consult. They are
//!   plain data so they can be tested and extended without touching
//!   control flow.
//!
//! Specs do no fetching, caching or logging spam; `scrape` and `store`
//! decide when to run them and what to do with failures.
pub mod catalog;
pub mod heuristics;
pub mod reference;
