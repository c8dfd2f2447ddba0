// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod army;
pub mod factions;
pub mod fallback;
pub mod model;
pub mod progress;
pub mod reconcile;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use army::{ArmyEntry, ArmyList};
pub use config::options::{CachePolicy, FetchOptions, StoreOptions, Strategy};
pub use error::{ArmyError, FetchError, IngestError, ParseError};
pub use model::{total_points, Category, Faction, FactionSummary, Loadout, Unit, WargearOption};
pub use store::{Catalog, DiskCache, FactionStore, Source};
