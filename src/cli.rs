// src/cli.rs
//! Command-line front end: browse factions, price a unit, export JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::consts::LOG_FILE;
use crate::config::options::{CachePolicy, FetchOptions, StoreOptions, Strategy};
use crate::model::{total_points, Category, Faction};
use crate::progress::Progress;
use crate::store::FactionStore;

#[derive(Parser, Debug)]
#[command(name = "muster", version)]
#[command(about = "Browse faction catalogs and price army units")]
pub struct Cli {
    /// Use the points reference table instead of catalog documents.
    #[arg(long, global = true)]
    reference: bool,
    /// Read catalog documents from a local directory instead of the network.
    #[arg(long, global = true, value_name = "DIR")]
    catalog_dir: Option<PathBuf>,
    /// Durable cache policy.
    #[arg(long, global = true, value_enum, default_value_t = CacheArg::Refresh)]
    cache: CacheArg,
    /// Do not substitute reference rows for factions whose catalog fails.
    #[arg(long, global = true)]
    no_reference_fallback: bool,
    /// Debug-level logging.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Append logs to a file (default when set without a value: .store/debug.log).
    #[arg(long, global = true, value_name = "FILE", num_args = 0..=1, default_missing_value = LOG_FILE)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CacheArg {
    Off,
    Refresh,
    Reuse,
}

impl From<CacheArg> for CachePolicy {
    fn from(arg: CacheArg) -> Self {
        match arg {
            CacheArg::Off => CachePolicy::Off,
            CacheArg::Refresh => CachePolicy::Refresh,
            CacheArg::Reuse => CachePolicy::Reuse,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded factions.
    List,
    /// Show a faction's units by category.
    Show {
        faction: String,
        /// Only this category (e.g. `troops`, `heavy-support`).
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Point total for one unit configuration.
    Points {
        faction: String,
        unit: String,
        /// Model count; clamped to the unit's bounds.
        #[arg(long)]
        size: Option<u32>,
        /// Wargear option id (repeatable).
        #[arg(long = "wargear", value_name = "ID")]
        wargear: Vec<String>,
    },
    /// Write a faction as JSON.
    Export {
        faction: String,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

/// Progress on stderr, one line per faction.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, _id: &str, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name}", self.seen, self.total);
    }

    fn item_failed(&mut self, _id: &str, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name} (failed)", self.seen, self.total);
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref());

    let options = StoreOptions {
        strategy: if cli.reference { Strategy::Reference } else { Strategy::Catalog },
        cache: cli.cache.into(),
        reference_fallback: !cli.no_reference_fallback,
        ..StoreOptions::default()
    };
    let store = match &cli.catalog_dir {
        Some(dir) => FactionStore::from_dir(dir, options),
        None => FactionStore::http(options, &FetchOptions::default())?,
    }
    .with_progress(Box::new(ConsoleProgress::default()));

    match cli.command {
        Command::List => {
            let catalog = store.load().await;
            for f in catalog.list() {
                println!("{}\t{}\t{}", f.id, f.name, f.color_tag);
            }
            eprintln!("{} factions ({:?})", catalog.len(), catalog.source);
        }
        Command::Show { faction, category } => {
            print_faction(&find_faction(&store, &faction).await?, category)
        }
        Command::Points { faction, unit, size, wargear } => {
            let faction = find_faction(&store, &faction).await?;
            let (_, u) = faction
                .find_unit(&unit)
                .ok_or_else(|| eyre!("no unit `{unit}` in {}", faction.name))?;
            for id in &wargear {
                if u.wargear_option(id).is_none() {
                    bail!("`{}` has no wargear option `{id}`", u.name);
                }
            }
            let size = u.clamp_size(size.unwrap_or_else(|| u.min_models()));
            println!("{} x{size}: {} pts", u.name, total_points(u, size, &wargear));
        }
        Command::Export { faction, out } => {
            let faction = find_faction(&store, &faction).await?;
            let json = serde_json::to_string_pretty(&faction)?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .wrap_err_with(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

async fn find_faction(store: &FactionStore, id: &str) -> Result<Faction> {
    store.get(id).await.ok_or_else(|| eyre!("no faction `{id}` (try `muster list`)"))
}

fn parse_category(key: &str) -> std::result::Result<Category, String> {
    Category::from_key(key).ok_or_else(|| {
        let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
        format!("unknown category `{key}` (one of: {})", keys.join(", "))
    })
}

fn print_faction(faction: &Faction, only: Option<Category>) {
    println!("{} [{}]", faction.name, faction.id);
    for (category, units) in &faction.units {
        if units.is_empty() || only.is_some_and(|c| c != *category) {
            continue;
        }
        println!("\n{category}");
        for u in units {
            let size = match (u.min_size, u.max_size) {
                (Some(min), Some(max)) if max > min => format!(" ({min}-{max} models)"),
                _ => s!(),
            };
            println!("  {:<40} {:>4} pts{size}  [{}]", u.name, u.base_points, u.id);
            for l in &u.loadouts {
                println!("    - {} [{}]", l.name, l.id);
            }
            for o in &u.wargear_options {
                println!("    + {} +{} pts [{}]", o.name, o.points, o.id);
            }
        }
    }
}
