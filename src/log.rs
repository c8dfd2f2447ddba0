// src/log.rs
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing::Level;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// With `log_file` set, lines are appended to that file (parent dirs are
/// created); otherwise they go to stderr. A file that cannot be opened
/// falls back to stderr with a warning.
pub fn init(verbose: bool, log_file: Option<&Path>) {
    INIT.get_or_init(|| {
        let level = if verbose { Level::DEBUG } else { Level::INFO };

        let mut refused = None;
        let file = log_file.and_then(|path| match open_log_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                refused = Some((path.display().to_string(), e));
                None
            }
        });

        // try_init: a host application may already own the global subscriber
        let _ = match file {
            Some(file) => tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            None => tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        if let Some((path, e)) = refused {
            crate::logw!("Cannot open log file {path} ({e}); logging to stderr");
        }
    });
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
