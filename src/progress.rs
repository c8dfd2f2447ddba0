// src/progress.rs
/// Lightweight progress reporting for an ingestion pass.
/// Front ends (CLI, host apps) implement this to surface status to users.
pub trait Progress: Send {
    /// Called at the start with the number of factions in the pass.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One faction ingested.
    fn item_done(&mut self, _id: &str, _name: &str) {}

    /// One faction failed (it may still be substituted afterwards).
    fn item_failed(&mut self, _id: &str, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
