// src/progress.rs
/// Lightweight progress reporting used by the harvest loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One species name finished with `rows` occurrences.
    fn item_done(&mut self, _name: &str, _rows: usize) {}

    /// One species name was given up on.
    fn item_failed(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
