// src/progress.rs
/// Progress reporting for multi-tournament scrapes.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of tournaments.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One tournament fetched and parsed.
    fn item_done(&mut self, _index: usize, _name: &str) {}

    /// One tournament failed; the run goes on.
    fn item_failed(&mut self, _index: usize, _name: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Counts outcomes; used by tests and as a building block for printers.
#[derive(Debug, Default)]
pub struct Tally {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub finished: bool,
    /// Status lines passed to `log`, in order.
    pub lines: Vec<String>,
}

impl Progress for Tally {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn item_done(&mut self, _index: usize, _name: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, _index: usize, _name: &str, _err: &str) {
        self.failed += 1;
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
