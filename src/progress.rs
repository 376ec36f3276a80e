// src/progress.rs
use crate::runner::{RunOutcome, RunState};

/// Step-by-step status from a monitor run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called on entry to each state.
    fn state(&mut self, _state: RunState) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once at the end, successful or not.
    fn finish(&mut self, _outcome: &RunOutcome) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
