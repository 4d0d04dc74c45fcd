//! Console hook logger

use crate::output::Status;
use cordova_hooks_core::logger::HookLogger;

/// Renders hook messages to the terminal and mirrors them as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger {
    quiet: bool,
}

impl ConsoleLogger {
    /// Create a logger; `quiet` suppresses informational lines
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl HookLogger for ConsoleLogger {
    fn info(&self, message: &str) {
        tracing::debug!(target: "hook", "{}", message);
        if !self.quiet {
            Status::info(message);
        }
    }

    fn warn(&self, message: &str) {
        tracing::debug!(target: "hook", severity = "warn", "{}", message);
        Status::warning(message);
    }
}
