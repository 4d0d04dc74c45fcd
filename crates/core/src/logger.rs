//! Injected log sink for hook output
//!
//! Hooks report to the person running the build, not to a log file, so the
//! sink is a small trait. The CLI renders to the terminal; tests capture
//! lines with [`MemoryLogger`].

use serde::Serialize;
use std::sync::Mutex;

/// Severity of a hook log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Progress the developer should see
    Info,
    /// Something went wrong but the build continues
    Warn,
}

/// Receives user-facing hook messages
pub trait HookLogger {
    /// Report progress
    fn info(&self, message: &str);
    /// Report a problem the hook recovered from
    fn warn(&self, message: &str);
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Severity
    pub level: LogLevel,
    /// Line as logged
    pub message: String,
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, in order
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages logged at `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether nothing was logged
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HookLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }
}

/// Logger that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl HookLogger for NullLogger {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
