//! Progress message sinks
//!
//! The updater reports what it is doing through [`UpdateLog`]. Messages are
//! plain text; timestamps and colors belong to whoever renders them.

use std::sync::Mutex;

/// Separator line between matched files
pub const SEPARATOR: &str = "---";

pub trait UpdateLog {
    fn log(&self, message: &str);

    fn log_separator(&self) {
        self.log(SEPARATOR);
    }
}

/// Forwards every message to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl UpdateLog for TracingLog {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Keeps messages in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl UpdateLog for MemoryLog {
    fn log(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<L: UpdateLog + ?Sized> UpdateLog for &L {
    fn log(&self, message: &str) {
        (**self).log(message);
    }

    fn log_separator(&self) {
        (**self).log_separator();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_records_in_order() {
        let log = MemoryLog::new();
        log.log("first");
        log.log_separator();
        log.log("second");

        assert_eq!(log.messages(), vec!["first", "---", "second"]);
        assert!(log.contains("sec"));
        assert!(!log.contains("third"));
    }
}
