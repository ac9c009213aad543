//! Human-readable game log.
//!
//! The engine reports what happened (moves played, rejections, checks,
//! game end) through a [`LogSink`] lent to it by the caller. There is no
//! process-wide log; whoever composes the application owns the sink.

use tracing::info;

/// Append-only destination for log messages.
pub trait LogSink {
    fn append(&mut self, message: String);
}

/// Discards everything. Handy for simulations and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl LogSink for NullLog {
    fn append(&mut self, _message: String) {}
}

/// In-memory log that keeps entries in insertion order and mirrors each
/// one to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct MoveLog {
    entries: Vec<String>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for MoveLog {
    fn append(&mut self, message: String) {
        info!(target: "chess_rules::log", "{message}");
        self.entries.push(message);
    }
}
