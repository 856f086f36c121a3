//! Append-only, player-facing game log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single log line and the wall-clock time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp assigned when the entry was appended.
    pub at: DateTime<Utc>,
    /// Human-readable description of what happened.
    pub message: String,
}

/// Chronological record of everything that happened in a game.
///
/// Engine operations append here in addition to emitting `tracing` events;
/// the match controller renders the entries to players verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the log.
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "game_log", "{message}");
        self.entries.push(LogEntry {
            at: Utc::now(),
            message,
        });
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The messages alone, in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.message.as_str())
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
