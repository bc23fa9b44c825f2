//! Append-only console log
//!
//! Every line printed to the console (execution progress, toolbar actions,
//! cancellation notices) goes through [`LogStore`]. Entries share a single
//! session-wide sequence counter, are never rewritten, and carry a display
//! severity derived from their text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker substring that makes an entry render as an error
pub const ERROR_MARKER: &str = "ERROR";

/// Display classification of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    /// Classify a line of console text.
    ///
    /// Only the literal, case-sensitive marker counts: `"error"` stays `Info`.
    pub fn classify(text: &str) -> Self {
        if text.contains(ERROR_MARKER) {
            Severity::Error
        } else {
            Severity::Info
        }
    }
}

/// A single immutable console line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Session-wide position, assigned at append time
    pub sequence: u64,
    /// The text exactly as appended
    pub text: String,
    /// Derived from `text`
    pub severity: Severity,
}

impl LogEntry {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Callback invoked for each entry that becomes the new tail of the log
pub type LogObserver = Box<dyn FnMut(&LogEntry)>;

/// Ordered, append-only record of console output
#[derive(Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    next_sequence: u64,
    observers: Vec<LogObserver>,
}

impl fmt::Debug for LogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStore")
            .field("entries", &self.entries)
            .field("next_sequence", &self.next_sequence)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LogStore {
    /// Create an empty log whose first entry will get sequence 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer that is told about every new tail entry
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&LogEntry) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Append a single line and return the stored entry
    pub fn append(&mut self, text: impl Into<String>) -> LogEntry {
        let entry = self.push(text.into());
        self.notify(std::slice::from_ref(&entry));
        entry
    }

    /// Append lines as one contiguous block.
    ///
    /// The block is fully stored before any observer runs, so an observer
    /// never sees a half-written batch.
    pub fn append_batch<I, S>(&mut self, texts: I) -> Vec<LogEntry>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batch: Vec<LogEntry> = texts
            .into_iter()
            .map(|text| self.push(text.into()))
            .collect();
        self.notify(&batch);
        batch
    }

    /// The full log in append order
    pub fn snapshot(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// The last `n` entries (fewer if the log is shorter)
    pub fn tail(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Sequence index the next appended entry will receive
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    fn push(&mut self, text: String) -> LogEntry {
        let entry = LogEntry {
            sequence: self.next_sequence,
            severity: Severity::classify(&text),
            text,
        };
        self.next_sequence += 1;
        tracing::trace!(
            "log_store: appended #{} ({:?})",
            entry.sequence,
            entry.severity
        );
        self.entries.push(entry.clone());
        entry
    }

    fn notify(&mut self, appended: &[LogEntry]) {
        for observer in &mut self.observers {
            for entry in appended {
                observer(entry);
            }
        }
    }
}
