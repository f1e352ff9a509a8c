//! Action journal
//!
//! Records every table-mutating action with a timestamp and emits it via
//! `tracing`. Entries live in memory only; their persistence format is the
//! caller's concern. Recording is synchronous, there is no background flush.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Kind of journaled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Allocate,
    Release,
    Defragment,
    Reset,
}

/// One journaled action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Monotonic sequence number within this journal
    pub seq: u64,

    pub action: Action,

    /// Human-readable description of what happened
    pub detail: String,

    pub timestamp: DateTime<Utc>,
}

/// Append-only in-memory journal
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<JournalEntry>>,
    next_seq: Mutex<u64>,
}

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    /// Append an entry and emit it through `tracing`
    pub fn record(&self, action: Action, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::info!(?action, %detail, "journal");

        let mut seq = self.next_seq.lock();
        let entry = JournalEntry {
            seq: *seq,
            action,
            detail,
            timestamp: Utc::now(),
        };
        *seq += 1;
        self.entries.lock().push(entry);
    }

    /// All entries, newest first
    pub fn entries(&self) -> Vec<JournalEntry> {
        let mut entries = self.entries.lock().clone();
        entries.reverse();
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Discard all entries; the sequence keeps counting
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_order() {
        let journal = Journal::new();
        journal.record(Action::Allocate, "allocated file 1");
        journal.record(Action::Release, "released file 1");

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        // Newest first
        assert_eq!(entries[0].action, Action::Release);
        assert_eq!(entries[1].action, Action::Allocate);
        assert!(entries[0].seq > entries[1].seq);
    }

    #[test]
    fn test_clear_keeps_sequence() {
        let journal = Journal::new();
        journal.record(Action::Allocate, "a");
        journal.clear();
        assert!(journal.is_empty());

        journal.record(Action::Reset, "reset");
        assert_eq!(journal.entries()[0].seq, 1);
    }

    #[test]
    fn test_entry_serialization() {
        let journal = Journal::new();
        journal.record(Action::Defragment, "compacted 3 files");

        let entry = &journal.entries()[0];
        let json = serde_json::to_string(entry).unwrap();
        let restored: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, entry);
    }
}
