/*!
 * Translation history.
 *
 * Keeps the most recent translations of a session, newest first. The oldest
 * entry falls off once the configured limit is reached.
 */

use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of history entries kept
pub const DEFAULT_HISTORY_ENTRIES: usize = 50;

/// One completed translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Original text
    pub source_text: String,
    /// Translated text
    pub target_text: String,
    /// Source language (given or detected)
    pub source_language: String,
    /// Target language
    pub target_language: String,
    /// When the translation finished
    pub timestamp: DateTime<Utc>,
}

/// Bounded, newest-first translation log
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct TranslationHistory {
    entries: Arc<RwLock<VecDeque<HistoryEntry>>>,
    max_entries: usize,
}

impl TranslationHistory {
    /// Create an empty history keeping at most `max_entries`
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries.min(256)))),
            max_entries,
        }
    }

    /// Record a translation at the front of the history
    pub fn record(&self, entry: HistoryEntry) {
        if self.max_entries == 0 {
            return;
        }
        let mut entries = self.entries.write();
        entries.push_front(entry);
        entries.truncate(self.max_entries);
    }

    /// Snapshot of the history, newest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Forget every entry
    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Translation history cleared");
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TranslationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_ENTRIES)
    }
}
