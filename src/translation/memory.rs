/*!
 * Translation memory.
 *
 * Stores previously produced translations keyed by source text and language
 * pair so repeated requests can be answered without calling the provider.
 * Entries remember when they were last read or written; once the memory is
 * over capacity the least recently used entries are dropped.
 */

use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::clock::{SharedClock, system_clock};
use super::domain::Domain;

/// Default maximum number of stored entries
pub const DEFAULT_MEMORY_CAPACITY: usize = 1000;

/// A stored translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationMemoryEntry {
    /// Source text, matched exactly
    pub source_text: String,

    /// Source language code
    pub source_language: String,

    /// Target language code
    pub target_language: String,

    /// The stored translation
    pub target_text: String,

    /// Optional domain tag, used as a lookup filter only
    pub domain: Option<Domain>,

    /// Last read or write
    pub last_used: DateTime<Utc>,
}

impl TranslationMemoryEntry {
    /// Create an entry; `last_used` is stamped when it is added
    pub fn new(source_text: &str, source_language: &str, target_language: &str, target_text: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            target_text: target_text.to_string(),
            domain: None,
            last_used: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Tag the entry with a domain
    pub fn with_domain(mut self, domain: Option<Domain>) -> Self {
        self.domain = domain;
        self
    }

    fn same_key(&self, source_text: &str, source_language: &str, target_language: &str) -> bool {
        self.source_text == source_text
            && self.source_language == source_language
            && self.target_language == target_language
    }

    /// Absent stored domain acts as a wildcard
    fn accepts_domain(&self, domain: Option<Domain>) -> bool {
        match (domain, self.domain) {
            (None, _) | (_, None) => true,
            (Some(wanted), Some(stored)) => wanted == stored,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Most recently inserted first
    entries: Vec<TranslationMemoryEntry>,
    hits: usize,
    misses: usize,
}

/// In-memory translation memory
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct TranslationMemory {
    state: Arc<RwLock<MemoryState>>,
    capacity: usize,
    clock: SharedClock,
}

impl TranslationMemory {
    /// Create an empty memory with the given capacity, using the system clock
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, system_clock())
    }

    /// Create an empty memory reading time from `clock`
    pub fn with_clock(capacity: usize, clock: SharedClock) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            capacity: capacity.max(1),
            clock,
        }
    }

    /// Insert a translation, or update the one stored for the same key
    pub fn add(&self, entry: TranslationMemoryEntry) {
        let now = self.clock.now();
        let mut state = self.state.write();

        let existing = state
            .entries
            .iter()
            .position(|item| item.same_key(&entry.source_text, &entry.source_language, &entry.target_language));

        match existing {
            Some(index) => {
                state.entries[index] = TranslationMemoryEntry { last_used: now, ..entry };
                debug!("Updated translation memory entry at position {}", index);
            }
            None => {
                state.entries.insert(0, TranslationMemoryEntry { last_used: now, ..entry });
                if state.entries.len() > self.capacity {
                    // Stable sort keeps newer inserts ahead of equal timestamps
                    state.entries.sort_by(|a, b| b.last_used.cmp(&a.last_used));
                    state.entries.truncate(self.capacity);
                    debug!("Translation memory trimmed to {} entries", self.capacity);
                }
            }
        }
    }

    /// Look up a translation; a hit counts as a use
    pub fn find(
        &self,
        source_text: &str,
        source_language: &str,
        target_language: &str,
        domain: Option<Domain>,
    ) -> Option<TranslationMemoryEntry> {
        let now = self.clock.now();
        let mut state = self.state.write();

        let found = state.entries.iter_mut().find(|item| {
            item.same_key(source_text, source_language, target_language) && item.accepts_domain(domain)
        });

        match found {
            Some(entry) => {
                entry.last_used = now;
                let entry = entry.clone();
                state.hits += 1;
                debug!(
                    "Memory hit for '{}' ({} -> {})",
                    truncate_text(source_text, 30),
                    source_language,
                    target_language
                );
                Some(entry)
            }
            None => {
                state.misses += 1;
                debug!(
                    "Memory miss for '{}' ({} -> {})",
                    truncate_text(source_text, 30),
                    source_language,
                    target_language
                );
                None
            }
        }
    }

    /// Drop every entry last used strictly before `timestamp`
    pub fn clear_older_than(&self, timestamp: DateTime<Utc>) {
        let mut state = self.state.write();
        let before = state.entries.len();
        state.entries.retain(|entry| entry.last_used >= timestamp);
        debug!("Cleared {} stale memory entries", before - state.entries.len());
    }

    /// All entries for a language pair, in storage order
    pub fn entries_for_language_pair(&self, source_language: &str, target_language: &str) -> Vec<TranslationMemoryEntry> {
        self.state
            .read()
            .entries
            .iter()
            .filter(|entry| entry.source_language == source_language && entry.target_language == target_language)
            .cloned()
            .collect()
    }

    /// Copy of all entries, in storage order
    pub fn entries(&self) -> Vec<TranslationMemoryEntry> {
        self.state.read().entries.clone()
    }

    /// Get hit/miss statistics: (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let state = self.state.read();
        let total = state.hits + state.misses;
        let hit_rate = if total > 0 {
            state.hits as f64 / total as f64
        } else {
            0.0
        };
        (state.hits, state.misses, hit_rate)
    }

    /// Remove every entry and reset statistics
    pub fn clear(&self) {
        let mut state = self.state.write();
        *state = MemoryState::default();
        debug!("Translation memory cleared");
    }

    /// Get the number of entries in the memory
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the memory is empty
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Maximum number of entries kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TranslationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
