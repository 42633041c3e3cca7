/*!
 * Per-session state for a translation front-end.
 *
 * This module provides:
 * - Translation history, newest first and bounded
 * - User preferences with partial updates
 */

pub mod history;
pub mod preferences;

// Re-export main types
pub use history::{HistoryEntry, TranslationHistory};
pub use preferences::{PreferenceUpdate, PreferencesStore, UserPreferences};
