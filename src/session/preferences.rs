/*!
 * User preferences for a translation session.
 */

use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_config::Config;
use crate::translation::core::{TranslationOptions, TranslationRequest};
use crate::translation::domain::{Domain, FormalityLevel};

/// Preferences applied to new translations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Source language preselected for new translations
    pub default_source_language: String,
    /// Target language preselected for new translations
    pub default_target_language: String,
    /// Detect the source language from the input text
    pub auto_detect: bool,
    /// Terminology domain
    pub domain: Domain,
    /// Style register
    pub formality_level: FormalityLevel,
    /// Consult and feed the translation memory
    pub use_translation_memory: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_source_language: "en".to_string(),
            default_target_language: "es".to_string(),
            auto_detect: true,
            domain: Domain::General,
            formality_level: FormalityLevel::Neutral,
            use_translation_memory: true,
        }
    }
}

impl UserPreferences {
    /// Defaults with the configured language pair
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_source_language: config.source_language.clone(),
            default_target_language: config.target_language.clone(),
            ..Self::default()
        }
    }

    /// Source language to send, `None` when it should be detected
    pub fn source_language(&self) -> Option<String> {
        if self.auto_detect {
            None
        } else {
            Some(self.default_source_language.clone())
        }
    }

    /// Request for `text` under these preferences
    pub fn request_for(&self, text: &str) -> TranslationRequest {
        TranslationRequest {
            text: text.to_string(),
            source_language: self.source_language(),
            target_language: self.default_target_language.clone(),
            options: self.translation_options(),
        }
    }

    /// Translation options derived from these preferences
    pub fn translation_options(&self) -> TranslationOptions {
        TranslationOptions {
            domain: Some(self.domain),
            formality: Some(self.formality_level),
            use_memory: self.use_translation_memory,
            glossary: Default::default(),
        }
    }
}

/// Partial preference update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub default_source_language: Option<String>,
    pub default_target_language: Option<String>,
    pub auto_detect: Option<bool>,
    pub domain: Option<Domain>,
    pub formality_level: Option<FormalityLevel>,
    pub use_translation_memory: Option<bool>,
}

/// Shared preference storage
#[derive(Debug, Clone, Default)]
pub struct PreferencesStore {
    current: Arc<RwLock<UserPreferences>>,
}

impl PreferencesStore {
    /// Create a store holding the given preferences
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            current: Arc::new(RwLock::new(preferences)),
        }
    }

    /// Current preferences
    pub fn get(&self) -> UserPreferences {
        self.current.read().clone()
    }

    /// Merge an update and return the resulting preferences
    pub fn update(&self, update: PreferenceUpdate) -> UserPreferences {
        let mut current = self.current.write();
        if let Some(language) = update.default_source_language {
            current.default_source_language = language;
        }
        if let Some(language) = update.default_target_language {
            current.default_target_language = language;
        }
        if let Some(auto_detect) = update.auto_detect {
            current.auto_detect = auto_detect;
        }
        if let Some(domain) = update.domain {
            current.domain = domain;
        }
        if let Some(formality) = update.formality_level {
            current.formality_level = formality;
        }
        if let Some(use_memory) = update.use_translation_memory {
            current.use_translation_memory = use_memory;
        }
        debug!("Preferences updated: {:?}", *current);
        current.clone()
    }

    /// Restore the defaults
    pub fn reset(&self) -> UserPreferences {
        let mut current = self.current.write();
        *current = UserPreferences::default();
        current.clone()
    }
}
