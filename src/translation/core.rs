/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which translates
 * a single text: it consults the translation memory, delegates to a provider,
 * applies domain and formality adjustments, writes the result back to the
 * memory and records it in the session history.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::Config;
use crate::clock::{SharedClock, system_clock};
use crate::errors::TranslationError;
use crate::language_utils::{detect_language, language_codes_match};
use crate::providers::simulated::SimulatedProvider;
use crate::providers::{Provider, ProviderRequest};
use crate::session::history::{HistoryEntry, TranslationHistory};
use super::domain::{Domain, DomainOptions, FormalityLevel, apply_domain_specific_translation};
use super::memory::{TranslationMemory, TranslationMemoryEntry, truncate_text};

/// Translation options shared by every text of a request or batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOptions {
    /// Terminology domain
    #[serde(default)]
    pub domain: Option<Domain>,

    /// Style register
    #[serde(default)]
    pub formality: Option<FormalityLevel>,

    /// Whether to consult and feed the translation memory
    #[serde(default = "default_use_memory")]
    pub use_memory: bool,

    /// Caller-supplied term replacements
    #[serde(default)]
    pub glossary: HashMap<String, String>,
}

fn default_use_memory() -> bool {
    true
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            domain: None,
            formality: None,
            use_memory: true,
            glossary: HashMap::new(),
        }
    }
}

impl TranslationOptions {
    /// Domain adjustments to apply, if any option asks for them
    fn domain_options(&self) -> Option<DomainOptions> {
        if self.domain.is_none() && self.formality.is_none() && self.glossary.is_empty() {
            return None;
        }
        Some(DomainOptions {
            domain: self.domain.unwrap_or_default(),
            formality: self.formality,
            glossary: self.glossary.clone(),
        })
    }
}

/// A single text to translate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language; detected from the text when absent
    pub source_language: Option<String>,
    /// Target language
    pub target_language: String,
    /// Shared options
    pub options: TranslationOptions,
}

impl TranslationRequest {
    /// Create a request with default options and no source language
    pub fn new(text: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            source_language: None,
            target_language: target_language.to_string(),
            options: TranslationOptions::default(),
        }
    }

    /// Set the source language
    pub fn with_source(mut self, source_language: &str) -> Self {
        self.source_language = Some(source_language.to_string());
        self
    }

    /// Set the options
    pub fn with_options(mut self, options: TranslationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of translating a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Translated text
    pub translated_text: String,
    /// Source language used (given or detected)
    pub detected_language: Option<String>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Whether the translation came from the translation memory
    pub from_memory: bool,
}

/// Translation service for single texts
///
/// Cloning the service shares its provider, memory and history.
#[derive(Clone, Debug)]
pub struct TranslationService {
    provider: Arc<dyn Provider>,
    memory: TranslationMemory,
    history: TranslationHistory,
    memory_enabled: bool,
    clock: SharedClock,
}

impl TranslationService {
    /// Create a new translation service
    pub fn new(provider: Arc<dyn Provider>, memory: TranslationMemory, history: TranslationHistory) -> Self {
        Self {
            provider,
            memory,
            history,
            memory_enabled: true,
            clock: system_clock(),
        }
    }

    /// Create a service backed by the simulated provider, sized from the config
    pub fn from_config(config: &Config) -> Self {
        let provider = Arc::new(SimulatedProvider::from_config(&config.simulation));
        Self::with_provider(provider, config)
    }

    /// Create a service for the given provider, sized from the config
    pub fn with_provider(provider: Arc<dyn Provider>, config: &Config) -> Self {
        let mut service = Self::new(
            provider,
            TranslationMemory::new(config.memory.capacity),
            TranslationHistory::new(config.history.max_entries),
        );
        service.memory_enabled = config.memory.enabled;
        service
    }

    /// Read history timestamps from `clock`
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Turn the translation memory on or off for every request
    pub fn set_memory_enabled(&mut self, enabled: bool) {
        self.memory_enabled = enabled;
    }

    /// The translation memory used by this service
    pub fn memory(&self) -> &TranslationMemory {
        &self.memory
    }

    /// The session history fed by this service
    pub fn history(&self) -> &TranslationHistory {
        &self.history
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate a text between two languages with default options
    pub async fn translate_text(
        &self,
        text: &str,
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<TranslationResponse, TranslationError> {
        let mut request = TranslationRequest::new(text, target_language);
        request.source_language = source_language.map(str::to_string);
        self.translate(&request).await
    }

    /// Translate a single text
    ///
    /// Empty texts and same-language requests are echoed back with full
    /// confidence without touching the provider, the memory or the history.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslationError> {
        let target_language = request.target_language.trim();
        if target_language.is_empty() {
            return Err(TranslationError::InvalidLanguage(request.target_language.clone()));
        }

        let given_source = request
            .source_language
            .as_deref()
            .map(str::trim)
            .filter(|source| !source.is_empty());

        let same_language = given_source.is_some_and(|source| language_codes_match(source, target_language));
        if request.text.trim().is_empty() || same_language {
            return Ok(TranslationResponse {
                translated_text: request.text.clone(),
                detected_language: given_source.map(str::to_string),
                confidence: 1.0,
                from_memory: false,
            });
        }

        let source_language = match given_source {
            Some(source) => source.to_string(),
            None => detect_language(&request.text),
        };
        let use_memory = self.memory_enabled && request.options.use_memory;

        if use_memory {
            if let Some(entry) = self.memory.find(
                &request.text,
                &source_language,
                target_language,
                request.options.domain,
            ) {
                self.record_history(&request.text, &entry.target_text, &source_language, target_language);
                return Ok(TranslationResponse {
                    translated_text: entry.target_text,
                    detected_language: Some(source_language),
                    confidence: 1.0,
                    from_memory: true,
                });
            }
        }

        let response = self
            .provider
            .complete(ProviderRequest::new(&request.text, &source_language, target_language))
            .await
            .map_err(|e| {
                warn!(
                    "{} provider failed for '{}': {}",
                    self.provider.name(),
                    truncate_text(&request.text, 30),
                    e
                );
                TranslationError::from(e)
            })?;

        let translated_text = match request.options.domain_options() {
            Some(domain_options) => apply_domain_specific_translation(
                &response.text,
                &source_language,
                target_language,
                &domain_options,
            ),
            None => response.text,
        };

        if use_memory {
            self.memory.add(
                TranslationMemoryEntry::new(&request.text, &source_language, target_language, &translated_text)
                    .with_domain(request.options.domain),
            );
        }
        self.record_history(&request.text, &translated_text, &source_language, target_language);

        debug!(
            "Translated '{}' ({} -> {}) with confidence {:.2}",
            truncate_text(&request.text, 30),
            source_language,
            target_language,
            response.confidence
        );

        Ok(TranslationResponse {
            translated_text,
            detected_language: Some(source_language),
            confidence: response.confidence,
            from_memory: false,
        })
    }

    fn record_history(&self, source_text: &str, target_text: &str, source_language: &str, target_language: &str) {
        self.history.record(HistoryEntry {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            timestamp: self.clock.now(),
        });
    }
}
