/*!
 * Document translation.
 *
 * Translates text-based documents line by line through the translation
 * service, after a simulated processing delay proportional to the document
 * size. The delay is capped so large uploads never stall indefinitely.
 * Blank lines and line structure are preserved.
 */

pub mod model;

use futures::stream::{self, StreamExt};
use log::info;
use std::time::Duration;

use crate::app_config::{BatchConfig, Config, SimulationConfig};
use crate::errors::{DocumentError, TranslationError};
use crate::language_utils::detect_language;
use super::core::{TranslationOptions, TranslationRequest, TranslationService};

pub use model::{
    SupportedFileType, TranslatedDocument, estimate_word_count, is_file_supported, translated_file_name,
};

/// Simulated document translator
#[derive(Debug, Clone)]
pub struct DocumentTranslator {
    service: TranslationService,
    simulation: SimulationConfig,
    max_concurrent_lines: usize,
}

impl DocumentTranslator {
    /// Create a document translator on top of a translation service
    ///
    /// Lines share the default batch concurrency limit.
    pub fn new(service: TranslationService, simulation: SimulationConfig) -> Self {
        Self {
            service,
            simulation,
            max_concurrent_lines: BatchConfig::default().max_concurrent_items,
        }
    }

    /// Create a document translator using the simulation and concurrency settings of `config`
    pub fn from_config(service: TranslationService, config: &Config) -> Self {
        Self {
            service,
            simulation: config.simulation.clone(),
            max_concurrent_lines: config.batch.max_concurrent_items.max(1),
        }
    }

    /// Lines translated at the same time
    pub fn max_concurrent_lines(&self) -> usize {
        self.max_concurrent_lines
    }

    /// Simulated processing delay for a document of `size_bytes`
    pub fn processing_delay(&self, size_bytes: usize) -> Duration {
        self.simulation.document_delay(size_bytes)
    }

    /// Translate a document given its file name and raw bytes
    pub async fn translate_document(
        &self,
        file_name: &str,
        bytes: &[u8],
        source_language: Option<&str>,
        target_language: &str,
        options: TranslationOptions,
    ) -> Result<TranslatedDocument, DocumentError> {
        let file_type = SupportedFileType::from_file_name(file_name).ok_or_else(|| {
            DocumentError::UnsupportedFileType(format!(
                "{} (accepted: {})",
                file_name,
                SupportedFileType::accepted_extensions()
            ))
        })?;
        let content = std::str::from_utf8(bytes).map_err(|e| DocumentError::InvalidEncoding(e.to_string()))?;

        // One language for the whole document
        let source_language = match source_language {
            Some(source) if !source.trim().is_empty() => source.trim().to_string(),
            _ => detect_language(content),
        };

        let delay = self.processing_delay(bytes.len());
        info!(
            "Translating {} ({}, {} bytes) to {}, simulated processing {:?}",
            file_name,
            file_type.description(),
            bytes.len(),
            target_language,
            delay
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        // CRLF endings are stripped before translation and restored after
        let lines: Vec<(String, bool)> = content
            .split('\n')
            .map(|line| match line.strip_suffix('\r') {
                Some(stripped) => (stripped.to_string(), true),
                None => (line.to_string(), false),
            })
            .collect();

        let translated_lines: Vec<Result<String, TranslationError>> = stream::iter(lines)
            .map(|(text, crlf)| {
                let service = self.service.clone();
                let request = TranslationRequest {
                    text,
                    source_language: Some(source_language.clone()),
                    target_language: target_language.to_string(),
                    options: options.clone(),
                };
                async move {
                    let translated = if request.text.trim().is_empty() {
                        request.text
                    } else {
                        service.translate(&request).await?.translated_text
                    };
                    Ok::<String, TranslationError>(if crlf { format!("{}\r", translated) } else { translated })
                }
            })
            .buffered(self.max_concurrent_lines)
            .collect()
            .await;

        let lines = translated_lines.into_iter().collect::<Result<Vec<_>, _>>()?;

        Ok(TranslatedDocument {
            file_name: translated_file_name(file_name, target_language),
            content: lines.join("\n"),
            word_count: estimate_word_count(bytes.len()),
            detected_language: Some(source_language),
        })
    }
}
