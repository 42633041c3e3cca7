/*!
 * Provider implementations for translation backends.
 *
 * This module contains the backends the translation service can delegate to:
 * - Simulated: demo backend producing canned translations after a random delay
 * - Mock: configurable backend for tests (failures, slowness, call counting)
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Request sent to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// The text to translate
    pub text: String,
    /// Source language (already resolved, never empty)
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

impl ProviderRequest {
    /// Create a new provider request
    pub fn new(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Response returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// The translated text
    pub text: String,
    /// Provider confidence in [0, 1]
    pub confidence: f64,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a translation request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<ProviderResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;

    /// Short provider name used in logs
    fn name(&self) -> &str;
}

pub mod mock;
pub mod simulated;
