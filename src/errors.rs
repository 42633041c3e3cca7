/*!
 * Error types for the lingomem library.
 *
 * This module contains custom error types for the different parts of the
 * library, using the thiserror crate for ergonomic error definitions.
 * The translation memory never fails, so it has no error type.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request could not be completed
    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the provider itself
    #[error("Provider responded with error: {status_code} - {message}")]
    ApiError {
        /// Status code reported by the provider
        status_code: u16,
        /// Error message from the provider
        message: String,
    },

    /// The provider took too long to answer
    #[error("Provider timed out: {0}")]
    Timeout(String),
}

/// Errors that can occur while translating a single text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A language code could not be understood
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
}

/// Errors surfaced by the batch job queue
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    /// The job id is unknown, either never issued or already pruned
    #[error("Batch not found.")]
    NotFound(String),

    /// A batch must contain at least one text
    #[error("Batch must contain at least one text")]
    EmptyBatch,

    /// Any item translation failed, failing the whole batch
    #[error("Batch processing failed: {0}")]
    ProcessingFailed(String),

    /// Background processing needs a Tokio runtime
    #[error("No async runtime available to schedule batch processing")]
    RuntimeUnavailable,
}

/// Errors that can occur during document translation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// File extension is not one of the supported types
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Document body is not valid UTF-8 text
    #[error("Document is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// A line of the document failed to translate
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the batch queue
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Error from document translation
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
