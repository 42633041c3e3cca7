/*!
 * Translation services.
 *
 * This module contains the translation functionality. It is split into
 * several submodules:
 *
 * - `core`: Single-text translation service and request/response types
 * - `memory`: Translation memory with least-recently-used retention
 * - `batch`: Poll-based batch job queue
 * - `domain`: Domain terminology and formality adjustments
 * - `document`: Simulated document translation
 */

// Re-export main types for easier usage
pub use self::batch::{BatchJob, BatchOutcome, BatchQueue, BatchStatus, BatchStatusReport, BatchSubmission};
pub use self::core::{TranslationOptions, TranslationRequest, TranslationResponse, TranslationService};
pub use self::document::{DocumentTranslator, SupportedFileType, TranslatedDocument};
pub use self::domain::{Domain, DomainOptions, FormalityLevel};
pub use self::memory::{TranslationMemory, TranslationMemoryEntry};

// Submodules
pub mod batch;
pub mod core;
pub mod document;
pub mod domain;
pub mod memory;
