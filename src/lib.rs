/*!
 * # lingomem - translation memory and batch translation queue
 *
 * A Rust library for a demo translation product: single-text translation,
 * batch translation with poll-based status, document translation, history
 * and per-session preferences. Translations are simulated; there is no real
 * machine translation behind the provider.
 *
 * ## Features
 *
 * - Translation memory keyed by text and language pair, with domain filter
 *   and least-recently-used retention
 * - Background batch jobs with `pending`/`processing`/`completed`/`failed` status
 * - Domain glossaries and formality adjustments
 * - Script-based language detection
 * - Bounded translation history and user preferences
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Translation services:
 *   - `translation::core`: Single-text translation
 *   - `translation::memory`: Translation memory
 *   - `translation::batch`: Batch job queue
 *   - `translation::domain`: Domain terminology and formality
 *   - `translation::document`: Document translation
 * - `providers`: Translation backends (simulated, mock)
 * - `session`: History and user preferences
 * - `language_utils`: Language catalog, detection and ISO code utilities
 * - `clock`: Injectable time source
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod clock;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, BatchError, DocumentError, ProviderError, TranslationError};
pub use language_utils::{detect_language, get_language_name, language_codes_match};
pub use translation::{BatchQueue, TranslationMemory, TranslationService};
