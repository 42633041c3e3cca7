/*!
 * Document types for document translation.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File types accepted for document translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFileType {
    /// Plain text
    Txt,
    /// Markdown
    Md,
    /// HTML
    Html,
    /// Comma separated values
    Csv,
}

impl SupportedFileType {
    /// Every supported type
    pub const ALL: [SupportedFileType; 4] = [Self::Txt, Self::Md, Self::Html, Self::Csv];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
            Self::Csv => "csv",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Txt => "Plain text",
            Self::Md => "Markdown",
            Self::Html => "HTML document",
            Self::Csv => "CSV table",
        }
    }

    /// Resolve the type of a file name from its extension, case-insensitively
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "txt" => Some(Self::Txt),
            "md" | "markdown" => Some(Self::Md),
            "html" | "htm" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Comma separated list of accepted extensions, for error messages
    pub fn accepted_extensions() -> String {
        Self::ALL
            .iter()
            .map(|t| format!(".{}", t.extension()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Whether a file name has a supported extension
pub fn is_file_supported(file_name: &str) -> bool {
    SupportedFileType::from_file_name(file_name).is_some()
}

/// Rough word count estimate from a file size, about six bytes per word
pub fn estimate_word_count(size_bytes: usize) -> usize {
    size_bytes.div_ceil(6)
}

/// Name of the translated file: `<stem>_<target>.<ext>`
pub fn translated_file_name(file_name: &str, target_language: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => format!("{}_{}.{}", stem, target_language, extension),
        None => format!("{}_{}", stem, target_language),
    }
}

/// A translated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedDocument {
    /// Output file name
    pub file_name: String,
    /// Translated content
    pub content: String,
    /// Estimated words in the source document
    pub word_count: usize,
    /// Source language used (given or detected)
    pub detected_language: Option<String>,
}
