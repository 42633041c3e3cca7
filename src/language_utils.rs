use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Language utilities for the supported language catalog
///
/// This module provides the list of languages the product offers, a
/// lightweight script-based language detector, and functions for
/// validating, normalizing, and matching ISO 639 language codes.
/// A language offered for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// ISO 639-1 code
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
}

/// Languages available for translation, English first
pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage { code: "en", name: "English" },
    SupportedLanguage { code: "es", name: "Spanish" },
    SupportedLanguage { code: "fr", name: "French" },
    SupportedLanguage { code: "de", name: "German" },
    SupportedLanguage { code: "it", name: "Italian" },
    SupportedLanguage { code: "pt", name: "Portuguese" },
    SupportedLanguage { code: "ru", name: "Russian" },
    SupportedLanguage { code: "zh", name: "Chinese" },
    SupportedLanguage { code: "ja", name: "Japanese" },
    SupportedLanguage { code: "ko", name: "Korean" },
    SupportedLanguage { code: "ar", name: "Arabic" },
    SupportedLanguage { code: "hi", name: "Hindi" },
    SupportedLanguage { code: "bn", name: "Bengali" },
    SupportedLanguage { code: "tr", name: "Turkish" },
    SupportedLanguage { code: "pl", name: "Polish" },
    SupportedLanguage { code: "te", name: "Telugu" },
];

/// Look up a supported language, falling back to English for unknown codes
pub fn get_language_by_code(code: &str) -> &'static SupportedLanguage {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .unwrap_or(&SUPPORTED_LANGUAGES[0])
}

/// Whether a code is in the supported catalog
pub fn is_supported_language(code: &str) -> bool {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.iter().any(|lang| lang.code == code)
}

/// Human readable "Source → Target" label
pub fn format_language_pair(source: &str, target: &str) -> String {
    format!(
        "{} → {}",
        get_language_by_code(source).name,
        get_language_by_code(target).name
    )
}

static CJK_OR_KANA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{3000}-\x{303f}\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{ff00}-\x{ff9f}\x{4e00}-\x{9faf}\x{3400}-\x{4dbf}]")
        .expect("valid CJK pattern")
});
static KANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{3040}-\x{309f}\x{30a0}-\x{30ff}]").expect("valid kana pattern"));
static HAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9faf}\x{3400}-\x{4dbf}]").expect("valid han pattern"));
static HANGUL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{ac00}-\x{d7af}]").expect("valid hangul pattern"));
static ARABIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0600}-\x{06ff}]").expect("valid arabic pattern"));
static CYRILLIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0400}-\x{04ff}]").expect("valid cyrillic pattern"));
static TELUGU: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0c00}-\x{0c7f}]").expect("valid telugu pattern"));

/// Accent heuristics for Latin-script languages, checked in order
static LATIN_MARKERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("es", "[áéíóúüñ]"),
        ("fr", "[àâçéèêëîïôùûü]"),
        ("de", "[äöüß]"),
        ("it", "[àèéìòó]"),
        ("pt", "[ãçõ]"),
    ]
    .into_iter()
    .map(|(code, pattern)| (code, Regex::new(pattern).expect("valid latin marker pattern")))
    .collect()
});

/// Guess the language of a text from the scripts and accents it contains
///
/// Texts shorter than three characters, and texts with no distinguishing
/// characters, are reported as English.
pub fn detect_language(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < 3 {
        return "en".to_string();
    }

    if CJK_OR_KANA.is_match(trimmed) {
        if KANA.is_match(trimmed) {
            return "ja".to_string();
        }
        if HAN.is_match(trimmed) {
            return "zh".to_string();
        }
    }
    if HANGUL.is_match(trimmed) {
        return "ko".to_string();
    }
    if ARABIC.is_match(trimmed) {
        return "ar".to_string();
    }
    if CYRILLIC.is_match(trimmed) {
        return "ru".to_string();
    }
    if TELUGU.is_match(trimmed) {
        return "te".to_string();
    }

    LATIN_MARKERS
        .iter()
        .find(|(_, marker)| marker.is_match(trimmed))
        .map(|(code, _)| code.to_string())
        .unwrap_or_else(|| "en".to_string())
}

/// ISO 639-2/B codes that differ from their 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    normalize_to_part2t(code).map(|_| ())
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes represent the same language
///
/// Codes that are not valid ISO 639 codes only match when they are
/// textually equal.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => code1.trim().eq_ignore_ascii_case(code2.trim()),
    }
}

/// Get the language name for a code
///
/// The supported catalog wins; other valid ISO codes are resolved via isolang.
pub fn get_language_name(code: &str) -> Result<String> {
    if is_supported_language(code) {
        return Ok(get_language_by_code(code).name.to_string());
    }

    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
