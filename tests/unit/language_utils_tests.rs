/*!
 * Tests for language catalog, detection and ISO code utilities
 */

use lingomem::language_utils::{
    SUPPORTED_LANGUAGES, detect_language, format_language_pair, get_language_by_code, get_language_name,
    is_supported_language, language_codes_match, normalize_to_part2t, validate_language_code,
};

#[test]
fn test_supportedLanguages_shouldListSixteenUniqueCodes() {
    assert_eq!(SUPPORTED_LANGUAGES.len(), 16);
    let mut codes: Vec<_> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 16);
}

#[test]
fn test_getLanguageByCode_withUnknownCode_shouldFallBackToEnglish() {
    assert_eq!(get_language_by_code("ja").name, "Japanese");
    assert_eq!(get_language_by_code("xx").code, "en");
    assert!(is_supported_language("te"));
    assert!(!is_supported_language("sw"));
}

#[test]
fn test_formatLanguagePair_shouldUseNames() {
    assert_eq!(format_language_pair("en", "es"), "English → Spanish");
}

#[test]
fn test_detectLanguage_withEachScript_shouldPickLanguage() {
    assert_eq!(detect_language("こんにちは世界"), "ja");
    assert_eq!(detect_language("你好世界"), "zh");
    assert_eq!(detect_language("안녕하세요"), "ko");
    assert_eq!(detect_language("مرحبا بالعالم"), "ar");
    assert_eq!(detect_language("Привет мир"), "ru");
    assert_eq!(detect_language("నమస్కారం"), "te");
}

#[test]
fn test_detectLanguage_withLatinText_shouldUseAccentMarkers() {
    assert_eq!(detect_language("¿Dónde está la estación?"), "es");
    assert_eq!(detect_language("Ça va très bien"), "fr");
    assert_eq!(detect_language("Straße"), "de");
    assert_eq!(detect_language("Ciao, perché?"), "es");
    assert_eq!(detect_language("Não sei"), "pt");
    assert_eq!(detect_language("Hello world"), "en");
}

#[test]
fn test_detectLanguage_withShortOrBlankText_shouldDefaultToEnglish() {
    assert_eq!(detect_language("你好"), "en");
    assert_eq!(detect_language("   "), "en");
    assert_eq!(detect_language(""), "en");
}

#[test]
fn test_normalizeToPart2t_shouldAcceptPart1AndPart2B() {
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("deu").unwrap(), "deu");
    assert!(normalize_to_part2t("xyz1").is_err());
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossStandards() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("de", "ger"));
    assert!(!language_codes_match("en", "es"));
    assert!(language_codes_match("klingon", "KLINGON"));
    assert!(!language_codes_match("klingon", "en"));
}

#[test]
fn test_getLanguageName_shouldPreferCatalogThenIsoNames() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("swe").unwrap(), "Swedish");
    assert!(get_language_name("zz").is_err());
}
