/*!
 * Tests for language utility functions
 */

use lingojson::language_utils::{get_language_name, language_codes_match, output_file_stem, validate_language_code};

#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCanonicalForm() {
    assert_eq!(validate_language_code("de").unwrap(), "DE");
    assert_eq!(validate_language_code(" JA ").unwrap(), "JA");
    assert_eq!(validate_language_code("pt-br").unwrap(), "PT-BR");
    assert_eq!(validate_language_code("zh-Hans").unwrap(), "ZH-HANS");
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("eng").is_err());
    assert!(validate_language_code("en-").is_err());
    assert!(validate_language_code("en-u s").is_err());
}

#[test]
fn test_language_codes_match_shouldCompareBaseLanguage() {
    assert!(language_codes_match("EN", "en"));
    assert!(language_codes_match("EN-US", "en"));
    assert!(language_codes_match("pt-br", "PT-PT"));
    assert!(!language_codes_match("EN", "DE"));
    assert!(!language_codes_match("", ""));
}

#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("DE").unwrap(), "German");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(get_language_name("AR").unwrap(), "Arabic");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_output_file_stem_shouldLowercase() {
    assert_eq!(output_file_stem("DE"), "de");
    assert_eq!(output_file_stem(" PT-BR "), "pt-br");
}
