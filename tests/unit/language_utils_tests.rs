/*!
 * Tests for language code utilities
 */

use sentistream::language_utils::{
    codes_match, language_name, normalize_for_api, validate_language_code,
};

/// Test tolerant code matching across ISO 639 forms
#[test]
fn test_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(codes_match("en", "en"));
    assert!(codes_match("EN", "en"));
    assert!(codes_match("eng", "en"));
    assert!(codes_match("fra", "fr"));
    assert!(codes_match("fre", "fr")); // bibliographic variant
    assert!(codes_match("deu", "ger"));
}

/// Test that different languages never match
#[test]
fn test_codes_match_withDifferentLanguages_shouldNotMatch() {
    assert!(!codes_match("en", "fr"));
    assert!(!codes_match("eng", "fra"));
}

/// Test that unknown codes match nothing, including themselves
#[test]
fn test_codes_match_withUnknownCode_shouldNotMatch() {
    assert!(!codes_match("xx", "en"));
    assert!(!codes_match("xx", "xx"));
    assert!(!codes_match("", "en"));
    assert!(!codes_match("english", "en"));
}

/// Test normalization to the form service APIs accept
#[test]
fn test_normalize_for_api_withVariousForms_shouldPrefer2Letter() {
    assert_eq!(normalize_for_api("en").unwrap(), "en");
    assert_eq!(normalize_for_api("eng").unwrap(), "en");
    assert_eq!(normalize_for_api("FR").unwrap(), "fr");
    assert_eq!(normalize_for_api("fre").unwrap(), "fr");
    assert!(normalize_for_api("xyz").is_err());
}

/// Test language code validation
#[test]
fn test_validate_language_code_withValidAndInvalid_shouldJudgeCorrectly() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("chi").is_ok()); // bibliographic Chinese
    assert!(validate_language_code("x").is_err());
    assert!(validate_language_code("xyzq").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test diagnostic language names
#[test]
fn test_language_name_withKnownCode_shouldReturnEnglishName() {
    assert_eq!(language_name("en").unwrap(), "English");
    assert_eq!(language_name("fr").unwrap(), "French");
    assert!(language_name("zz").is_err());
}
