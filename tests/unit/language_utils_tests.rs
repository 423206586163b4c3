/*!
 * Tests for language code utilities
 */

use json_translator::language_utils::{
    get_language_name, provider_language_code, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withKnownCodes_shouldAccept() {
    for code in ["en", "ja", "fr", "eng", "jpn", "fre", "ger", " EN "] {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
}

#[test]
fn test_validateLanguageCode_withUnknownCodes_shouldReject() {
    for code in ["", "x", "xx", "xyz", "english"] {
        assert!(validate_language_code(code).is_err(), "{:?} should be invalid", code);
    }
}

#[test]
fn test_providerLanguageCode_shouldPreferTwoLetterCodes() {
    assert_eq!(provider_language_code("jpn").unwrap(), "ja");
    assert_eq!(provider_language_code("ger").unwrap(), "de");
    assert_eq!(provider_language_code("EN").unwrap(), "en");
    assert!(provider_language_code("zz").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(get_language_name("fre").unwrap(), "French");
}
