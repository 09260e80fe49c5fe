/*!
 * Tests for ISO language code utilities
 */

use vocabdeck::language_utils::{get_language_name, resolve_language, validate_language_code};

/// Test that 2- and 3-letter codes validate
#[test]
fn test_validate_language_code_withValidCodes_shouldSucceed() {
    for code in ["ro", "RO", " en ", "ron", "rum", "fra", "fre"] {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
}

/// Test that unknown codes are rejected
#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    for code in ["", "x", "xx", "1a", "english"] {
        assert!(validate_language_code(code).is_err(), "{} should be invalid", code);
    }
}

/// Test that bibliographic codes resolve to the same language as the others
#[test]
fn test_resolve_language_withBibliographicCode_shouldMatchTerminologyCode() {
    assert_eq!(resolve_language("rum").unwrap(), resolve_language("ro").unwrap());
    assert_eq!(resolve_language("ger").unwrap(), resolve_language("deu").unwrap());
    assert_ne!(resolve_language("ro").unwrap(), resolve_language("en").unwrap());
}

/// Test that names are resolved in English
#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fre").unwrap(), "French");
}
