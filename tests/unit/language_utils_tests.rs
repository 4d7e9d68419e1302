/*!
 * Tests for language code utilities
 */

use scriptswap::language_utils::{language_display_name, validate_language_code};

/// Test that valid ISO 639-1 codes are accepted
#[test]
fn test_validate_language_code_withTwoLetterCodes_shouldSucceed() {
    assert!(validate_language_code("zh").is_ok());
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("FR").is_ok()); // case-insensitive
}

/// Test that valid ISO 639-3 codes are accepted
#[test]
fn test_validate_language_code_withThreeLetterCodes_shouldSucceed() {
    assert!(validate_language_code("zho").is_ok());
    assert!(validate_language_code("eng").is_ok());
}

/// Test that invalid codes are rejected
#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("q1").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test that display names resolve for known codes
#[test]
fn test_language_display_name_withKnownCode_shouldReturnName() {
    assert_eq!(language_display_name("zh"), "Chinese");
    assert_eq!(language_display_name("en"), "English");
}

/// Test that unknown codes fall back to the code itself
#[test]
fn test_language_display_name_withUnknownCode_shouldReturnCode() {
    assert_eq!(language_display_name("??"), "??");
}
