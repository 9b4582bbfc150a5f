/*!
 * Tests for language utility functions
 */

use locsync::language_utils::{display_name, normalize_langcode};

/// Test normalization of valid ISO 639 codes
#[test]
fn test_normalize_langcode_withValidCodes_shouldNormalize() {
    assert_eq!(normalize_langcode("fr").unwrap(), "fr");
    assert_eq!(normalize_langcode("FR").unwrap(), "fr");
    assert_eq!(normalize_langcode(" De ").unwrap(), "de");
    assert_eq!(normalize_langcode("fra").unwrap(), "fra");
    assert_eq!(normalize_langcode("deu").unwrap(), "deu");
}

/// Test rejection of codes ISO 639 does not know
#[test]
fn test_normalize_langcode_withInvalidCodes_shouldFail() {
    assert!(normalize_langcode("xx").is_err());
    assert!(normalize_langcode("xyz1").is_err());
    assert!(normalize_langcode("e").is_err());
    assert!(normalize_langcode("").is_err());
    assert!(normalize_langcode("french").is_err());
}

/// Test display name resolution for PO headers
#[test]
fn test_display_name_shouldResolveEnglishNames() {
    assert_eq!(display_name("fr").as_deref(), Some("French"));
    assert_eq!(display_name("de").as_deref(), Some("German"));
    assert_eq!(display_name("ja").as_deref(), Some("Japanese"));
    assert_eq!(display_name("FR").as_deref(), Some("French"));
    assert_eq!(display_name("zz"), None);
}
