use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for normalizing ISO 639-1 (2-letter)
/// and ISO 639-3 (3-letter) language codes and resolving their English
/// display names for PO headers and registry entries.
/// Normalize a language code to lowercase and check it against ISO 639
pub fn normalize_langcode(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    let known = match normalized.len() {
        2 => Language::from_639_1(&normalized).is_some(),
        3 => Language::from_639_3(&normalized).is_some(),
        _ => false,
    };

    if known {
        Ok(normalized)
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Resolve the English display name for a language code
///
/// Returns `None` for codes ISO 639 does not know; callers fall back to
/// the raw code in that case.
pub fn display_name(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();

    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    language.map(|l| l.to_name().to_string())
}
