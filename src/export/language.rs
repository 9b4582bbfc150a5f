/*!
 * Language resolution for PO export.
 *
 * Resolves a requested language code to a concrete exportable language, or
 * to "no language" (template mode), before any translation data is read.
 */

use crate::errors::ExportError;
use crate::export::LanguageRegistry;

/// A language that passed all translatability checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguage {
    /// Short language identifier (e.g. `fr`)
    pub code: String,
    /// Human-readable display name (e.g. `French`)
    pub name: String,
}

/// Resolve a language code against the registry.
///
/// An empty or absent code resolves to `None` (template mode) without
/// error. Otherwise the code must exist in the registry and be
/// translatable: not administratively locked, and, for the distinguished
/// source language, only when `translate_source` is set.
pub fn resolve_language(
    code: Option<&str>,
    registry: &dyn LanguageRegistry,
    source_language: &str,
    translate_source: bool,
) -> Result<Option<ResolvedLanguage>, ExportError> {
    let code = match code {
        Some(c) if !c.trim().is_empty() => c.trim(),
        _ => return Ok(None),
    };

    let language = registry
        .lookup(code)?
        .ok_or_else(|| ExportError::UnknownLanguage(code.to_string()))?;

    if language.locked {
        return Err(ExportError::NotTranslatable(code.to_string()));
    }

    if language.code == source_language && !translate_source {
        return Err(ExportError::NotTranslatable(code.to_string()));
    }

    Ok(Some(ResolvedLanguage {
        code: language.code,
        name: language.name,
    }))
}
