/*!
 * End-to-end tests for the PO export pipeline against a real store
 */

use anyhow::Result;

use locsync::errors::ExportError;
use locsync::export::{ExportEngine, ExportOutcome, ExportRequest, StatusFilter, resolve_language};
use locsync::store::Repository;
use locsync::store::models::LanguageRecord;

use crate::common;

fn export_to_string(
    repo: &Repository,
    langcode: Option<&str>,
    filter: &StatusFilter,
) -> Result<(ExportOutcome, String), ExportError> {
    let language = resolve_language(langcode, repo, "en", false)?;
    let engine = ExportEngine::new(repo, "my-site");
    let mut out = Vec::new();
    let outcome = engine.export(language.as_ref(), filter, &mut out)?;
    Ok((outcome, String::from_utf8(out).unwrap()))
}

/// Test a full language export: header identity plus all three statuses
#[test]
fn test_export_withAllStatuses_shouldWriteCompleteDocument() -> Result<()> {
    let repo = common::seeded_repository()?;

    let (outcome, text) = export_to_string(&repo, Some("fr"), &StatusFilter::all())?;
    assert_eq!(outcome, ExportOutcome::Exported { entries: 3 });

    assert!(text.starts_with("# French translation of my-site\n"));
    assert!(text.contains("\"Language: fr\\n\""));
    assert!(text.contains("msgid \"Hello\"\nmsgstr \"Bonjour\"\n"));
    assert!(text.contains("msgctxt \"menu\"\nmsgid \"Save\"\nmsgstr \"Sauvegarder\"\n"));
    // The untranslated string exports with an empty msgstr
    assert!(text.contains("msgid \"Cancel\"\nmsgstr \"\"\n"));

    Ok(())
}

/// Test that a status filter narrows the exported entries
#[test]
fn test_export_withCustomizedFilter_shouldOnlyExportCustomized() -> Result<()> {
    let repo = common::seeded_repository()?;
    let filter = StatusFilter::from_tokens(&["customized"])?;

    let (outcome, text) = export_to_string(&repo, Some("fr"), &filter)?;
    assert_eq!(outcome, ExportOutcome::Exported { entries: 1 });
    assert!(text.contains("msgid \"Save\""));
    assert!(!text.contains("msgid \"Hello\""));
    assert!(!text.contains("msgid \"Cancel\""));

    Ok(())
}

/// Test that an empty result writes nothing at all, header included
#[test]
fn test_export_withNoMatches_shouldWriteNothing() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    repo.add_language(&LanguageRecord::new("fr", "French"))?;

    let (outcome, text) = export_to_string(&repo, Some("fr"), &StatusFilter::all())?;
    assert_eq!(outcome, ExportOutcome::NothingToExport);
    assert!(text.is_empty());

    Ok(())
}

/// Test template export: every source string, blank msgstr, no language
#[test]
fn test_export_template_shouldExportAllSourceStrings() -> Result<()> {
    let repo = common::seeded_repository()?;

    let (outcome, text) = export_to_string(&repo, None, &StatusFilter::all())?;
    assert_eq!(outcome, ExportOutcome::Exported { entries: 3 });

    assert!(text.starts_with("# Translation template for my-site\n"));
    assert!(text.contains("\"Language: \\n\""));
    // Stored translations never leak into a template
    assert!(!text.contains("Bonjour"));
    assert!(!text.contains("Sauvegarder"));
    assert!(text.contains("msgid \"Hello\"\nmsgstr \"\"\n"));
    assert!(text.contains("msgid \"Save\"\nmsgstr \"\"\n"));

    Ok(())
}

/// Test that an unregistered language is rejected before any output
#[test]
fn test_export_withUnknownLanguage_shouldFail() -> Result<()> {
    let repo = common::seeded_repository()?;

    let result = export_to_string(&repo, Some("nl"), &StatusFilter::all());
    assert!(matches!(result, Err(ExportError::UnknownLanguage(code)) if code == "nl"));

    Ok(())
}

/// Test that a locked language cannot be exported
#[test]
fn test_export_withLockedLanguage_shouldFail() -> Result<()> {
    let repo = common::seeded_repository()?;
    let mut locked = LanguageRecord::new("de", "German");
    locked.locked = true;
    repo.add_language(&locked)?;

    let result = export_to_string(&repo, Some("de"), &StatusFilter::all());
    assert!(matches!(result, Err(ExportError::NotTranslatable(code)) if code == "de"));

    Ok(())
}

/// Test that the source language is only exportable when enabled
#[test]
fn test_export_sourceLanguage_shouldRespectTranslateFlag() -> Result<()> {
    let repo = common::seeded_repository()?;
    repo.add_language(&LanguageRecord::new("en", "English"))?;

    let blocked = resolve_language(Some("en"), &repo, "en", false);
    assert!(matches!(blocked, Err(ExportError::NotTranslatable(_))));

    let allowed = resolve_language(Some("en"), &repo, "en", true)?;
    assert_eq!(allowed.unwrap().code, "en");

    Ok(())
}

/// Test that conflicting options are rejected up front
#[test]
fn test_export_request_shouldRejectConflictingOptions() {
    let request = ExportRequest {
        langcode: Some("fr".to_string()),
        template: true,
        types: Vec::new(),
    };
    assert!(matches!(
        request.preflight(),
        Err(ExportError::OptionConflict(_))
    ));

    let request = ExportRequest {
        langcode: None,
        template: true,
        types: vec!["customized".to_string()],
    };
    assert!(matches!(
        request.preflight(),
        Err(ExportError::OptionConflict(_))
    ));
}
