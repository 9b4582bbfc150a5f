/*!
 * End-to-end tests for the update check and batch import pipeline
 */

use anyhow::Result;

use locsync::errors::UpdateError;
use locsync::export::{ExportEngine, ExportOutcome, StatusFilter, resolve_language};
use locsync::source::file::FileSource;
use locsync::source::mock::MockSource;
use locsync::store::Repository;
use locsync::store::models::LanguageRecord;
use locsync::update::{UpdateChecker, UpdateRunner};

use crate::common;
use crate::common::remote_string;

/// Test that a fresh availability cache short-circuits the source
#[tokio::test]
async fn test_check_withFreshCache_shouldNotContactSource() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let source = MockSource::working().with_release(
        "core",
        "fr",
        "1.0",
        vec![remote_string(None, "Hello", "Bonjour")],
    );

    let checker = UpdateChecker::new(&repo, &source, 3600);

    let first = checker.check(false).await?;
    assert_eq!(first.len(), 1);
    assert_eq!(source.list_calls(), 1);

    let second = checker.check(false).await?;
    assert_eq!(second.len(), 1);
    assert_eq!(source.list_calls(), 1, "fresh cache must be served locally");

    Ok(())
}

/// Test that force bypasses a fresh cache
#[tokio::test]
async fn test_check_withForce_shouldAlwaysContactSource() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let source = MockSource::working().with_release(
        "core",
        "fr",
        "1.0",
        vec![remote_string(None, "Hello", "Bonjour")],
    );

    let checker = UpdateChecker::new(&repo, &source, 3600);
    checker.check(false).await?;
    checker.check(true).await?;
    assert_eq!(source.list_calls(), 2);

    Ok(())
}

/// Test that a failing source surfaces as a source error, not a panic
#[tokio::test]
async fn test_check_withFailingSource_shouldReportSourceError() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let source = MockSource::failing();

    let checker = UpdateChecker::new(&repo, &source, 0);
    let result = checker.check(false).await;
    assert!(matches!(result, Err(UpdateError::SourceFailed(_))));

    Ok(())
}

/// Test the full pipeline: check, import, then export what was imported
#[tokio::test]
async fn test_update_thenExport_shouldRoundTripTranslations() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    repo.add_language(&LanguageRecord::new("fr", "French"))?;

    let source = MockSource::working().with_release(
        "core",
        "fr",
        "1.0",
        vec![
            remote_string(None, "Hello", "Bonjour"),
            remote_string(Some("menu"), "Save", "Enregistrer"),
        ],
    );

    let checker = UpdateChecker::new(&repo, &source, 3600);
    checker.check(false).await?;

    let runner = UpdateRunner::new(&repo, &source, 100).quiet();
    let summary = runner.run(&[]).await?;
    assert_eq!(summary.releases, 1);
    assert_eq!(summary.imported, 2);

    let language = resolve_language(Some("fr"), &repo, "en", false)?;
    let engine = ExportEngine::new(&repo, "my-site");
    let mut out = Vec::new();
    let outcome = engine.export(language.as_ref(), &StatusFilter::all(), &mut out)?;
    assert_eq!(outcome, ExportOutcome::Exported { entries: 2 });

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("msgid \"Hello\"\nmsgstr \"Bonjour\"\n"));
    assert!(text.contains("msgctxt \"menu\"\nmsgid \"Save\"\nmsgstr \"Enregistrer\"\n"));

    Ok(())
}

/// Test that an import never overwrites a customized translation
#[tokio::test]
async fn test_update_shouldPreserveCustomizedTranslations() -> Result<()> {
    let repo = common::seeded_repository()?;

    // The release carries different text for the customized "Save" string
    let source = MockSource::working().with_release(
        "core",
        "fr",
        "2.0",
        vec![
            remote_string(Some("menu"), "Save", "Enregistrer"),
            remote_string(None, "Hello", "Salut"),
        ],
    );

    let checker = UpdateChecker::new(&repo, &source, 3600);
    checker.check(false).await?;

    let runner = UpdateRunner::new(&repo, &source, 100).quiet();
    runner.run(&[]).await?;

    let language = resolve_language(Some("fr"), &repo, "en", false)?;
    let engine = ExportEngine::new(&repo, "my-site");
    let mut out = Vec::new();
    engine.export(language.as_ref(), &StatusFilter::all(), &mut out)?;

    let text = String::from_utf8(out).unwrap();
    // The customized translation survived, the default one was replaced
    assert!(text.contains("msgstr \"Sauvegarder\""));
    assert!(!text.contains("msgstr \"Enregistrer\""));
    assert!(text.contains("msgid \"Hello\"\nmsgstr \"Salut\"\n"));

    Ok(())
}

/// Test restricting an update run to a subset of languages
#[tokio::test]
async fn test_update_withLanguageSubset_shouldSkipOtherReleases() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let source = MockSource::working()
        .with_release("core", "fr", "1.0", vec![remote_string(None, "Hello", "Bonjour")])
        .with_release("core", "de", "1.0", vec![remote_string(None, "Hello", "Hallo")]);

    let checker = UpdateChecker::new(&repo, &source, 3600);
    checker.check(false).await?;

    let runner = UpdateRunner::new(&repo, &source, 100).quiet();
    let summary = runner.run(&["fr".to_string()]).await?;
    assert_eq!(summary.releases, 1);
    assert_eq!(summary.imported, 1);

    // A requested code with no release is skipped without failing the run
    let summary = runner.run(&["nl".to_string()]).await?;
    assert_eq!(summary.releases, 0);
    assert_eq!(summary.imported, 0);

    Ok(())
}

/// Test the directory-backed source end to end through check and update
#[tokio::test]
async fn test_update_fromDirectoryMirror_shouldImport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_mirror(
        temp_dir.path(),
        "core",
        "fr",
        "8.x-1.4",
        &[
            remote_string(None, "Hello", "Bonjour"),
            remote_string(None, "Cancel", "Annuler"),
        ],
    )?;

    let repo = Repository::new_in_memory()?;
    let source = FileSource::new(temp_dir.path());

    let checker = UpdateChecker::new(&repo, &source, 3600);
    let releases = checker.check(false).await?;
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].version, "8.x-1.4");

    let runner = UpdateRunner::new(&repo, &source, 1).quiet();
    let summary = runner.run(&[]).await?;
    assert_eq!(summary.imported, 2);

    Ok(())
}
