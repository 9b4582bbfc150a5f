/*!
 * Common test utilities for the locsync test suite
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use locsync::source::RemoteString;
use locsync::store::Repository;
use locsync::store::models::LanguageRecord;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Builds a remote string for seeding sources and imports
pub fn remote_string(context: Option<&str>, source: &str, translation: &str) -> RemoteString {
    RemoteString {
        context: context.map(|c| c.to_string()),
        source: source.to_string(),
        translation: translation.to_string(),
    }
}

/// Creates an in-memory repository with French registered and a small set
/// of strings covering every translation status:
/// - "Hello" translated as "Bonjour" (not customized)
/// - "Save" (context "menu") customized as "Sauvegarder"
/// - "Cancel" with no French translation at all
pub fn seeded_repository() -> Result<Repository> {
    let repo = Repository::new_in_memory()?;

    repo.add_language(&LanguageRecord::new("fr", "French"))?;

    let hello = repo.add_source_string(None, "Hello")?;
    repo.upsert_translation(hello, "fr", "Bonjour", false)?;

    let save = repo.add_source_string(Some("menu"), "Save")?;
    repo.upsert_translation(save, "fr", "Sauvegarder", true)?;

    repo.add_source_string(None, "Cancel")?;

    Ok(repo)
}

/// Writes a release mirror directory that a directory-backed source can
/// serve: a manifest plus one strings file per release.
pub fn write_mirror(
    root: &Path,
    project: &str,
    langcode: &str,
    version: &str,
    strings: &[RemoteString],
) -> Result<()> {
    let manifest = serde_json::json!([{
        "project": project,
        "langcode": langcode,
        "version": version,
        "string_count": strings.len(),
    }]);
    fs::write(
        root.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    let project_dir = root.join(project);
    fs::create_dir_all(&project_dir)?;
    fs::write(
        project_dir.join(format!("{}.json", langcode)),
        serde_json::to_string_pretty(strings)?,
    )?;

    Ok(())
}
