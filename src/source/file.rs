/*!
 * Directory-backed translation source.
 *
 * Serves releases from a local mirror directory:
 *
 * ```text
 * <root>/manifest.json            release listing
 * <root>/<project>/<langcode>.json   the release's strings
 * ```
 *
 * Useful for air-gapped deployments and for exercising the update pipeline
 * without a network transport.
 */

use async_trait::async_trait;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::errors::UpdateError;
use crate::source::{AvailableRelease, RemoteString, TranslationSource};

/// Manifest entry as stored on disk
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    project: String,
    langcode: String,
    version: String,
    string_count: u64,
}

/// Translation source reading releases from a local directory
#[derive(Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at the given mirror directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &PathBuf) -> Result<T, UpdateError> {
        let file = File::open(path)
            .map_err(|e| UpdateError::SourceFailed(format!("cannot open {:?}: {}", path, e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| UpdateError::SourceFailed(format!("cannot parse {:?}: {}", path, e)))
    }
}

#[async_trait]
impl TranslationSource for FileSource {
    async fn list_available(&self) -> Result<Vec<AvailableRelease>, UpdateError> {
        let manifest_path = self.root.join("manifest.json");
        let entries: Vec<ManifestEntry> = self.read_json(&manifest_path)?;

        Ok(entries
            .into_iter()
            .map(|entry| AvailableRelease {
                project: entry.project,
                langcode: entry.langcode,
                version: entry.version,
                string_count: entry.string_count,
            })
            .collect())
    }

    async fn fetch_strings(
        &self,
        project: &str,
        langcode: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<RemoteString>, UpdateError> {
        let path = self.root.join(project).join(format!("{}.json", langcode));
        let strings: Vec<RemoteString> = self.read_json(&path)?;

        let start = (offset as usize).min(strings.len());
        let end = (start + limit as usize).min(strings.len());
        Ok(strings[start..end].to_vec())
    }
}
