/*!
 * Remote translation source port.
 *
 * The transport behind this trait is a black box: the update pipeline only
 * asks what releases are available and fetches their strings in bounded
 * chunks. Implementations include a directory-backed source for local
 * release mirrors and a mock source for tests.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::UpdateError;

/// One translation release a source offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableRelease {
    /// Project identifier
    pub project: String,
    /// Language code the release covers
    pub langcode: String,
    /// Release version string
    pub version: String,
    /// Number of strings in the release
    pub string_count: u64,
}

/// One translated string as a source delivers it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteString {
    /// Context/domain identifier, if any
    #[serde(default)]
    pub context: Option<String>,
    /// Source string
    pub source: String,
    /// Translated string
    pub translation: String,
}

/// Common trait for all translation sources
///
/// This trait defines the interface the update pipeline consumes, allowing
/// sources to be used interchangeably.
#[async_trait]
pub trait TranslationSource: Send + Sync + Debug {
    /// List the releases this source currently offers
    async fn list_available(&self) -> Result<Vec<AvailableRelease>, UpdateError>;

    /// Fetch a bounded chunk of strings from a release.
    ///
    /// Returns at most `limit` strings starting at `offset`; an empty
    /// result means the release is exhausted.
    async fn fetch_strings(
        &self,
        project: &str,
        langcode: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<RemoteString>, UpdateError>;
}

pub mod file;
pub mod mock;
