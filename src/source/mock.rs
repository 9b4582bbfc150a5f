/*!
 * Mock translation source for testing.
 *
 * Behavior modes:
 * - `MockSource::working()` - always answers with the seeded releases
 * - `MockSource::failing()` - always fails
 * - `MockSource::intermittent(n)` - fails every nth fetch
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::UpdateError;
use crate::source::{AvailableRelease, RemoteString, TranslationSource};

/// Behavior mode for the mock source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with a source error
    Failing,
    /// Fails every nth fetch request
    Intermittent {
        /// Every how-many-th fetch fails
        fail_every: usize,
    },
}

/// Mock source serving seeded releases from memory
#[derive(Debug)]
pub struct MockSource {
    behavior: MockBehavior,
    releases: Vec<AvailableRelease>,
    strings: HashMap<(String, String), Vec<RemoteString>>,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// A source that always succeeds
    pub fn working() -> Self {
        Self {
            behavior: MockBehavior::Working,
            releases: Vec::new(),
            strings: HashMap::new(),
            list_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// A source that always fails
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Failing,
            ..Self::working()
        }
    }

    /// A source whose every nth fetch fails
    pub fn intermittent(fail_every: usize) -> Self {
        Self {
            behavior: MockBehavior::Intermittent { fail_every },
            ..Self::working()
        }
    }

    /// Seed a release and its strings
    pub fn with_release(
        mut self,
        project: &str,
        langcode: &str,
        version: &str,
        strings: Vec<RemoteString>,
    ) -> Self {
        self.releases.push(AvailableRelease {
            project: project.to_string(),
            langcode: langcode.to_string(),
            version: version.to_string(),
            string_count: strings.len() as u64,
        });
        self.strings
            .insert((project.to_string(), langcode.to_string()), strings);
        self
    }

    /// How many availability listings were requested
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many string chunks were requested
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationSource for MockSource {
    async fn list_available(&self) -> Result<Vec<AvailableRelease>, UpdateError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.behavior == MockBehavior::Failing {
            return Err(UpdateError::SourceFailed(
                "mock source is configured to fail".to_string(),
            ));
        }

        Ok(self.releases.clone())
    }

    async fn fetch_strings(
        &self,
        project: &str,
        langcode: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<RemoteString>, UpdateError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Failing => {
                return Err(UpdateError::SourceFailed(
                    "mock source is configured to fail".to_string(),
                ));
            }
            MockBehavior::Intermittent { fail_every } if fail_every > 0 && call % fail_every == 0 => {
                return Err(UpdateError::SourceFailed(format!(
                    "mock source failed on fetch #{}",
                    call
                )));
            }
            _ => {}
        }

        let strings = self
            .strings
            .get(&(project.to_string(), langcode.to_string()))
            .ok_or_else(|| {
                UpdateError::SourceFailed(format!("no such release: {}/{}", project, langcode))
            })?;

        let start = (offset as usize).min(strings.len());
        let end = (start + limit as usize).min(strings.len());
        Ok(strings[start..end].to_vec())
    }
}
