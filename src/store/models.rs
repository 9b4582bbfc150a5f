/*!
 * Translation store entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Translation state of a single string for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationStatus {
    /// No translation stored for this language
    NotTranslated,
    /// Translated and locally modified
    Customized,
    /// Translated and unmodified from the imported default
    NotCustomized,
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationStatus::NotTranslated => write!(f, "not-translated"),
            TranslationStatus::Customized => write!(f, "customized"),
            TranslationStatus::NotCustomized => write!(f, "not-customized"),
        }
    }
}

impl std::str::FromStr for TranslationStatus {
    type Err = anyhow::Error;

    /// Accepts both the hyphenated and the underscored spelling; existing
    /// callers pass either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "not-translated" | "not_translated" => Ok(TranslationStatus::NotTranslated),
            "customized" => Ok(TranslationStatus::Customized),
            "not-customized" | "not_customized" => Ok(TranslationStatus::NotCustomized),
            _ => Err(anyhow::anyhow!("Invalid translation status: {}", s)),
        }
    }
}

/// One translatable string and its current state for a language.
///
/// Read-only snapshot pulled from the store at export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Context/domain identifier, if any
    pub context: Option<String>,
    /// Source string
    pub source: String,
    /// Stored translation; `None` when not translated
    pub translation: Option<String>,
    /// Current translation status
    pub status: TranslationStatus,
}

/// A language known to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    /// Short language identifier (e.g. `fr`)
    pub code: String,
    /// Human-readable display name (e.g. `French`)
    pub name: String,
    /// Administratively locked languages cannot be exported or updated
    pub locked: bool,
}

impl LanguageRecord {
    /// Create an unlocked language entry
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            locked: false,
        }
    }
}

/// One cached remote-availability entry, refreshed by the update checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    /// Project identifier on the remote source
    pub project: String,
    /// Language code the release covers
    pub langcode: String,
    /// Release version string
    pub version: String,
    /// Number of strings the release contains
    pub string_count: i64,
    /// RFC 3339 timestamp of the last successful check
    pub checked_at: String,
}

/// Import batch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Batch is running or was interrupted and can be resumed
    InProgress,
    /// All strings imported
    Completed,
    /// Unrecoverable store error occurred
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::InProgress => write!(f, "in_progress"),
            BatchStatus::Completed => write!(f, "completed"),
            BatchStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(BatchStatus::InProgress),
            "completed" => Ok(BatchStatus::Completed),
            "failed" => Ok(BatchStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid batch status: {}", s)),
        }
    }
}

/// Checkpointed progress of one chunked import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatchRecord {
    /// Unique batch identifier
    pub id: String,
    /// Project the batch imports for
    pub project: String,
    /// Language code the batch imports for
    pub langcode: String,
    /// Total number of strings the release contains
    pub total_strings: i64,
    /// Number of strings imported so far (the resume offset)
    pub imported_strings: i64,
    /// Current batch status
    pub status: BatchStatus,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// RFC 3339 timestamp of the last checkpoint
    pub updated_at: String,
}

impl ImportBatchRecord {
    /// Create a fresh batch at offset zero
    pub fn new(
        project: impl Into<String>,
        langcode: impl Into<String>,
        total_strings: i64,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project: project.into(),
            langcode: langcode.into(),
            total_strings,
            imported_strings: 0,
            status: BatchStatus::InProgress,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
