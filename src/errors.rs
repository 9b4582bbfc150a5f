/*!
 * Error types for the locsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while resolving options and exporting a PO document.
///
/// "Nothing to export" is deliberately not represented here; an empty result
/// is a normal outcome and is reported through
/// [`crate::export::ExportOutcome::NothingToExport`].
#[derive(Error, Debug)]
pub enum ExportError {
    /// Invalid combination of export options, detected before any store access
    #[error("{0}")]
    OptionConflict(String),

    /// A status token that maps to none of the canonical statuses
    #[error(
        "invalid translation status '{token}' (allowed: not-customized, customized, not-translated)"
    )]
    InvalidFilter {
        /// The offending token as the caller supplied it
        token: String,
    },

    /// Language code not present in the language registry
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    /// Language exists but is locked, or is the source language while
    /// source-language translation is disabled
    #[error("language '{0}' is not translatable")]
    NotTranslatable(String),

    /// I/O failure while writing the PO document
    #[error("failed to write PO output: {0}")]
    Write(#[from] std::io::Error),

    /// Failure reading from the translation store
    #[error("translation store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Errors that can occur while checking for or importing translation updates
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The remote translation source failed to answer a request
    #[error("translation source request failed: {0}")]
    SourceFailed(String),

    /// An import batch was interrupted; it stays checkpointed and resumable
    #[error("import batch {batch_id} interrupted: {reason}")]
    BatchInterrupted {
        /// Identifier of the interrupted batch
        batch_id: String,
        /// What went wrong
        reason: String,
    },

    /// No translation source is configured
    #[error("no translation source configured: {0}")]
    NoSource(String),

    /// Failure reading from or writing to the translation store
    #[error("translation store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the export pipeline
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Error from the update pipeline
    #[error("Update error: {0}")]
    Update(#[from] UpdateError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
