/*!
 * PO export engine.
 *
 * Filters the translation store by language and string status, assembles a
 * gettext PO document (header + ordered items) and streams it to a
 * caller-supplied sink. Collaborators are injected through the
 * [`LanguageRegistry`] and [`TranslationReader`] ports so the engine holds
 * no ambient state.
 */

use crate::errors::ExportError;
use crate::store::models::{LanguageRecord, TranslationRecord};

pub mod engine;
pub mod filter;
pub mod language;
pub mod po;

pub use engine::{ExportEngine, ExportOutcome};
pub use filter::StatusFilter;
pub use language::{resolve_language, ResolvedLanguage};
pub use po::PoHeader;

/// Language registry port: lookup by code yields a descriptor with the
/// display name and the locked flag, or `None` for unknown codes.
pub trait LanguageRegistry {
    /// Look up a language by its short code
    fn lookup(&self, code: &str) -> anyhow::Result<Option<LanguageRecord>>;
}

/// Record-store port: a single logical cursor over the records matching a
/// language and status filter.
///
/// Records are produced item-by-item in store iteration order, without
/// buffering the result set; the store may hold tens of thousands of
/// strings. A `None` language selects template mode: every source string,
/// regardless of any stored translation.
pub trait TranslationReader {
    /// Visit each matching record in store order; returns the record count.
    ///
    /// An error returned by `visit` aborts the traversal and is surfaced
    /// unchanged, so write failures keep their kind.
    fn for_each_record(
        &self,
        langcode: Option<&str>,
        filter: &StatusFilter,
        visit: &mut dyn FnMut(TranslationRecord) -> Result<(), ExportError>,
    ) -> Result<u64, ExportError>;
}

/// Raw export options as the command line supplies them
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Target language code; `None` together with `template` selects
    /// template mode
    pub langcode: Option<String>,
    /// Export source strings only (a `.pot` translation template)
    pub template: bool,
    /// Raw status tokens for the filter
    pub types: Vec<String>,
}

impl ExportRequest {
    /// Pre-flight validation of the option combination.
    ///
    /// Runs before any store access, so conflicting requests fail fast with
    /// no partial output.
    pub fn preflight(&self) -> Result<(), ExportError> {
        let langcode = self.langcode.as_deref().unwrap_or("");
        if self.template && !langcode.is_empty() {
            return Err(ExportError::OptionConflict(
                "--template cannot be combined with --langcode".to_string(),
            ));
        }
        if !self.template && langcode.is_empty() {
            return Err(ExportError::OptionConflict(
                "either --langcode or --template is required".to_string(),
            ));
        }
        if self.template && !self.types.is_empty() {
            return Err(ExportError::OptionConflict(
                "--types cannot be combined with --template".to_string(),
            ));
        }
        Ok(())
    }
}
