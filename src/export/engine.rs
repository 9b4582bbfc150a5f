/*!
 * The PO export pipeline.
 *
 * One invocation performs one store traversal and one write pass, strictly
 * synchronous: records stream from the reader cursor to the destination
 * sink in store order, header first. The header is only written once the
 * first record arrives, so an empty result produces no output at all.
 */

use std::io::Write;

use log::debug;

use crate::errors::ExportError;
use crate::export::language::ResolvedLanguage;
use crate::export::po::{self, PoHeader};
use crate::export::{StatusFilter, TranslationReader};

/// Result of a completed export invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document was written with this many entries
    Exported {
        /// Number of PO entries written (header excluded)
        entries: u64,
    },
    /// No record matched the filter; nothing was written. This is a normal
    /// outcome, not a failure.
    NothingToExport,
}

/// The export engine over an injected record-store port
pub struct ExportEngine<'a> {
    reader: &'a dyn TranslationReader,
    project_name: &'a str,
}

impl<'a> ExportEngine<'a> {
    /// Create an engine reading from the given store for the given project
    /// identity
    pub fn new(reader: &'a dyn TranslationReader, project_name: &'a str) -> Self {
        Self {
            reader,
            project_name,
        }
    }

    /// Run the export pipeline for an already-resolved language and filter.
    ///
    /// `language` of `None` selects template mode. Records are written in
    /// the order the store yields them; any I/O error aborts the whole
    /// export as [`ExportError::Write`].
    pub fn export<W: Write>(
        &self,
        language: Option<&ResolvedLanguage>,
        filter: &StatusFilter,
        out: &mut W,
    ) -> Result<ExportOutcome, ExportError> {
        let template = language.is_none();
        let header = match language {
            Some(lang) => PoHeader::new(self.project_name, lang.code.clone(), lang.name.clone()),
            None => PoHeader::template(self.project_name),
        };

        let langcode = language.map(|l| l.code.as_str());
        debug!(
            "Starting PO export (language: {}, template: {})",
            langcode.unwrap_or("-"),
            template
        );

        let mut header_written = false;
        let entries = self.reader.for_each_record(langcode, filter, &mut |record| {
            if !header_written {
                header.write_to(out)?;
                header_written = true;
            }
            po::write_entry(out, &record, template)?;
            Ok(())
        })?;

        if entries == 0 {
            debug!("No records matched the export filter");
            return Ok(ExportOutcome::NothingToExport);
        }

        out.flush()?;
        Ok(ExportOutcome::Exported { entries })
    }
}
