/*!
 * Gettext PO document serialization.
 *
 * Writes the standard PO textual format: a comment banner, the metadata
 * header entry (empty msgid with metadata in its msgstr), then one entry
 * per exported string.
 */

use std::io::{self, Write};

use crate::store::models::TranslationRecord;

/// PO string escaping: `\`, `"`, newline, carriage return and tab.
pub(crate) fn escape_po(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Document metadata written ahead of all entries.
///
/// Constructed once per export with the project and language names
/// injected, then frozen and written first. The language fields are empty
/// strings in template mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoHeader {
    /// Project or site identity
    pub project: String,
    /// Display name of the exported language; empty in template mode
    pub language_name: String,
    /// Short code of the exported language; empty in template mode
    pub langcode: String,
    /// Plural formula carried through unchanged from the default
    pub plural_forms: String,
}

impl PoHeader {
    /// Default plural formula for the header
    const DEFAULT_PLURAL_FORMS: &'static str = "nplurals=2; plural=(n > 1);";

    /// Header for a language export
    pub fn new(project: impl Into<String>, langcode: impl Into<String>, language_name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            language_name: language_name.into(),
            langcode: langcode.into(),
            plural_forms: Self::DEFAULT_PLURAL_FORMS.to_string(),
        }
    }

    /// Header for a template export: no language identity
    pub fn template(project: impl Into<String>) -> Self {
        Self::new(project, "", "")
    }

    /// Write the comment banner and the metadata entry
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M%z");

        if self.language_name.is_empty() {
            writeln!(w, "# Translation template for {}", self.project)?;
        } else {
            writeln!(w, "# {} translation of {}", self.language_name, self.project)?;
        }
        writeln!(w, "# Generated by locsync")?;
        writeln!(w, "#")?;
        writeln!(w, "msgid \"\"")?;
        writeln!(w, "msgstr \"\"")?;
        writeln!(w, "\"Project-Id-Version: {}\\n\"", escape_po(&self.project))?;
        writeln!(w, "\"POT-Creation-Date: {}\\n\"", now)?;
        writeln!(w, "\"PO-Revision-Date: {}\\n\"", now)?;
        writeln!(w, "\"Last-Translator: \\n\"")?;
        writeln!(
            w,
            "\"Language-Team: {}\\n\"",
            escape_po(&self.language_name)
        )?;
        writeln!(w, "\"Language: {}\\n\"", escape_po(&self.langcode))?;
        writeln!(w, "\"MIME-Version: 1.0\\n\"")?;
        writeln!(w, "\"Content-Type: text/plain; charset=UTF-8\\n\"")?;
        writeln!(w, "\"Content-Transfer-Encoding: 8bit\\n\"")?;
        writeln!(w, "\"Plural-Forms: {}\\n\"", self.plural_forms)?;
        writeln!(w)?;

        Ok(())
    }
}

/// Write one PO entry: optional msgctxt, msgid, msgstr.
///
/// In template mode the msgstr is empty regardless of any stored
/// translation.
pub fn write_entry<W: Write>(
    w: &mut W,
    record: &TranslationRecord,
    template: bool,
) -> io::Result<()> {
    if let Some(context) = record.context.as_deref() {
        if !context.is_empty() {
            writeln!(w, "msgctxt \"{}\"", escape_po(context))?;
        }
    }
    writeln!(w, "msgid \"{}\"", escape_po(&record.source))?;

    let msgstr = if template {
        ""
    } else {
        record.translation.as_deref().unwrap_or("")
    };
    writeln!(w, "msgstr \"{}\"", escape_po(msgstr))?;
    writeln!(w)?;

    Ok(())
}
