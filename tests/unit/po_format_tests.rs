/*!
 * Tests for gettext PO serialization
 */

use locsync::export::PoHeader;
use locsync::export::po::write_entry;
use locsync::store::models::{TranslationRecord, TranslationStatus};

fn record(
    context: Option<&str>,
    source: &str,
    translation: Option<&str>,
    status: TranslationStatus,
) -> TranslationRecord {
    TranslationRecord {
        context: context.map(|c| c.to_string()),
        source: source.to_string(),
        translation: translation.map(|t| t.to_string()),
        status,
    }
}

/// Test the language header banner and metadata fields
#[test]
fn test_header_forLanguage_shouldCarryLanguageIdentity() {
    let header = PoHeader::new("my-site", "fr", "French");
    let mut out = Vec::new();
    header.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("# French translation of my-site\n"));
    assert!(text.contains("\"Project-Id-Version: my-site\\n\""));
    assert!(text.contains("\"Language-Team: French\\n\""));
    assert!(text.contains("\"Language: fr\\n\""));
    assert!(text.contains("\"Content-Type: text/plain; charset=UTF-8\\n\""));
    assert!(text.contains("\"Plural-Forms: nplurals=2; plural=(n > 1);\\n\""));
    // Metadata entry starts with an empty msgid
    assert!(text.contains("msgid \"\"\nmsgstr \"\"\n"));
}

/// Test the template header banner
#[test]
fn test_header_forTemplate_shouldHaveNoLanguageIdentity() {
    let header = PoHeader::template("my-site");
    let mut out = Vec::new();
    header.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("# Translation template for my-site\n"));
    assert!(text.contains("\"Language: \\n\""));
    assert!(text.contains("\"Language-Team: \\n\""));
}

/// Test a plain entry without context
#[test]
fn test_write_entry_withoutContext_shouldOmitMsgctxt() {
    let rec = record(None, "Hello", Some("Bonjour"), TranslationStatus::NotCustomized);
    let mut out = Vec::new();
    write_entry(&mut out, &rec, false).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\n");
}

/// Test that a context becomes a msgctxt line
#[test]
fn test_write_entry_withContext_shouldEmitMsgctxt() {
    let rec = record(
        Some("menu"),
        "Save",
        Some("Enregistrer"),
        TranslationStatus::NotCustomized,
    );
    let mut out = Vec::new();
    write_entry(&mut out, &rec, false).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "msgctxt \"menu\"\nmsgid \"Save\"\nmsgstr \"Enregistrer\"\n\n"
    );
}

/// Test that template mode blanks the msgstr even for translated strings
#[test]
fn test_write_entry_inTemplateMode_shouldBlankMsgstr() {
    let rec = record(None, "Hello", Some("Bonjour"), TranslationStatus::NotCustomized);
    let mut out = Vec::new();
    write_entry(&mut out, &rec, true).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "msgid \"Hello\"\nmsgstr \"\"\n\n");
}

/// Test that untranslated strings export with an empty msgstr
#[test]
fn test_write_entry_withoutTranslation_shouldEmitEmptyMsgstr() {
    let rec = record(None, "Cancel", None, TranslationStatus::NotTranslated);
    let mut out = Vec::new();
    write_entry(&mut out, &rec, false).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "msgid \"Cancel\"\nmsgstr \"\"\n\n");
}

/// Test escaping of quotes, backslashes and control characters
#[test]
fn test_write_entry_withSpecialCharacters_shouldEscape() {
    let rec = record(
        None,
        "Path \"C:\\temp\"\nline\ttwo",
        Some("ok"),
        TranslationStatus::NotCustomized,
    );
    let mut out = Vec::new();
    write_entry(&mut out, &rec, false).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("msgid \"Path \\\"C:\\\\temp\\\"\\nline\\ttwo\""));
}
