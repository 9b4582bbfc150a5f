/*!
 * Repository layer for translation store operations.
 *
 * This module provides a high-level API for all store operations,
 * abstracting away the SQL details and providing type-safe access. It also
 * implements the export engine's `LanguageRegistry` and `TranslationReader`
 * ports.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

use super::connection::StoreConnection;
use super::models::{
    AvailabilityRecord, BatchStatus, ImportBatchRecord, LanguageRecord, TranslationRecord,
    TranslationStatus,
};
use crate::errors::ExportError;
use crate::export::{LanguageRegistry, StatusFilter, TranslationReader};
use crate::source::RemoteString;

/// Repository for translation store operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: StoreConnection,
}

impl Repository {
    /// Create a new repository with the given store connection
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = StoreConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = StoreConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Compute SHA256 hash of text
    pub fn hash_text(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    // =========================================================================
    // Language Operations
    // =========================================================================

    /// Insert or update a language registry entry
    pub fn add_language(&self, language: &LanguageRecord) -> Result<()> {
        let language = language.clone();

        self.db.execute(move |conn| {
            conn.execute(
                r#"
                INSERT INTO languages (code, name, locked) VALUES (?1, ?2, ?3)
                ON CONFLICT(code) DO UPDATE SET name = excluded.name, locked = excluded.locked
                "#,
                params![language.code, language.name, language.locked as i32],
            )?;
            Ok(())
        })
    }

    /// Get a language registry entry by code
    pub fn get_language(&self, code: &str) -> Result<Option<LanguageRecord>> {
        let code = code.to_string();

        self.db.execute(move |conn| {
            let result = conn
                .query_row(
                    "SELECT code, name, locked FROM languages WHERE code = ?1",
                    [&code],
                    |row| {
                        Ok(LanguageRecord {
                            code: row.get(0)?,
                            name: row.get(1)?,
                            locked: row.get::<_, i32>(2)? != 0,
                        })
                    },
                )
                .optional()?;

            Ok(result)
        })
    }

    /// List all registered languages ordered by code
    pub fn list_languages(&self) -> Result<Vec<LanguageRecord>> {
        self.db.execute(|conn| {
            let mut stmt =
                conn.prepare("SELECT code, name, locked FROM languages ORDER BY code")?;
            let rows = stmt.query_map([], |row| {
                Ok(LanguageRecord {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    locked: row.get::<_, i32>(2)? != 0,
                })
            })?;

            let mut languages = Vec::new();
            for row in rows {
                languages.push(row?);
            }
            Ok(languages)
        })
    }

    // =========================================================================
    // String Operations
    // =========================================================================

    /// Insert a source string if it is not already known; returns its id
    pub fn add_source_string(&self, context: Option<&str>, source: &str) -> Result<i64> {
        let context = context.unwrap_or("").to_string();
        let source = source.to_string();
        let hash = Self::hash_text(&source);

        self.db.execute(move |conn| {
            conn.execute(
                r#"
                INSERT INTO source_strings (context, source, source_hash) VALUES (?1, ?2, ?3)
                ON CONFLICT(source_hash, context) DO NOTHING
                "#,
                params![context, source, hash],
            )?;

            let id: i64 = conn.query_row(
                "SELECT id FROM source_strings WHERE source_hash = ?1 AND context = ?2",
                params![hash, context],
                |row| row.get(0),
            )?;

            Ok(id)
        })
    }

    /// Insert or overwrite a translation for one string and language.
    ///
    /// Used for local edits; the `customized` flag marks the translation as
    /// locally modified so later imports do not overwrite it.
    pub fn upsert_translation(
        &self,
        string_id: i64,
        langcode: &str,
        translation: &str,
        customized: bool,
    ) -> Result<()> {
        let langcode = langcode.to_string();
        let translation = translation.to_string();

        self.db.execute(move |conn| {
            conn.execute(
                r#"
                INSERT INTO translations (string_id, langcode, translation, customized)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(string_id, langcode) DO UPDATE SET
                    translation = excluded.translation,
                    customized = excluded.customized
                "#,
                params![string_id, langcode, translation, customized as i32],
            )?;
            Ok(())
        })
    }

    /// Import one chunk of remote strings for a language in a single
    /// transaction.
    ///
    /// Imported translations land as not-customized and never overwrite a
    /// customized local translation.
    pub async fn import_strings(&self, langcode: &str, strings: Vec<RemoteString>) -> Result<u64> {
        let langcode = langcode.to_string();

        self.db
            .transaction_async(move |tx| {
                let mut imported = 0u64;

                for string in strings {
                    let context = string.context.unwrap_or_default();
                    let hash = Self::hash_text(&string.source);

                    tx.execute(
                        r#"
                        INSERT INTO source_strings (context, source, source_hash) VALUES (?1, ?2, ?3)
                        ON CONFLICT(source_hash, context) DO NOTHING
                        "#,
                        params![context, string.source, hash],
                    )?;

                    let string_id: i64 = tx.query_row(
                        "SELECT id FROM source_strings WHERE source_hash = ?1 AND context = ?2",
                        params![hash, context],
                        |row| row.get(0),
                    )?;

                    tx.execute(
                        r#"
                        INSERT INTO translations (string_id, langcode, translation, customized)
                        VALUES (?1, ?2, ?3, 0)
                        ON CONFLICT(string_id, langcode) DO UPDATE SET
                            translation = excluded.translation
                        WHERE translations.customized = 0
                        "#,
                        params![string_id, langcode, string.translation],
                    )?;

                    imported += 1;
                }

                Ok(imported)
            })
            .await
    }

    /// Build the status predicate for an export query
    fn status_conditions(filter: &StatusFilter) -> Vec<&'static str> {
        let mut conditions = Vec::new();
        if filter.includes(TranslationStatus::NotTranslated) {
            conditions.push("t.translation IS NULL");
        }
        if filter.includes(TranslationStatus::Customized) {
            conditions.push("t.customized = 1");
        }
        if filter.includes(TranslationStatus::NotCustomized) {
            conditions.push("(t.translation IS NOT NULL AND t.customized = 0)");
        }
        conditions
    }

    // =========================================================================
    // Availability Cache Operations
    // =========================================================================

    /// List the cached remote-availability entries
    pub async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT project, langcode, version, string_count, checked_at
                    FROM availability
                    ORDER BY project, langcode
                    "#,
                )?;

                let records: Vec<AvailabilityRecord> = stmt
                    .query_map([], |row| {
                        Ok(AvailabilityRecord {
                            project: row.get(0)?,
                            langcode: row.get(1)?,
                            version: row.get(2)?,
                            string_count: row.get(3)?,
                            checked_at: row.get(4)?,
                        })
                    })?
                    .filter_map(|r| r.ok())
                    .collect();

                Ok(records)
            })
            .await
    }

    /// Replace the availability cache with a freshly fetched listing
    pub async fn replace_availability(&self, records: Vec<AvailabilityRecord>) -> Result<()> {
        self.db
            .transaction_async(move |tx| {
                tx.execute("DELETE FROM availability", [])?;

                for record in records {
                    tx.execute(
                        r#"
                        INSERT INTO availability (project, langcode, version, string_count, checked_at)
                        VALUES (?1, ?2, ?3, ?4, ?5)
                        "#,
                        params![
                            record.project,
                            record.langcode,
                            record.version,
                            record.string_count,
                            record.checked_at,
                        ],
                    )?;
                }

                Ok(())
            })
            .await
    }

    // =========================================================================
    // Import Batch Operations
    // =========================================================================

    /// Create a new import batch
    pub async fn create_batch(&self, batch: &ImportBatchRecord) -> Result<()> {
        let batch = batch.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO import_batches (
                        id, project, langcode, total_strings, imported_strings,
                        status, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        batch.id,
                        batch.project,
                        batch.langcode,
                        batch.total_strings,
                        batch.imported_strings,
                        batch.status.to_string(),
                        batch.created_at,
                        batch.updated_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Find an interrupted batch for the given project and language
    pub async fn find_resumable_batch(
        &self,
        project: &str,
        langcode: &str,
    ) -> Result<Option<ImportBatchRecord>> {
        let project = project.to_string();
        let langcode = langcode.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT id, project, langcode, total_strings, imported_strings,
                               status, created_at, updated_at
                        FROM import_batches
                        WHERE project = ?1 AND langcode = ?2 AND status = 'in_progress'
                        ORDER BY updated_at DESC
                        LIMIT 1
                        "#,
                        params![project, langcode],
                        |row| {
                            Ok(ImportBatchRecord {
                                id: row.get(0)?,
                                project: row.get(1)?,
                                langcode: row.get(2)?,
                                total_strings: row.get(3)?,
                                imported_strings: row.get(4)?,
                                status: row
                                    .get::<_, String>(5)?
                                    .parse()
                                    .unwrap_or(BatchStatus::InProgress),
                                created_at: row.get(6)?,
                                updated_at: row.get(7)?,
                            })
                        },
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// Checkpoint batch progress after an imported chunk
    pub async fn update_batch_progress(&self, batch_id: &str, imported_strings: i64) -> Result<()> {
        let batch_id = batch_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE import_batches SET imported_strings = ?1, updated_at = ?2 WHERE id = ?3",
                    params![imported_strings, now, batch_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Set the final status of a batch
    pub async fn set_batch_status(&self, batch_id: &str, status: BatchStatus) -> Result<()> {
        let batch_id = batch_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE import_batches SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![status.to_string(), now, batch_id],
                )?;
                Ok(())
            })
            .await
    }
}

impl LanguageRegistry for Repository {
    fn lookup(&self, code: &str) -> Result<Option<LanguageRecord>> {
        self.get_language(code)
    }
}

impl TranslationReader for Repository {
    fn for_each_record(
        &self,
        langcode: Option<&str>,
        filter: &StatusFilter,
        visit: &mut dyn FnMut(TranslationRecord) -> Result<(), ExportError>,
    ) -> Result<u64, ExportError> {
        let conditions = Self::status_conditions(filter);

        let result = self.db.execute(|conn| {
            let mut count = 0u64;

            match langcode {
                // Template mode: every source string, no translations
                None => {
                    let mut stmt =
                        conn.prepare("SELECT context, source FROM source_strings ORDER BY id")?;
                    let mut rows = stmt.query([])?;

                    while let Some(row) = rows.next()? {
                        let context: String = row.get(0)?;
                        let record = TranslationRecord {
                            context: (!context.is_empty()).then_some(context),
                            source: row.get(1)?,
                            translation: None,
                            status: TranslationStatus::NotTranslated,
                        };
                        visit(record).map_err(anyhow::Error::from)?;
                        count += 1;
                    }
                }
                Some(lang) => {
                    if conditions.is_empty() {
                        return Ok(0);
                    }

                    let mut sql = String::from(
                        r#"
                        SELECT s.context, s.source, t.translation, t.customized
                        FROM source_strings s
                        LEFT JOIN translations t
                            ON t.string_id = s.id AND t.langcode = ?1
                        "#,
                    );
                    if !filter.is_all() {
                        sql.push_str(" WHERE ");
                        sql.push_str(&conditions.join(" OR "));
                    }
                    sql.push_str(" ORDER BY s.id");

                    let mut stmt = conn.prepare(&sql)?;
                    let mut rows = stmt.query([lang])?;

                    while let Some(row) = rows.next()? {
                        let context: String = row.get(0)?;
                        let translation: Option<String> = row.get(2)?;
                        let customized: Option<i64> = row.get(3)?;

                        let status = match (&translation, customized) {
                            (None, _) => TranslationStatus::NotTranslated,
                            (Some(_), Some(1)) => TranslationStatus::Customized,
                            (Some(_), _) => TranslationStatus::NotCustomized,
                        };

                        let record = TranslationRecord {
                            context: (!context.is_empty()).then_some(context),
                            source: row.get(1)?,
                            translation,
                            status,
                        };
                        visit(record).map_err(anyhow::Error::from)?;
                        count += 1;
                    }
                }
            }

            debug!("Export cursor yielded {} records", count);
            Ok(count)
        });

        match result {
            Ok(count) => Ok(count),
            // Keep the original export error kind when the visitor aborted
            Err(error) => match error.downcast::<ExportError>() {
                Ok(export_error) => Err(export_error),
                Err(other) => Err(ExportError::Store(other)),
            },
        }
    }
}
