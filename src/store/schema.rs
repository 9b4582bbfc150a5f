/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for all translation store tables
 * and handles schema migrations for version upgrades.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - create all tables
        info!("Initializing translation store schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating store schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Store schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    // Enable WAL mode for better concurrency and crash recovery
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Enable foreign keys
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    // Create schema version table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // Translatable source strings. The context column defaults to the empty
    // string so the (source_hash, context) uniqueness constraint works for
    // context-free strings too.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS source_strings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            context TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL,
            source_hash TEXT NOT NULL,
            UNIQUE(source_hash, context)
        );

        CREATE INDEX IF NOT EXISTS idx_source_strings_hash ON source_strings(source_hash);
        "#,
    )?;

    // Per-language translations. A missing row means "not translated";
    // the customized flag distinguishes locally modified translations from
    // imported defaults.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            string_id INTEGER NOT NULL REFERENCES source_strings(id) ON DELETE CASCADE,
            langcode TEXT NOT NULL,
            translation TEXT NOT NULL,
            customized INTEGER NOT NULL DEFAULT 0,
            UNIQUE(string_id, langcode)
        );

        CREATE INDEX IF NOT EXISTS idx_translations_langcode ON translations(langcode);
        "#,
    )?;

    // Language registry
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            locked INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )?;

    // Remote availability cache with per-entry check timestamps
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS availability (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            langcode TEXT NOT NULL,
            version TEXT NOT NULL,
            string_count INTEGER NOT NULL,
            checked_at TEXT NOT NULL,
            UNIQUE(project, langcode)
        );
        "#,
    )?;

    // Checkpointed import batches
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS import_batches (
            id TEXT PRIMARY KEY,
            project TEXT NOT NULL,
            langcode TEXT NOT NULL,
            total_strings INTEGER NOT NULL,
            imported_strings INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'in_progress',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_import_batches_status ON import_batches(status);
        CREATE INDEX IF NOT EXISTS idx_import_batches_target ON import_batches(project, langcode);
        "#,
    )?;

    info!("Translation store schema created successfully");
    Ok(())
}

/// Migrate the schema from one version to another
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<()> {
    let current = from_version;

    // Add migration steps here as the schema evolves
    if current < SCHEMA_VERSION {
        return Err(anyhow::anyhow!(
            "Unknown schema version: {}. Cannot migrate.",
            current
        ));
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!("Schema migration completed to v{}", SCHEMA_VERSION);
    Ok(())
}
