/*!
 * # locsync - Translation store synchronization and PO export
 *
 * A Rust library for managing interface translations: a local SQLite
 * translation store, gettext PO export, and synchronization with a
 * translation release source.
 *
 * ## Features
 *
 * - Export stored translations as gettext PO files, filtered by language
 *   and translation status
 * - Export translation templates (source strings only)
 * - Check a release source for available translation updates, with a
 *   TTL-cached availability listing
 * - Import translation releases in resumable, checkpointed batches
 * - Imported strings never overwrite local customizations
 * - ISO 639-1 and ISO 639-3 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `store`: SQLite translation store:
 *   - `store::connection`: Database connection handling
 *   - `store::schema`: Schema creation and migration
 *   - `store::repository`: Data access layer
 * - `export`: PO export pipeline:
 *   - `export::filter`: Status filter resolution
 *   - `export::language`: Language resolution
 *   - `export::po`: PO document serialization
 *   - `export::engine`: The streaming export engine
 * - `update`: Update check and batch import:
 *   - `update::checker`: TTL-cached availability check
 *   - `update::batch`: Resumable chunked imports
 * - `source`: Translation source implementations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod export;
pub mod language_utils;
pub mod source;
pub mod store;
pub mod update;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExportError, UpdateError};
pub use export::{ExportEngine, ExportOutcome, ExportRequest, StatusFilter};
pub use store::{Repository, StoreConnection};
pub use update::{UpdateChecker, UpdateRunner};
