/*!
 * SQLite-backed translation store.
 *
 * Layered the usual way: connection management, schema, entity models and
 * a repository providing type-safe operations. The repository also
 * implements the export engine's registry and reader ports.
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::StoreConnection;
pub use repository::Repository;
