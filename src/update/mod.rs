/*!
 * Translation update orchestration.
 *
 * Two services over the store and the translation-source port:
 * - `UpdateChecker` refreshes the TTL-guarded remote-availability cache;
 * - `UpdateRunner` fetches and imports available updates in discrete,
 *   checkpointed chunks so an interrupted run resumes instead of
 *   restarting.
 */

pub mod batch;
pub mod checker;

pub use batch::{UpdateRunner, UpdateSummary};
pub use checker::UpdateChecker;
