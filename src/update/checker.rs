/*!
 * Remote-availability checking with a TTL-guarded cache.
 */

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use crate::errors::UpdateError;
use crate::source::TranslationSource;
use crate::store::models::AvailabilityRecord;
use crate::store::Repository;

/// Checks the remote source for translation update availability.
///
/// Listings are cached in the store; a fresh cache (within the TTL) is
/// served without touching the source.
pub struct UpdateChecker<'a> {
    repo: &'a Repository,
    source: &'a dyn TranslationSource,
    ttl: Duration,
}

impl<'a> UpdateChecker<'a> {
    /// Create a checker with the given cache time-to-live in seconds
    pub fn new(repo: &'a Repository, source: &'a dyn TranslationSource, ttl_secs: u64) -> Self {
        Self {
            repo,
            source,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Return the current availability listing.
    ///
    /// Serves the cached listing while it is fresh; `force` bypasses the
    /// TTL and always refreshes from the source.
    pub async fn check(&self, force: bool) -> Result<Vec<AvailabilityRecord>, UpdateError> {
        if !force {
            let cached = self.repo.list_availability().await?;
            if let Some(checked_at) = Self::newest_check(&cached) {
                if Utc::now() - checked_at < self.ttl {
                    debug!(
                        "Serving availability from cache ({} entries, checked {})",
                        cached.len(),
                        checked_at
                    );
                    return Ok(cached);
                }
            }
        }

        info!("Refreshing translation availability from source");
        let releases = self.source.list_available().await?;
        let now = Utc::now().to_rfc3339();

        let records: Vec<AvailabilityRecord> = releases
            .into_iter()
            .map(|release| AvailabilityRecord {
                project: release.project,
                langcode: release.langcode,
                version: release.version,
                string_count: release.string_count as i64,
                checked_at: now.clone(),
            })
            .collect();

        self.repo.replace_availability(records.clone()).await?;
        info!("Availability cache refreshed ({} entries)", records.len());

        Ok(records)
    }

    fn newest_check(records: &[AvailabilityRecord]) -> Option<DateTime<Utc>> {
        records
            .iter()
            .filter_map(|r| DateTime::parse_from_rfc3339(&r.checked_at).ok())
            .map(|t| t.with_timezone(&Utc))
            .max()
    }
}
