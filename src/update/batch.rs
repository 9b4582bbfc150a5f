/*!
 * Chunked, resumable import of available translation updates.
 *
 * Each release is imported through an `import_batches` record: the batch
 * checkpoints its offset after every imported chunk, so a run interrupted
 * by a source failure resumes from the checkpoint instead of restarting.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::errors::UpdateError;
use crate::source::TranslationSource;
use crate::store::models::{AvailabilityRecord, BatchStatus, ImportBatchRecord};
use crate::store::Repository;

/// Totals of one update run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Releases fully imported in this run
    pub releases: usize,
    /// Strings imported in this run (resumed offsets excluded)
    pub imported: u64,
}

/// Fetches and imports available translation updates
pub struct UpdateRunner<'a> {
    repo: &'a Repository,
    source: &'a dyn TranslationSource,
    batch_size: u64,
    show_progress: bool,
}

impl<'a> UpdateRunner<'a> {
    /// Create a runner importing `batch_size` strings per chunk
    pub fn new(repo: &'a Repository, source: &'a dyn TranslationSource, batch_size: u64) -> Self {
        Self {
            repo,
            source,
            batch_size: batch_size.max(1),
            show_progress: true,
        }
    }

    /// Disable the progress bar (used by tests)
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Import every cached available update, optionally restricted to the
    /// given language codes.
    ///
    /// A requested code that matches no available update is skipped with a
    /// warning; `update` is a bulk command and one stale code must not
    /// block the remaining imports.
    pub async fn run(&self, langcodes: &[String]) -> Result<UpdateSummary, UpdateError> {
        let available = self.repo.list_availability().await?;

        if !langcodes.is_empty() {
            for requested in langcodes {
                if !available.iter().any(|a| &a.langcode == requested) {
                    warn!(
                        "No available update for requested language '{}', skipping",
                        requested
                    );
                }
            }
        }

        let targets: Vec<&AvailabilityRecord> = available
            .iter()
            .filter(|a| langcodes.is_empty() || langcodes.contains(&a.langcode))
            .collect();

        if targets.is_empty() {
            info!("No translation updates to import");
            return Ok(UpdateSummary::default());
        }

        let mut summary = UpdateSummary::default();
        for release in targets {
            summary.imported += self.run_release(release).await?;
            summary.releases += 1;
        }

        info!(
            "Imported {} strings across {} releases",
            summary.imported, summary.releases
        );
        Ok(summary)
    }

    /// Import one release, creating or resuming its batch
    async fn run_release(&self, release: &AvailabilityRecord) -> Result<u64, UpdateError> {
        let mut batch = match self
            .repo
            .find_resumable_batch(&release.project, &release.langcode)
            .await?
        {
            Some(batch) => {
                info!(
                    "Resuming import batch {} for {}/{} at offset {}",
                    batch.id, release.project, release.langcode, batch.imported_strings
                );
                batch
            }
            None => {
                let batch =
                    ImportBatchRecord::new(&release.project, &release.langcode, release.string_count);
                self.repo.create_batch(&batch).await?;
                info!(
                    "Starting import batch {} for {}/{} ({} strings)",
                    batch.id, release.project, release.langcode, release.string_count
                );
                batch
            }
        };

        let progress = self.progress_bar(release, batch.imported_strings as u64);
        let mut imported_now = 0u64;

        loop {
            let chunk = match self
                .source
                .fetch_strings(
                    &release.project,
                    &release.langcode,
                    batch.imported_strings as u64,
                    self.batch_size,
                )
                .await
            {
                Ok(chunk) => chunk,
                Err(error) => {
                    // The batch stays in_progress; the next run resumes it
                    progress.abandon();
                    return Err(UpdateError::BatchInterrupted {
                        batch_id: batch.id,
                        reason: error.to_string(),
                    });
                }
            };

            if chunk.is_empty() {
                break;
            }

            let chunk_len = chunk.len() as u64;
            self.repo.import_strings(&release.langcode, chunk).await?;

            batch.imported_strings += chunk_len as i64;
            imported_now += chunk_len;
            self.repo
                .update_batch_progress(&batch.id, batch.imported_strings)
                .await?;
            progress.set_position(batch.imported_strings as u64);

            if chunk_len < self.batch_size {
                break;
            }
        }

        self.repo
            .set_batch_status(&batch.id, BatchStatus::Completed)
            .await?;
        progress.finish_and_clear();

        Ok(imported_now)
    }

    fn progress_bar(&self, release: &AvailabilityRecord, position: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(release.string_count.max(0) as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {pos}/{len}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(format!("{}/{}", release.project, release.langcode));
        bar.set_position(position);
        bar
    }
}
