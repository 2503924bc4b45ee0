//! Concurrent per-episode pipeline execution.
//!
//! One task per episode ordinal runs Locate -> Resolve -> Fetch in sequence.
//! A stage failure is logged, emitted as a diagnostic event, and the
//! pipeline continues with whatever value the failed stage produced; the
//! task still counts as completed. The progress counter is owned by the
//! orchestration call and lives only for its duration.

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

use super::SeriesDownloader;
use crate::types::{Event, Stage};

impl SeriesDownloader {
    /// Download every episode of the series concurrently.
    ///
    /// Spawns one task per ordinal in `1..=total_episodes`, each writing to
    /// `{download_dir}/{filename_prefix}{ordinal}.mp4`, and blocks until all
    /// of them finish. Completion order is nondeterministic. When
    /// `max_concurrent_downloads` is set, at most that many pipelines run at
    /// once; otherwise all of them run in parallel.
    ///
    /// Returns the number of tasks that ran to completion, which equals
    /// `total_episodes` regardless of how many episodes actually downloaded
    /// successfully.
    pub async fn download_episodes(&self, total_episodes: usize) -> usize {
        let counter = Arc::new(Mutex::new(0usize));
        // A cap of zero would deadlock every task on the semaphore; floor at one.
        let limit = self
            .config
            .max_concurrent_downloads
            .map(|n| Arc::new(Semaphore::new(n.max(1))));

        let mut tasks = JoinSet::new();
        for ordinal in 1..=total_episodes {
            let downloader = self.clone();
            let counter = Arc::clone(&counter);
            let limit = limit.clone();

            tasks.spawn(async move {
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                downloader
                    .run_episode_pipeline(ordinal, total_episodes, &counter)
                    .await;
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "episode task failed to join");
            }
        }

        *counter.lock().await
    }

    /// Run the three-stage pipeline for one episode, then record completion.
    ///
    /// Stage failures feed their fallback value (an empty identifier or an
    /// empty URL) into the next stage unchanged, so a failed episode still
    /// runs every remaining stage and typically leaves an empty file behind.
    async fn run_episode_pipeline(&self, ordinal: usize, total: usize, counter: &Mutex<usize>) {
        let episode_id = match self.episode_id(ordinal).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(ordinal, error = %e, "failed to locate episode identifier");
                self.emit_event(Event::StageFailed {
                    ordinal,
                    stage: Stage::Locate,
                    message: e.to_string(),
                });
                String::new()
            }
        };

        let video_url = match self.download_url(&episode_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(ordinal, error = %e, "failed to resolve download URL");
                self.emit_event(Event::StageFailed {
                    ordinal,
                    stage: Stage::Resolve,
                    message: e.to_string(),
                });
                String::new()
            }
        };

        let dest = self.config.download_dir.join(format!(
            "{}{}.mp4",
            self.config.filename_prefix, ordinal
        ));
        if let Err(e) = self.fetch_video(&video_url, &dest).await {
            tracing::warn!(ordinal, dest = %dest.display(), error = %e, "failed to download episode");
            self.emit_event(Event::StageFailed {
                ordinal,
                stage: Stage::Fetch,
                message: e.to_string(),
            });
        }

        // Increment and announce under the same lock so completed counts are
        // consistent and strictly increasing across events.
        let mut completed = counter.lock().await;
        *completed += 1;
        self.emit_event(Event::EpisodeFinished {
            ordinal,
            completed: *completed,
            total,
        });
    }
}
