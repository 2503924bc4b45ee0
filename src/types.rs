//! Core types and events for jkanime-dl

use serde::{Deserialize, Serialize};

/// Pipeline stage within a single per-episode download task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Resolving the episode's internal site identifier from its page
    Locate,
    /// Resolving the final video URL from the episode identifier
    Resolve,
    /// Streaming the video body into the destination file
    Fetch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Locate => write!(f, "locate"),
            Stage::Resolve => write!(f, "resolve"),
            Stage::Fetch => write!(f, "fetch"),
        }
    }
}

/// Events emitted by the downloader
///
/// Consumers subscribe via [`crate::downloader::SeriesDownloader::subscribe`].
/// Events are broadcast; if no subscriber is listening they are dropped
/// silently and the download run is unaffected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A per-episode task ran to the end of its pipeline
    ///
    /// Emitted exactly once per ordinal, while the progress counter lock is
    /// held, so `completed` values are consistent and strictly increasing
    /// across events. Completion does not imply the episode downloaded
    /// successfully.
    EpisodeFinished {
        /// 1-based position of the episode within the series
        ordinal: usize,
        /// Number of tasks that have run to completion so far (including this one)
        completed: usize,
        /// Total number of episode tasks in this run
        total: usize,
    },

    /// A pipeline stage failed for an episode
    ///
    /// The task keeps going with whatever value the failed stage produced;
    /// this event is diagnostic only.
    StageFailed {
        /// 1-based position of the episode within the series
        ordinal: usize,
        /// The stage that failed
        stage: Stage,
        /// Human-readable failure description
        message: String,
    },
}

/// Result of the first phase of episode counting: the series page scan
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesInfo {
    /// Site-assigned series identifier extracted from the series page
    ///
    /// Empty when the page carries no series marker; the pagination queries
    /// built from an empty identifier will fail, which phase 2 reports as
    /// the aggregate count error (unless there are no blocks at all).
    pub series_id: String,
    /// Number of pagination-link elements found on the series page
    pub pagination_blocks: usize,
}
