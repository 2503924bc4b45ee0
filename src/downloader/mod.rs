//! Core downloader implementation split into focused submodules.
//!
//! The `SeriesDownloader` struct and its methods are organized by pipeline
//! stage:
//! - [`episodes`] - Episode counting (paginated query) and episode locating
//! - [`video`] - Download URL resolution and video fetching
//! - [`orchestration`] - Concurrent per-episode pipeline execution

mod episodes;
mod orchestration;
mod video;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::config::DownloadConfig;
use crate::error::{Error, Result};
use crate::types::Event;

/// Main downloader instance for one series (cloneable - shared state is
/// Arc-wrapped, per-task state is task-local)
#[derive(Clone)]
pub struct SeriesDownloader {
    /// Shared HTTP client reused across all page, ajax and video requests
    pub(crate) http: reqwest::Client,
    /// Series base URL with any trailing slash removed; fixed for the run
    pub(crate) series_url: String,
    /// Site origin (`scheme://host[:port]`) derived from the series URL,
    /// used to build the ajax endpoints and absolute video URLs
    pub(crate) origin: String,
    /// Download configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<DownloadConfig>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl SeriesDownloader {
    /// Create a new downloader for the given series URL.
    ///
    /// The URL must be absolute with an `http`/`https` origin; any trailing
    /// slashes are stripped so episode pages can be addressed as
    /// `{series_url}/{ordinal}`.
    pub fn new(series_url: &str, config: DownloadConfig) -> Result<Self> {
        let trimmed = series_url.trim_end_matches('/');
        let parsed = url::Url::parse(trimmed)?;

        let origin = parsed.origin();
        if !matches!(origin, url::Origin::Tuple(..)) {
            return Err(Error::InvalidSeriesUrl(series_url.to_string()));
        }

        // Buffer of 1000 events; slow subscribers past that see Lagged
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);

        Ok(Self {
            http: reqwest::Client::new(),
            series_url: trimmed.to_string(),
            origin: origin.ascii_serialization(),
            config: Arc::new(config),
            event_tx,
        })
    }

    /// Subscribe to download events.
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The series base URL this downloader was built from (trailing slash
    /// trimmed).
    pub fn series_url(&self) -> &str {
        &self.series_url
    }

    /// The site origin all ajax and video endpoints are rooted at.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Get the current configuration.
    pub fn config(&self) -> Arc<DownloadConfig> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// downloads proceed whether or not anyone is listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Fetch a page and return its body text.
    ///
    /// Non-2xx statuses are errors here: both callers (series page scan and
    /// episode locating) need a real page to extract markers from.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
