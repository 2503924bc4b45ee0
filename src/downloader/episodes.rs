//! Episode counting and episode locating.
//!
//! Counting is a two-phase paginated query: scan the series page for the
//! site-assigned series identifier and the number of pagination blocks, then
//! ask the pagination endpoint for each block's episode list and sum the
//! lengths. Locating resolves one episode's internal identifier from its
//! page marker.

use super::SeriesDownloader;
use crate::error::{Error, Result};
use crate::extract;
use crate::types::SeriesInfo;

/// Selector for the element carrying the site-assigned series identifier
const SERIES_MARKER_SELECTOR: &str = "div#guardar-anime";
/// Attribute holding the series identifier
const SERIES_MARKER_ATTR: &str = "data-anime";
/// Selector matching one link per pagination block
const PAGINATION_LINK_SELECTOR: &str = "a.numbers";
/// Selector for the element carrying an episode's internal identifier
const EPISODE_MARKER_SELECTOR: &str = "div#guardar-capitulo";
/// Attribute holding the episode identifier
const EPISODE_MARKER_ATTR: &str = "data-capitulo";

impl SeriesDownloader {
    /// Phase 1 of episode counting: scan the series page.
    ///
    /// Extracts the series identifier (empty string when the marker is
    /// absent) and counts the pagination-link elements.
    pub async fn series_info(&self) -> Result<SeriesInfo> {
        let page = self.fetch_page(&self.series_url).await?;

        let series_id = extract::extract_attr(&page, SERIES_MARKER_SELECTOR, SERIES_MARKER_ATTR)?
            .unwrap_or_default();
        let pagination_blocks = extract::count_elements(&page, PAGINATION_LINK_SELECTOR)?;

        Ok(SeriesInfo {
            series_id,
            pagination_blocks,
        })
    }

    /// Determine the total number of episodes in the series.
    ///
    /// Sums the per-block episode counts over all pagination blocks. A
    /// series page with zero pagination blocks yields 0. Any block query
    /// failure aborts the whole resolution with the single aggregate
    /// [`Error::EpisodeCountUnavailable`]; no partial sum is returned.
    pub async fn episode_count(&self) -> Result<usize> {
        let info = self.series_info().await?;

        let mut total = 0;
        for block in 1..=info.pagination_blocks {
            total += self
                .block_episode_count(&info.series_id, block)
                .await
                .map_err(|e| {
                    tracing::warn!(block, error = %e, "pagination block query failed");
                    Error::EpisodeCountUnavailable
                })?;
        }

        Ok(total)
    }

    /// Query one pagination block and return its episode count.
    ///
    /// The endpoint answers with a JSON array, one element per episode in
    /// the block; only its length matters.
    async fn block_episode_count(&self, series_id: &str, block: usize) -> Result<usize> {
        let url = format!(
            "{}/ajax/pagination_episodes/{}/{}",
            self.origin, series_id, block
        );
        let episodes: Vec<serde_json::Value> = self.http.get(&url).send().await?.json().await?;
        Ok(episodes.len())
    }

    /// Resolve an episode's internal site identifier from its page.
    ///
    /// The episode page lives at `{series_url}/{ordinal}`. A missing marker
    /// is an error at this level; the orchestrator downgrades it to a logged
    /// diagnostic and continues with an empty identifier.
    pub async fn episode_id(&self, ordinal: usize) -> Result<String> {
        let url = format!("{}/{}", self.series_url, ordinal);
        let page = self.fetch_page(&url).await?;

        extract::extract_attr(&page, EPISODE_MARKER_SELECTOR, EPISODE_MARKER_ATTR)?.ok_or_else(
            || Error::MissingAttribute {
                selector: EPISODE_MARKER_SELECTOR.to_string(),
                attribute: EPISODE_MARKER_ATTR.to_string(),
            },
        )
    }
}
