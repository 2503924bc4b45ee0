//! Error types for jkanime-dl
//!
//! Two tiers of failure exist in this crate:
//! - Fatal errors (episode count resolution, invalid series URL) surface as
//!   `Error` values returned to the caller and abort the run.
//! - Per-episode stage failures are logged and emitted as events by the
//!   orchestrator; they never abort the run and therefore never escape
//!   [`crate::downloader::SeriesDownloader::download_episodes`].

use thiserror::Error;

/// Result type alias for jkanime-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jkanime-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Network error (page fetch, ajax query, video request)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (destination file creation or writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The series URL could not be parsed
    #[error("invalid series URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The series URL has no scheme/host origin to build site endpoints from
    #[error("series URL has no usable origin: {0}")]
    InvalidSeriesUrl(String),

    /// A CSS selector failed to parse
    #[error("invalid selector: {0}")]
    Selector(String),

    /// A page was fetched but the expected marker attribute was absent
    #[error("attribute '{attribute}' not found for selector '{selector}'")]
    MissingAttribute {
        /// The CSS selector that matched no element carrying the attribute
        selector: String,
        /// The attribute that was expected on the matched element
        attribute: String,
    },

    /// Aggregate failure of the paginated episode counting query
    ///
    /// Any pagination block that cannot be fetched or decoded collapses the
    /// whole resolution into this single error; no partial sum is reported.
    #[error("cannot get total number of episodes")]
    EpisodeCountUnavailable,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_count_error_uses_aggregate_message() {
        assert_eq!(
            Error::EpisodeCountUnavailable.to_string(),
            "cannot get total number of episodes"
        );
    }

    #[test]
    fn missing_attribute_names_selector_and_attribute() {
        let err = Error::MissingAttribute {
            selector: "div#guardar-capitulo".into(),
            attribute: "data-capitulo".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("div#guardar-capitulo"));
        assert!(msg.contains("data-capitulo"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::other("disk fail").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("disk fail"));
    }

    #[test]
    fn url_parse_error_converts_via_from() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
