//! Downloader tests, organized by pipeline stage.
