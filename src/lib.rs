//! # jkanime-dl
//!
//! Concurrent bulk episode downloader for jkanime.net series.
//!
//! ## Design Philosophy
//!
//! jkanime-dl is designed to be:
//! - **Library-first** - the CLI binary is a thin consumer of the crate API
//! - **Event-driven** - consumers subscribe to progress events, no polling
//! - **Fire-and-forget per episode** - a stage failure never aborts the run
//!
//! ## Quick Start
//!
//! ```no_run
//! use jkanime_dl::{DownloadConfig, SeriesDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DownloadConfig {
//!         download_dir: "/data/anime/one-piece".into(),
//!         filename_prefix: "one_piece_".to_string(),
//!         max_concurrent_downloads: Some(8),
//!     };
//!     let downloader = SeriesDownloader::new("https://jkanime.net/one-piece", config)?;
//!
//!     // Subscribe to progress events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let total = downloader.episode_count().await?;
//!     let completed = downloader.download_episodes(total).await;
//!     assert_eq!(completed, total);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Structural HTML extraction capability
pub mod extract;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::DownloadConfig;
pub use downloader::SeriesDownloader;
pub use error::{Error, Result};
pub use types::{Event, SeriesInfo, Stage};
