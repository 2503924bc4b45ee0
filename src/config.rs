//! Configuration types for jkanime-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Download behavior configuration (destination, naming, concurrency)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Destination directory for downloaded episodes (default: "./downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Prefix prepended to each episode filename (default: empty)
    ///
    /// Episode `n` is written to `{download_dir}/{filename_prefix}{n}.mp4`.
    #[serde(default)]
    pub filename_prefix: String,

    /// Maximum number of episode pipelines running at once (None = unlimited)
    ///
    /// All episode tasks are spawned eagerly either way; this only bounds
    /// how many of them execute their fetch pipeline concurrently.
    #[serde(default)]
    pub max_concurrent_downloads: Option<usize>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            filename_prefix: String::new(),
            max_concurrent_downloads: None,
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}
