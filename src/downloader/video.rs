//! Download URL resolution and video fetching.

use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use super::SeriesDownloader;
use crate::error::Result;

/// Decode the raw download-endpoint body into a relative video path.
///
/// The endpoint answers with a JSON-style quoted string whose path
/// separators are escaped, e.g. `"\/videos\/abc\/1.mp4"`. Quoting and
/// separator escaping are stripped; everything else passes through
/// unchanged.
fn decode_video_path(raw: &str) -> String {
    raw.replace('"', "").replace("\\/", "/")
}

impl SeriesDownloader {
    /// Resolve the absolute video URL for an episode identifier.
    ///
    /// Queries `{origin}/ajax/download_episode/{episode_id}` and prefixes
    /// the decoded path with the site origin. The response status is
    /// deliberately not checked: whatever body comes back is decoded, and a
    /// bad URL surfaces as a fetch failure downstream.
    pub async fn download_url(&self, episode_id: &str) -> Result<String> {
        let url = format!("{}/ajax/download_episode/{}", self.origin, episode_id);
        let body = self.http.get(&url).send().await?.text().await?;

        Ok(format!("{}{}", self.origin, decode_video_path(&body)))
    }

    /// Stream a video URL's body into the destination file, byte for byte.
    ///
    /// The destination is created (truncating any existing file) before the
    /// request is issued, so a failed fetch leaves an empty or truncated
    /// file behind. Returns the number of bytes written.
    pub async fn fetch_video(&self, video_url: &str, dest: &Path) -> Result<u64> {
        let mut file = tokio::fs::File::create(dest).await?;

        let response = self.http.get(video_url).send().await?;
        let mut stream = response.bytes_stream();

        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
