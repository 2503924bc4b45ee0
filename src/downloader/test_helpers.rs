//! Shared test helpers for creating SeriesDownloader instances against a
//! wiremock site.

use std::time::Duration;

use crate::config::DownloadConfig;
use crate::downloader::SeriesDownloader;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Series path segment used by all mocked series in tests.
pub(crate) const SERIES_SLUG: &str = "dragon-ball";

/// Create a downloader whose series URL and site origin both point at the
/// given mock server. Returns the downloader and the tempdir holding its
/// download directory (which must be kept alive).
pub(crate) fn create_test_downloader(
    server: &MockServer,
    config: DownloadConfig,
) -> (SeriesDownloader, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut config = config;
    config.download_dir = temp_dir.path().to_path_buf();

    let series_url = format!("{}/{}", server.uri(), SERIES_SLUG);
    let downloader = SeriesDownloader::new(&series_url, config).unwrap();

    (downloader, temp_dir)
}

/// Mount the series page: a series marker plus one pagination link per block.
pub(crate) async fn mount_series_page(server: &MockServer, series_id: &str, blocks: usize) {
    let links: String = (1..=blocks)
        .map(|b| format!(r##"<a class="numbers" href="#pagination{b}">{b}</a>"##))
        .collect();
    let html = format!(
        r#"<html><body>
            <div id="guardar-anime" data-anime="{series_id}"></div>
            <nav>{links}</nav>
        </body></html>"#
    );

    Mock::given(method("GET"))
        .and(path(format!("/{SERIES_SLUG}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Mount one pagination block endpoint answering a JSON array of `count`
/// episode entries.
pub(crate) async fn mount_pagination_block(
    server: &MockServer,
    series_id: &str,
    block: usize,
    count: usize,
) {
    let episodes: Vec<serde_json::Value> = (1..=count)
        .map(|n| serde_json::json!({ "number": n }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!(
            "/ajax/pagination_episodes/{series_id}/{block}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(episodes))
        .mount(server)
        .await;
}

/// Mount an episode page carrying the episode identifier marker.
pub(crate) async fn mount_episode_page(server: &MockServer, ordinal: usize, episode_id: &str) {
    let html = format!(
        r#"<html><body><div id="guardar-capitulo" data-capitulo="{episode_id}"></div></body></html>"#
    );

    Mock::given(method("GET"))
        .and(path(format!("/{SERIES_SLUG}/{ordinal}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Mount the download-URL endpoint for an episode identifier.
///
/// `body` is served raw; real responses are quoted with escaped slashes,
/// e.g. `"\/videos\/ep1.mp4"`.
pub(crate) async fn mount_download_endpoint(server: &MockServer, episode_id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/ajax/download_episode/{episode_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount a video endpoint serving the given bytes.
pub(crate) async fn mount_video(server: &MockServer, video_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(video_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Mount the complete per-episode chain (page, download endpoint, video) for
/// one ordinal, serving `body` as the video content.
pub(crate) async fn mount_episode_chain(server: &MockServer, ordinal: usize, body: &[u8]) {
    mount_episode_chain_delayed(server, ordinal, body, Duration::ZERO).await;
}

/// Like [`mount_episode_chain`], but the episode page answers only after
/// `delay`. Stretching the first pipeline stage makes request interleaving
/// observable when several pipelines run at once.
pub(crate) async fn mount_episode_chain_delayed(
    server: &MockServer,
    ordinal: usize,
    body: &[u8],
    delay: Duration,
) {
    let episode_id = format!("cap{ordinal}");
    let video_path = format!("/videos/ep{ordinal}.mp4");
    let escaped = format!("\"{}\"", video_path.replace('/', "\\/"));

    let html = format!(
        r#"<html><body><div id="guardar-capitulo" data-capitulo="{episode_id}"></div></body></html>"#
    );
    Mock::given(method("GET"))
        .and(path(format!("/{SERIES_SLUG}/{ordinal}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .set_delay(delay),
        )
        .mount(server)
        .await;

    mount_download_endpoint(server, &episode_id, &escaped).await;
    mount_video(server, &video_path, body).await;
}
