//! CLI binary for jkanime-dl.
//!
//! Thin consumer of the library: parses arguments, resolves the episode
//! count, runs the concurrent download and prints the progress lines the
//! downloader emits as events.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use jkanime_dl::{DownloadConfig, Event, SeriesDownloader, Stage};
use tracing_subscriber::EnvFilter;

/// Bulk-download every episode of a jkanime.net series.
#[derive(Debug, Parser)]
#[command(name = "jkanime-dl", version, about)]
struct Args {
    /// Series page URL, e.g. https://jkanime.net/one-piece
    series_url: String,

    /// Destination directory for the downloaded episodes
    directory: PathBuf,

    /// Filename prefix; episode n is written as {prefix}{n}.mp4
    prefix: Option<String>,

    /// Maximum number of episodes downloading at once (default: unlimited)
    #[arg(long)]
    max_concurrent: Option<usize>,
}

fn init_logging() {
    // Diagnostics share stdout with the progress lines; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .init();
}

/// The stdout line for one downloader event.
fn event_line(event: &Event) -> String {
    match event {
        Event::EpisodeFinished {
            ordinal,
            completed,
            total,
        } => format!("finished episode {ordinal}. {completed}/{total} completed"),
        Event::StageFailed { ordinal, stage, .. } => match stage {
            Stage::Locate => format!("error getting id of episode {ordinal}"),
            Stage::Resolve => format!("cannot get download video url of episode {ordinal}"),
            Stage::Fetch => format!("error downloading episode {ordinal}"),
        },
    }
}

/// Print one stdout line per event, in the order the downloader emits them.
///
/// The broadcast buffer is finite; if the printer ever falls behind a large
/// series far enough to drop events, say how many lines went missing rather
/// than skipping them silently.
async fn print_events(mut events: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => println!("{}", event_line(&event)),
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                println!("progress output fell behind; {skipped} lines skipped");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn run(args: Args) -> jkanime_dl::Result<()> {
    let directory = match std::path::absolute(&args.directory) {
        Ok(dir) => dir,
        Err(e) => {
            println!("Error getting absolute path of the directory");
            tracing::warn!(error = %e, "could not absolutize destination directory");
            args.directory.clone()
        }
    };

    let config = DownloadConfig {
        download_dir: directory.clone(),
        filename_prefix: args.prefix.unwrap_or_default(),
        max_concurrent_downloads: args.max_concurrent,
    };
    let downloader = SeriesDownloader::new(&args.series_url, config)?;

    // Fatal tier: a count failure aborts before any download task starts.
    let total = downloader.episode_count().await?;
    println!("Number of episodes {total}");

    if let Err(e) = tokio::fs::create_dir_all(&directory).await {
        // Not fatal here: every fetch will fail and be reported per episode.
        tracing::warn!(directory = %directory.display(), error = %e, "could not create destination directory");
    }

    let printer = tokio::spawn(print_events(downloader.subscribe()));

    downloader.download_episodes(total).await;

    // Close the event channel so the printer drains and exits.
    drop(downloader);
    printer.await.ok();

    Ok(())
}

#[tokio::main]
async fn main() {
    // Missing positional arguments exit with clap's usage error code 2.
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "download run failed");
        process::exit(1);
    }
}
