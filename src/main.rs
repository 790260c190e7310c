//! Feed Digest — Binary Entrypoint
//! Loads configuration, fetches the configured RSS feeds, summarizes and
//! clusters the recent entries, and writes an HTML digest.
//!
//! See `README.md` for quickstart.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feed_digest::config::DigestConfig;
use feed_digest::ingest::{FeedProvider, RssProvider};
use feed_digest::{pipeline, summarize};

#[derive(Parser, Debug)]
#[command(name = "feed-digest", about = "Fetch, deduplicate and rank feed stories")]
struct Args {
    /// Path to the TOML config (overrides FEED_DIGEST_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the HTML report (overrides the config file).
    #[arg(long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let path = DigestConfig::resolve_path(args.config.as_deref());
    let mut cfg = DigestConfig::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    if let Some(output) = args.output {
        cfg.general.output_file = output;
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("feed-digest/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    let providers: Vec<Box<dyn FeedProvider>> = cfg
        .general
        .feed_urls
        .iter()
        .map(|url| Box::new(RssProvider::new(url.clone(), client.clone())) as Box<dyn FeedProvider>)
        .collect();

    let summarizer = summarize::build_summarizer(&cfg.summarizer)?;

    let report = pipeline::run(&cfg, &providers, &summarizer).await?;
    tracing::info!(
        feeds = providers.len(),
        feeds_failed = report.feeds_failed,
        stories = report.stories_summarized,
        clusters = report.clusters,
        "run complete"
    );
    Ok(())
}
