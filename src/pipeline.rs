// src/pipeline.rs
//! End-to-end run: fetch feeds, summarize entries, deduplicate and rank,
//! then write the HTML report.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::config::DigestConfig;
use crate::dedup::{self, LexicalOutcome, Thresholds};
use crate::ingest::{self, FeedProvider, FeedResult};
use crate::render;
use crate::story::{Cluster, Story};
use crate::summarize::DynSummarizer;

/// Counters describing what a single run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub feeds_failed: usize,
    pub entries_fetched: usize,
    pub entries_recent: usize,
    pub stories_summarized: usize,
    pub summaries_failed: usize,
    pub clusters: usize,
    pub lexical_skipped: bool,
}

/// Fetch all feeds, summarize recent entries and cluster them.
///
/// Feed and summarizer failures are logged and counted, never fatal; an
/// empty run produces an empty cluster list.
pub async fn collect_and_cluster(
    providers: &[Box<dyn FeedProvider>],
    summarizer: &DynSummarizer,
    thresholds: Thresholds,
    recency_hours: i64,
) -> Result<(Vec<Cluster>, RunReport)> {
    let mut report = RunReport::default();

    let mut entries = Vec::new();
    for provider in providers {
        match ingest::fetch_with_retry(provider.as_ref()).await {
            FeedResult::Fetched(batch) => entries.extend(batch),
            FeedResult::Failed { feed, reason } => {
                warn!(%feed, %reason, "feed skipped after retries");
                report.feeds_failed += 1;
            }
        }
    }
    report.entries_fetched = entries.len();

    let recent = ingest::filter_recent(entries, Utc::now(), recency_hours);
    report.entries_recent = recent.len();

    let mut stories = Vec::new();
    for entry in recent {
        let published = match entry.published {
            Some(published) => published,
            None => continue,
        };
        let text = format!("{} {}", entry.title, entry.description);
        match summarizer.summarize(&text).await {
            Ok(gist) => {
                stories.push(Story {
                    title: entry.title,
                    description: entry.description,
                    link: entry.link,
                    published,
                    source: entry.source,
                    gist,
                });
            }
            Err(e) => {
                warn!(title = %entry.title, error = %format!("{e:#}"), "summary failed, entry skipped");
                report.summaries_failed += 1;
            }
        }
    }
    report.stories_summarized = stories.len();

    let (clusters, outcome) = dedup::dedup_and_rank(stories, thresholds);
    report.lexical_skipped = matches!(outcome, LexicalOutcome::SkippedAllStopwords);
    report.clusters = clusters.len();

    Ok((clusters, report))
}

/// Run the whole digest: collect, cluster and write the HTML report.
pub async fn run(
    cfg: &DigestConfig,
    providers: &[Box<dyn FeedProvider>],
    summarizer: &DynSummarizer,
) -> Result<RunReport> {
    let thresholds = cfg.thresholds()?;
    let (clusters, report) = collect_and_cluster(
        providers,
        summarizer,
        thresholds,
        cfg.general.recency_hours,
    )
    .await?;

    render::write_report(
        &clusters,
        &cfg.general.html_title,
        &cfg.general.output_file,
    )?;
    info!(
        clusters = report.clusters,
        feeds_failed = report.feeds_failed,
        output = %cfg.general.output_file.display(),
        "digest written"
    );
    Ok(report)
}
