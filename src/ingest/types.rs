// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, FixedOffset};

/// One raw item parsed from a feed, before summarization.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Publication timestamp; entries without a parseable one are skipped by
    /// the recency filter.
    pub published: Option<DateTime<FixedOffset>>,
    pub source: String,
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>>;
    /// Feed identifier used for logging and as `Story::source`.
    fn name(&self) -> String;
}

/// Outcome of fetching one feed after retries. A failed feed is an explicit
/// variant, not an improvised empty entry list, so callers can tell the two
/// apart.
#[derive(Debug)]
pub enum FeedResult {
    Fetched(Vec<FeedEntry>),
    Failed { feed: String, reason: String },
}
