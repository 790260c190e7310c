// src/story.rs
//! Data model shared by ingestion, summarization, the dedup core, and the
//! renderer.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One feed item inside the recency window, carrying its externally
/// generated one-sentence gist. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published: DateTime<FixedOffset>,
    /// Feed identifier the item came from.
    pub source: String,
    pub gist: String,
}

impl Story {
    /// Raw text the lexical deduplication pass compares.
    pub fn comparison_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Group of stories judged near-duplicate at the gist level. The first story
/// whose gist founded the cluster stays as representative; `count` tracks how
/// many input stories collapsed into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub title: String,
    pub link: String,
    pub gist: String,
    pub count: u32,
}

impl Cluster {
    pub fn new(story: Story) -> Self {
        Self {
            title: story.title,
            link: story.link,
            gist: story.gist,
            count: 1,
        }
    }
}
