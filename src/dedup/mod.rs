// src/dedup/mod.rs
//! Deduplication and ranking core.
//!
//! Two successive passes over fully materialized inputs: a lexical TF-IDF
//! pass that drops near-duplicate raw text, then a gist-level pass that
//! merges stories whose one-sentence summaries match and counts occurrences.
//! Everything here is pure, synchronous computation; all I/O happens before
//! these functions run.

pub mod gist;
pub mod lexical;
pub mod rank;
pub mod similarity;
pub mod stopwords;
pub mod tfidf;

use anyhow::{ensure, Result};

use crate::story::{Cluster, Story};
pub use lexical::LexicalOutcome;

pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Similarity thresholds for the two passes. The lexical pass merges on
/// strictly-greater similarity, the gist pass on greater-or-equal; they stay
/// separately configurable because of that boundary difference.
///
/// Validated at construction so an out-of-range value fails before any
/// processing starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub lexical: f64,
    pub gist: f64,
}

impl Thresholds {
    pub fn new(lexical: f64, gist: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&lexical),
            "lexical threshold {lexical} is outside [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&gist),
            "gist threshold {gist} is outside [0, 1]"
        );
        Ok(Self { lexical, gist })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lexical: DEFAULT_THRESHOLD,
            gist: DEFAULT_THRESHOLD,
        }
    }
}

/// Run both passes and rank the result.
pub fn dedup_and_rank(
    stories: Vec<Story>,
    thresholds: Thresholds,
) -> (Vec<Cluster>, LexicalOutcome) {
    let (survivors, outcome) = lexical::dedup_lexical(stories, thresholds.lexical);
    let clusters = gist::cluster_by_gist(survivors, thresholds.gist);
    (rank::rank(clusters), outcome)
}
