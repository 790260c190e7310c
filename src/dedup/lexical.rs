// src/dedup/lexical.rs
//! Lexical near-duplicate pass over raw title+description text.
//!
//! Stories are compared through the batch TF-IDF cosine matrix, scanned in
//! input order: each survivor marks every later story whose similarity is
//! strictly above the threshold as a duplicate. Duplicates are dropped, not
//! merged; no count is kept at this stage.

use tracing::{debug, warn};

use crate::dedup::stopwords::has_meaningful_token;
use crate::dedup::tfidf::cosine_matrix;
use crate::story::Story;

/// What the lexical pass did, so callers and tests can observe the
/// all-stopword fail-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalOutcome {
    Deduplicated {
        stopword_only: usize,
        duplicates: usize,
    },
    /// Every story in the batch reduced to stopwords; the input was returned
    /// unchanged instead of being emptied out.
    SkippedAllStopwords,
}

/// Drop near-duplicate stories, preserving the relative order of survivors.
///
/// Stories without a single non-stopword token are ineligible and excluded
/// up front -- unless that would exclude the whole batch, in which case the
/// pass fails open and returns the input as-is.
pub fn dedup_lexical(stories: Vec<Story>, threshold: f64) -> (Vec<Story>, LexicalOutcome) {
    if stories.is_empty() {
        return (
            stories,
            LexicalOutcome::Deduplicated {
                stopword_only: 0,
                duplicates: 0,
            },
        );
    }

    let eligible: Vec<bool> = stories
        .iter()
        .map(|s| has_meaningful_token(&s.comparison_text()))
        .collect();

    if !eligible.iter().any(|&e| e) {
        warn!(
            total = stories.len(),
            "every story reduces to stopwords; skipping lexical deduplication"
        );
        return (stories, LexicalOutcome::SkippedAllStopwords);
    }

    let stopword_only = eligible.iter().filter(|&&e| !e).count();
    let kept: Vec<Story> = stories
        .into_iter()
        .zip(&eligible)
        .filter(|(_, e)| **e)
        .map(|(s, _)| s)
        .collect();

    if kept.len() < 2 {
        return (
            kept,
            LexicalOutcome::Deduplicated {
                stopword_only,
                duplicates: 0,
            },
        );
    }

    let texts: Vec<String> = kept.iter().map(|s| s.comparison_text()).collect();
    let matrix = cosine_matrix(&texts);

    let n = kept.len();
    let mut duplicate = vec![false; n];
    for i in 0..n {
        if duplicate[i] {
            continue;
        }
        for j in (i + 1)..n {
            // Strictly greater: exactly-threshold similarity stays apart.
            if !duplicate[j] && matrix[i][j] > threshold {
                duplicate[j] = true;
            }
        }
    }

    let duplicates = duplicate.iter().filter(|&&d| d).count();
    debug!(total = n, stopword_only, duplicates, "lexical pass finished");

    let survivors = kept
        .into_iter()
        .zip(duplicate)
        .filter(|(_, dup)| !dup)
        .map(|(s, _)| s)
        .collect();
    (
        survivors,
        LexicalOutcome::Deduplicated {
            stopword_only,
            duplicates,
        },
    )
}
