// src/dedup/stopwords.rs
//! Stopword gate deciding whether a text carries any meaningful content.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

static ENGLISH: Lazy<HashSet<String>> = Lazy::new(|| get(LANGUAGE::English).into_iter().collect());

/// True iff at least one whitespace-delimited, lowercased token is non-empty
/// and not an English stopword.
pub fn has_meaningful_token(text: &str) -> bool {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .any(|w| !w.is_empty() && !ENGLISH.contains(&w))
}
