// src/dedup/similarity.rs
//! Character-level sequence similarity for gists.
//!
//! `sequence_ratio` is the longest-matching-blocks measure: find the longest
//! common contiguous block, recurse on the pieces left and right of it, and
//! score `2*M / (len_a + len_b)` where `M` is the total matched length.
//! Order-sensitive and case-sensitive; two empty strings count as identical.

/// Similarity of two strings in `[0.0, 1.0]`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matched_total(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn matched_total(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_total(&a[..ai], &b[..bi]) + matched_total(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block as `(start_a, start_b, len)`. Ties go to
/// the earliest position in `a`, then in `b`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = cur;
    }
    best
}
