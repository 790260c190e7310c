// src/dedup/tfidf.rs
//! TF-IDF vector space over a batch of texts and the pairwise cosine matrix
//! the lexical pass consumes. Vocabulary and document frequencies come from
//! the batch itself, so the result depends only on the input texts and their
//! order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

// Tokens are runs of 2+ word characters, lowercased.
static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\w+").unwrap());

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Full symmetric cosine-similarity matrix for `texts`.
///
/// Term weights use smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, so a term
/// present in every document still contributes. Vectors are l2-normalized;
/// a document with no tokens yields the zero vector.
pub fn cosine_matrix(texts: &[String]) -> Vec<Vec<f64>> {
    let docs: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
    let n = docs.len();

    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in &docs {
        let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    let idf: HashMap<&str, f64> = df
        .iter()
        .map(|(term, &d)| (*term, ((1.0 + n as f64) / (1.0 + d as f64)).ln() + 1.0))
        .collect();

    let vectors: Vec<HashMap<&str, f64>> = docs
        .iter()
        .map(|tokens| {
            let mut weights: HashMap<&str, f64> = HashMap::new();
            for token in tokens {
                *weights.entry(token.as_str()).or_insert(0.0) += 1.0;
            }
            for (term, w) in weights.iter_mut() {
                *w *= idf[term];
            }
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in weights.values_mut() {
                    *w /= norm;
                }
            }
            weights
        })
        .collect();

    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = dot(&vectors[i], &vectors[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}

fn dot(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    if b.len() < a.len() {
        return dot(b, a);
    }
    a.iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tokenizer_lowercases_and_drops_single_chars() {
        assert_eq!(tokenize("Malware X hits 2 banks"), vec!["malware", "hits", "banks"]);
    }

    #[test]
    fn identical_documents_have_cosine_one() {
        let m = cosine_matrix(&owned(&[
            "alpha beta gamma",
            "alpha beta gamma",
            "totally different words",
        ]));
        assert!((m[0][1] - 1.0).abs() < 1e-9, "got {}", m[0][1]);
    }

    #[test]
    fn disjoint_documents_have_cosine_zero() {
        let m = cosine_matrix(&owned(&["malware hits banks", "ransomware strikes hospitals"]));
        assert_eq!(m[0][1], 0.0);
    }

    #[test]
    fn matrix_is_symmetric() {
        let m = cosine_matrix(&owned(&[
            "malware hits banks",
            "malware hits banks overnight",
            "phishing wave in europe",
        ]));
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
    }

    #[test]
    fn mostly_shared_terms_score_high() {
        let m = cosine_matrix(&owned(&["malware hits banks", "malware hits banks overnight"]));
        // Three of four terms shared; precomputed expectation ~0.7765.
        assert!((m[0][1] - 0.7765).abs() < 0.01, "got {}", m[0][1]);
    }

    #[test]
    fn empty_document_is_dissimilar_to_everything() {
        let m = cosine_matrix(&owned(&["", "malware hits banks"]));
        assert_eq!(m[0][1], 0.0);
    }

    #[test]
    fn empty_batch_yields_empty_matrix() {
        assert!(cosine_matrix(&[]).is_empty());
    }
}
