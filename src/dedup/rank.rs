// src/dedup/rank.rs
//! Deterministic ordering of the final clusters.

use std::cmp::Reverse;

use crate::story::Cluster;

/// Stable sort by occurrence count, descending. Ties keep cluster-creation
/// order, so reruns over the same input produce identical output.
pub fn rank(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    clusters.sort_by_key(|c| Reverse(c.count));
    clusters
}
