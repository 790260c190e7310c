// src/dedup/gist.rs
//! Gist-level clustering with cross-source occurrence counts.
//!
//! Clusters are scanned in creation order and the first one whose
//! representative gist clears the threshold takes the story -- inclusive
//! comparison, no re-evaluation against later clusters even if they would
//! score higher. A story matching nothing opens a new cluster with itself as
//! representative.

use tracing::debug;

use crate::dedup::similarity::sequence_ratio;
use crate::story::{Cluster, Story};

/// Collapse stories into clusters by gist similarity. Every input story ends
/// up in exactly one cluster, so the counts sum to the input length.
pub fn cluster_by_gist(stories: Vec<Story>, threshold: f64) -> Vec<Cluster> {
    let total = stories.len();
    let mut clusters: Vec<Cluster> = Vec::new();
    for story in stories {
        let hit = clusters
            .iter()
            .position(|c| sequence_ratio(&story.gist, &c.gist) >= threshold);
        match hit {
            Some(i) => clusters[i].count += 1,
            None => clusters.push(Cluster::new(story)),
        }
    }
    debug!(stories = total, clusters = clusters.len(), "gist clustering finished");
    clusters
}
