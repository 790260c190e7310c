// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod dedup;
pub mod ingest;
pub mod pipeline;
pub mod render;
pub mod story;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::dedup::Thresholds;
pub use crate::story::{Cluster, Story};
