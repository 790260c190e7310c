// src/config.rs
//! Digest configuration: feeds, dedup thresholds, recency window, output,
//! summarizer settings. Loaded from TOML; every value that can invalidate a
//! run is checked here, before any fetching or clustering starts.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dedup::{Thresholds, DEFAULT_THRESHOLD};

pub const ENV_CONFIG_PATH: &str = "FEED_DIGEST_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/digest.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    pub general: GeneralConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub feed_urls: Vec<String>,
    /// Only entries published within this many hours of the run are kept.
    #[serde(default = "default_recency_hours")]
    pub recency_hours: i64,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_html_title")]
    pub html_title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    #[serde(default = "default_threshold")]
    pub lexical_threshold: f64,
    #[serde(default = "default_threshold")]
    pub gist_threshold: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            lexical_threshold: DEFAULT_THRESHOLD,
            gist_threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// "openai" or "echo" (offline, first sentence of the input).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Falls back to the OPENAI_API_KEY environment variable.
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_recency_hours() -> i64 {
    24
}
fn default_output_file() -> PathBuf {
    PathBuf::from("output.html")
}
fn default_html_title() -> String {
    "Threat Intelligence Feed".to_string()
}
fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_provider() -> String {
    "openai".to_string()
}
fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_language() -> String {
    "English".to_string()
}

impl DigestConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: DigestConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the config path: explicit CLI path, then $FEED_DIGEST_CONFIG,
    /// then the default location.
    pub fn resolve_path(cli: Option<&Path>) -> PathBuf {
        if let Some(p) = cli {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Validated similarity thresholds for the dedup core.
    pub fn thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(self.dedup.lexical_threshold, self.dedup.gist_threshold)
    }

    fn validate(&self) -> Result<()> {
        self.thresholds()?;
        ensure!(
            !self.general.feed_urls.is_empty(),
            "config needs at least one entry in general.feed_urls"
        );
        ensure!(
            self.general.recency_hours > 0,
            "general.recency_hours must be positive, got {}",
            self.general.recency_hours
        );
        Ok(())
    }
}
