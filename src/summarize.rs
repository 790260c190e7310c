// src/summarize.rs
//! Summarizer capability: condense story text into a one-sentence gist.
//!
//! The pipeline only consumes gist strings, so tests run with the
//! deterministic [`EchoSummarizer`] and never touch the network.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::SummarizerConfig;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// One-sentence gist of `text`.
    async fn summarize(&self, text: &str) -> Result<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

pub type DynSummarizer = Arc<dyn Summarizer>;

/// Environment override for the configured provider; `SUMMARIZER_MODE=echo`
/// forces the offline summarizer regardless of config.
pub const ENV_SUMMARIZER_MODE: &str = "SUMMARIZER_MODE";

/// Build a summarizer from config, honoring the env override.
pub fn build_summarizer(cfg: &SummarizerConfig) -> Result<DynSummarizer> {
    let mode = std::env::var(ENV_SUMMARIZER_MODE).unwrap_or_else(|_| cfg.provider.clone());
    match mode.as_str() {
        "echo" => Ok(Arc::new(EchoSummarizer)),
        "openai" => Ok(Arc::new(OpenAiSummarizer::new(cfg)?)),
        other => Err(anyhow!("unknown summarizer provider {other:?}")),
    }
}

/// Truncate model output at the first sentence boundary; text with no
/// boundary gets a closing period.
pub fn first_sentence(text: &str) -> String {
    static RE_SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^(.*?[.!?])(\s|$)").unwrap());
    let t = text.trim();
    if t.is_empty() {
        return String::new();
    }
    match RE_SENTENCE.captures(t) {
        Some(c) => c[1].trim().to_string(),
        None => format!("{t}."),
    }
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiSummarizer {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    language: String,
}

impl OpenAiSummarizer {
    pub fn new(cfg: &SummarizerConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                anyhow!("no summarizer api key: set [summarizer] api_key or OPENAI_API_KEY")
            })?;
        let http = reqwest::Client::builder()
            .user_agent("feed-digest/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .context("building summarizer http client")?;
        Ok(Self {
            http,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: cfg.model.clone(),
            language: cfg.language.clone(),
        })
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}
#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}
#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}
#[derive(Deserialize)]
struct ChoiceMsg {
    content: String,
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the following content in one sentence, in {}: {}",
            self.language, text
        );
        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.5,
            max_tokens: 60,
        };

        let url = format!("{}/chat/completions", self.api_base);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("summarizer request")?;
        ensure!(
            resp.status().is_success(),
            "summarizer endpoint returned {}",
            resp.status()
        );
        let body: Resp = resp.json().await.context("summarizer response body")?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or_default();
        ensure!(!content.is_empty(), "summarizer returned no content");
        Ok(first_sentence(content))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Deterministic offline summarizer: the first sentence of the input. Used in
/// tests and with `SUMMARIZER_MODE=echo`.
pub struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        Ok(first_sentence(text))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}
