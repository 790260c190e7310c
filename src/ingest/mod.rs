// src/ingest/mod.rs
pub mod providers;
pub mod types;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

pub use providers::RssProvider;
pub use types::{FeedEntry, FeedProvider, FeedResult};

const FETCH_RETRIES: usize = 3;
const RETRY_DELAY_SECS: u64 = 5;

/// Normalize text pulled from a feed: decode HTML entities, strip tags,
/// collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Fetch one feed, retrying transient failures with a fixed delay. The final
/// failure becomes a `FeedResult::Failed` so the run can continue with the
/// remaining feeds.
pub async fn fetch_with_retry(provider: &dyn FeedProvider) -> FeedResult {
    let mut last_error = String::new();
    for attempt in 1..=FETCH_RETRIES {
        match provider.fetch().await {
            Ok(entries) => return FeedResult::Fetched(entries),
            Err(e) => {
                last_error = format!("{e:#}");
                if attempt < FETCH_RETRIES {
                    warn!(
                        feed = %provider.name(),
                        attempt,
                        error = %last_error,
                        "feed fetch failed; retrying in {RETRY_DELAY_SECS}s"
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(RETRY_DELAY_SECS)).await;
                }
            }
        }
    }
    FeedResult::Failed {
        feed: provider.name(),
        reason: last_error,
    }
}

/// Keep entries published within `hours` of `now`. Entries without a
/// parseable publication date are skipped. A window too large to represent
/// keeps every dated entry.
pub fn filter_recent(entries: Vec<FeedEntry>, now: DateTime<Utc>, hours: i64) -> Vec<FeedEntry> {
    let limit = Duration::try_hours(hours)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    entries
        .into_iter()
        .filter(|e| {
            e.published
                .map(|p| p.with_timezone(&Utc) >= limit)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn normalize_text_strips_tags_and_entities() {
        let s = "  <p>Hello&nbsp;&nbsp;world</p><br/> again  ";
        assert_eq!(normalize_text(s), "Hello world again");
    }

    #[test]
    fn normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("a\n\t b   c"), "a b c");
    }

    fn entry(published: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: "t".into(),
            description: "d".into(),
            link: "https://example.test/x".into(),
            published: published.map(|p| DateTime::parse_from_rfc3339(p).unwrap()),
            source: "feed".into(),
        }
    }

    #[test]
    fn recency_filter_keeps_fresh_and_drops_stale_or_undated() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let entries = vec![
            entry(Some("2026-08-30T08:00:00+00:00")), // fresh
            entry(Some("2026-08-28T08:00:00+00:00")), // stale
            entry(None),                              // undated
            entry(Some("2026-08-29T13:00:00+01:00")), // fresh, offset timezone
        ];
        let out = filter_recent(entries, now, 24);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn oversized_recency_window_keeps_dated_entries_without_panicking() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let entries = vec![
            entry(Some("2026-08-30T08:00:00+00:00")),
            entry(Some("1999-01-01T00:00:00+00:00")),
            entry(None),
        ];
        let out = filter_recent(entries, now, i64::MAX);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn recency_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let out = filter_recent(vec![entry(Some("2026-08-29T12:00:00+00:00"))], now, 24);
        assert_eq!(out.len(), 1);
    }

    struct FlakyProvider {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl FeedProvider for FlakyProvider {
        async fn fetch(&self) -> anyhow::Result<Vec<FeedEntry>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                bail!("connection reset");
            }
            Ok(vec![entry(Some("2026-08-30T08:00:00+00:00"))])
        }
        fn name(&self) -> String {
            "flaky".into()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_recovers_within_retry_budget() {
        let provider = FlakyProvider {
            failures: 2,
            calls: AtomicUsize::new(0),
        };
        match fetch_with_retry(&provider).await {
            FeedResult::Fetched(entries) => assert_eq!(entries.len(), 1),
            FeedResult::Failed { reason, .. } => panic!("expected success, got {reason}"),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_reports_failure_after_final_attempt() {
        let provider = FlakyProvider {
            failures: usize::MAX,
            calls: AtomicUsize::new(0),
        };
        match fetch_with_retry(&provider).await {
            FeedResult::Failed { feed, reason } => {
                assert_eq!(feed, "flaky");
                assert!(reason.contains("connection reset"));
            }
            FeedResult::Fetched(_) => panic!("expected failure"),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }
}
