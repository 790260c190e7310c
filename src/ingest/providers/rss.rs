// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::types::{FeedEntry, FeedProvider};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

fn parse_pub_date(ts: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(ts)
        .or_else(|_| DateTime::parse_from_rfc3339(ts))
        .ok()
}

/// RSS 2.0 feed provider: one HTTP GET per fetch, parsed with quick-xml.
pub struct RssProvider {
    url: String,
    client: reqwest::Client,
}

impl RssProvider {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Parse a raw RSS 2.0 document into entries, normalizing title and
    /// description text. Items with neither title nor description are
    /// skipped. Feeds list newest first; entries come back oldest first so
    /// the earliest report of a story is the one downstream clustering sees
    /// first.
    pub fn parse_feed(xml: &str, source: &str) -> Result<Vec<FeedEntry>> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean).with_context(|| format!("parsing rss xml from {source}"))?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = crate::ingest::normalize_text(it.title.as_deref().unwrap_or_default());
            let description =
                crate::ingest::normalize_text(it.description.as_deref().unwrap_or_default());
            if title.is_empty() && description.is_empty() {
                continue;
            }

            out.push(FeedEntry {
                title,
                description,
                link: it.link.unwrap_or_default(),
                published: it.pub_date.as_deref().and_then(parse_pub_date),
                source: source.to_string(),
            });
        }
        out.reverse();
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for RssProvider {
    async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("requesting {}", self.url))?
            .error_for_status()
            .with_context(|| format!("fetching {}", self.url))?
            .text()
            .await
            .with_context(|| format!("reading body from {}", self.url))?;
        Self::parse_feed(&body, &self.url)
    }

    fn name(&self) -> String {
        self.url.clone()
    }
}

// Feeds routinely embed bare HTML entities outside CDATA, which is not
// well-formed XML; rewrite the common ones before parsing.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Demo Feed</title>
    <item>
      <title>Malware X &amp; friends</title>
      <link>https://example.test/a</link>
      <pubDate>Sat, 29 Aug 2026 15:04:05 +0000</pubDate>
      <description><![CDATA[<p>Trojan&nbsp;targets banks.</p>]]></description>
    </item>
    <item>
      <title>No date item</title>
      <link>https://example.test/b</link>
      <description>Still parsed, left undated.</description>
    </item>
    <item>
      <title></title>
      <description></description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_and_normalizes_text() {
        let entries = RssProvider::parse_feed(FIXTURE, "https://example.test/feed").unwrap();
        assert_eq!(entries.len(), 2);

        // Document order is reversed, so the feed's last kept item is first.
        assert_eq!(entries[0].title, "No date item");
        assert!(entries[0].published.is_none());

        assert_eq!(entries[1].title, "Malware X & friends");
        assert_eq!(entries[1].description, "Trojan targets banks.");
        assert_eq!(entries[1].link, "https://example.test/a");
        assert_eq!(entries[1].source, "https://example.test/feed");
        let published = entries[1].published.expect("pubDate should parse");
        assert_eq!(published.to_rfc3339(), "2026-08-29T15:04:05+00:00");
    }

    #[test]
    fn newest_first_feeds_come_back_oldest_first() {
        let xml = r#"<rss version="2.0"><channel>
            <item>
              <title>Malware X hits banks</title>
              <pubDate>Sun, 30 Aug 2026 09:00:00 +0000</pubDate>
              <description>Newest report.</description>
            </item>
            <item>
              <title>Malware X strikes banks</title>
              <pubDate>Sun, 30 Aug 2026 06:00:00 +0000</pubDate>
              <description>Earliest report.</description>
            </item>
        </channel></rss>"#;
        let entries = RssProvider::parse_feed(xml, "src").unwrap();
        assert_eq!(entries[0].title, "Malware X strikes banks");
        assert_eq!(entries[1].title, "Malware X hits banks");
    }

    #[test]
    fn bare_entities_outside_cdata_do_not_break_parsing() {
        let xml = r#"<rss version="2.0"><channel><item>
            <title>Quote &ldquo;test&rdquo;&nbsp;here</title>
            <description>Dash &mdash; heavy</description>
        </item></channel></rss>"#;
        let entries = RssProvider::parse_feed(xml, "src").unwrap();
        assert_eq!(entries[0].title, "Quote \"test\" here");
        assert_eq!(entries[0].description, "Dash - heavy");
    }

    #[test]
    fn channel_without_items_parses_to_empty() {
        let xml = r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        let entries = RssProvider::parse_feed(xml, "src").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn rfc3339_dates_are_accepted_too() {
        assert!(parse_pub_date("2026-08-29T15:04:05+02:00").is_some());
        assert!(parse_pub_date("not a date").is_none());
    }
}
