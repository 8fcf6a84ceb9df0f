//! Public feed adapter.
//!
//! Credential-free fallback: fetch a board's public RSS/Atom feed at
//! `https://www.reddit.com/r/{board}.rss` and mine each entry's HTML content
//! for anchors pointing at known media hosts (Internet Archive "details"
//! pages and YouTube watch links by default).
//!
//! One entry yields one record per matching anchor, so an entry may produce
//! zero, one, or several records. A missing feed thumbnail degrades the
//! record's `image` field to absent; it never drops the entry.

use crate::models::{FinderConfig, MediaRecord};
use feed_rs::model::Entry;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Collect one record per anchor in `html` whose target contains any of the
/// accepted URL substrings.
fn anchor_records(
    title: &str,
    html: &str,
    image: Option<&str>,
    valid_urls: &[String],
) -> Vec<MediaRecord> {
    let fragment = Html::parse_fragment(html);
    let mut records = Vec::new();
    for anchor in fragment.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !valid_urls.iter().any(|pattern| href.contains(pattern.as_str())) {
            continue;
        }
        records.push(MediaRecord {
            title: title.to_string(),
            url: href.to_string(),
            channel_url: None,
            thumbnail: None,
            image: image.map(String::from),
            description: None,
        });
    }
    records
}

/// Normalize one feed entry into records, one per matching anchor.
///
/// Entries without a title or an HTML content body are discarded whole.
fn parse_entry(entry: &Entry, valid_urls: &[String]) -> Vec<MediaRecord> {
    let Some(title) = entry.title.as_ref().map(|t| t.content.as_str()) else {
        return Vec::new();
    };
    let Some(body) = entry.content.as_ref().and_then(|c| c.body.as_deref()) else {
        return Vec::new();
    };
    let image = entry
        .media
        .first()
        .and_then(|media| media.thumbnails.first())
        .map(|thumb| thumb.image.uri.as_str());

    anchor_records(title, body, image, valid_urls)
}

/// Fetch and mine the public feed of `board`.
#[instrument(level = "info", skip(http, config))]
pub async fn fetch_board(
    http: &reqwest::Client,
    config: &FinderConfig,
    board: &str,
) -> Result<Vec<MediaRecord>, Box<dyn Error>> {
    let url = format!("https://www.reddit.com/r/{board}.rss");
    let body = http
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let feed = feed_rs::parser::parse(body.as_ref())?;
    debug!(board, entries = feed.entries.len(), "Parsed board feed");

    let mut records = Vec::new();
    for entry in &feed.entries {
        records.extend(parse_entry(entry, &config.valid_urls));
    }

    info!(board, count = records.len(), "Drained board feed");
    Ok(records)
}
