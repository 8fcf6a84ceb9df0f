//! Authenticated listing adapter.
//!
//! Drains a board through the four listing orderings (rising, top, new, hot)
//! and normalizes each submission's oEmbed payload into a [`MediaRecord`].
//!
//! # oEmbed extraction
//!
//! The embed descriptor carries an HTML snippet like:
//!
//! ```text
//! <iframe src="https://www.youtube.com/embed/abc123?feature=oembed" ...></iframe>
//! ```
//!
//! The first iframe's `src` is taken, its query string dropped, and the
//! embed-style prefix rewritten to the canonical watch URL. Submissions
//! missing any required field are dropped one at a time; the listing fetch
//! itself failing propagates to the caller.
//!
//! # Within-call dedup
//!
//! The first three orderings skip records already collected during the same
//! call and register their own output. The final ordering checks against the
//! earlier orderings but does not register, so duplicates inside "hot" itself
//! are re-emitted. That asymmetry is inherited behavior;
//! [`FinderConfig::dedup_final_listing`] makes the last ordering register
//! like the others.

use crate::api::{ListingApi, Oembed, Ordering, Submission};
use crate::models::{FinderConfig, MediaRecord};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

static IFRAME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("iframe[src]").unwrap());

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";
const WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Pull the embedded media URL out of an oEmbed HTML snippet.
///
/// Returns the first iframe's `src` with its query string stripped and the
/// embed prefix rewritten, or `None` when the snippet has no iframe or the
/// `src` is not an absolute URL.
fn embed_url(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let iframe = fragment.select(&IFRAME_SELECTOR).next()?;
    let mut src = Url::parse(iframe.value().attr("src")?).ok()?;
    src.set_query(None);
    Some(src.as_str().replace(EMBED_PREFIX, WATCH_PREFIX))
}

fn blacklisted(title: &str, blacklist: &[String]) -> bool {
    let title = title.to_lowercase();
    blacklist.iter().any(|k| title.contains(&k.to_lowercase()))
}

/// Normalize one oEmbed payload into a record.
///
/// Each required field is validated in turn; any absence drops the
/// submission. Blacklisted titles are dropped too.
fn parse_oembed(oembed: &Oembed, blacklist: &[String]) -> Option<MediaRecord> {
    let html = oembed.html.as_deref()?;
    let title = oembed.title.as_deref()?;
    let channel_url = oembed.author_url.as_deref()?;
    let thumbnail = oembed.thumbnail_url.as_deref()?;
    let url = embed_url(html)?;

    if blacklisted(title, blacklist) {
        debug!(title, "Skipping blacklisted submission");
        return None;
    }

    Some(MediaRecord {
        title: title.to_string(),
        url,
        channel_url: Some(channel_url.to_string()),
        thumbnail: Some(thumbnail.to_string()),
        image: None,
        description: None,
    })
}

fn parse_submission(submission: &Submission, blacklist: &[String]) -> Option<MediaRecord> {
    let oembed = submission.secure_media.as_ref()?.oembed.as_ref()?;
    parse_oembed(oembed, blacklist)
}

/// Merge one listing's parsed records into the traversal output.
///
/// Records already in `seen` are skipped. When `register` is set the
/// listing's own output is added to `seen`, deduping later occurrences.
fn merge_listing(
    out: &mut Vec<MediaRecord>,
    seen: &mut Vec<MediaRecord>,
    listing: Vec<MediaRecord>,
    register: bool,
) {
    for record in listing {
        if seen.contains(&record) {
            continue;
        }
        if register {
            seen.push(record.clone());
        }
        out.push(record);
    }
}

/// Drain the listing orderings of `board` into normalized records.
///
/// `limit` caps each individual listing, so a full drain observes at most
/// `4 * limit` submissions. `budget` is the number of records the caller
/// still wants: once that many have been collected, no further listing is
/// fetched. `None` drains all four orderings.
#[instrument(level = "info", skip(client, config))]
pub async fn fetch_board<C: ListingApi>(
    client: &C,
    config: &FinderConfig,
    board: &str,
    limit: Option<u32>,
    budget: Option<usize>,
) -> Result<Vec<MediaRecord>, Box<dyn Error>> {
    let mut records = Vec::new();
    let mut seen = Vec::new();

    for ordering in Ordering::ALL {
        if budget.is_some_and(|wanted| records.len() >= wanted) {
            debug!(
                board,
                ordering = ordering.as_str(),
                "Caller's budget already met; skipping listing"
            );
            break;
        }

        let submissions = client.listing(board, ordering, limit).await?;
        let parsed: Vec<MediaRecord> = submissions
            .iter()
            .filter_map(|s| parse_submission(s, &config.blacklist))
            .collect();
        debug!(
            board,
            ordering = ordering.as_str(),
            submissions = submissions.len(),
            parsed = parsed.len(),
            "Parsed listing"
        );

        let register = ordering != Ordering::Hot || config.dedup_final_listing;
        merge_listing(&mut records, &mut seen, parsed, register);
    }

    info!(board, count = records.len(), "Drained board listings");
    Ok(records)
}
