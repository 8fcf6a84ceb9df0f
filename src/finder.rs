//! Finder facade tying the pipeline together.
//!
//! A [`Finder`] owns one immutable [`FinderConfig`], one [`Source`] picked at
//! construction, and the persistent [`BoardCache`] for its namespace. Each
//! [`Finder::scrap`] call walks the configured boards in declaration order,
//! drains the source adapter, applies the title cleanup filter when the
//! config asks for it, records everything in the cache, and returns the
//! records in yield order.

use crate::api::RedditClient;
use crate::cache::BoardCache;
use crate::config::Credentials;
use crate::filters;
use crate::models::{FinderConfig, MediaRecord};
use crate::scrapers;
use std::error::Error;
use tracing::{debug, info, instrument};

/// The source adapter a finder pulls from.
///
/// Chosen exactly once, when the finder is built: a complete credential pair
/// selects the authenticated listing API, anything less selects the public
/// feed. No per-call capability checks happen after that.
#[derive(Debug)]
pub enum Source {
    /// Authenticated listing API client.
    Api(RedditClient),
    /// Plain HTTP client for the public feed.
    Feed(reqwest::Client),
    /// Canned per-board batches, recording which boards were fetched.
    #[cfg(test)]
    Fixed {
        batches: std::collections::HashMap<String, Vec<MediaRecord>>,
        fetched: std::cell::RefCell<Vec<String>>,
    },
}

/// Scrapes configured boards into deduplicated media records.
#[derive(Debug)]
pub struct Finder {
    config: FinderConfig,
    source: Source,
    cache: BoardCache,
}

impl Finder {
    /// Build a finder for `config`.
    ///
    /// Credentials resolve in order: the explicit `credentials` argument,
    /// then the credentials file, then none (feed adapter). Authenticating
    /// with a bad pair is an error rather than a silent feed fallback.
    pub async fn new(
        config: FinderConfig,
        credentials: Credentials,
    ) -> Result<Self, Box<dyn Error>> {
        let credentials = if credentials.is_complete() {
            credentials
        } else {
            Credentials::load()
        };

        let source = match (&credentials.client, &credentials.secret) {
            (Some(client), Some(secret)) => {
                info!(cache = %config.cache_name, "Using authenticated listing adapter");
                Source::Api(
                    RedditClient::authenticate(client, secret, &config.user_agent).await?,
                )
            }
            _ => {
                info!(cache = %config.cache_name, "No credentials; using public feed adapter");
                Source::Feed(
                    reqwest::Client::builder()
                        .user_agent(config.user_agent.clone())
                        .build()?,
                )
            }
        };

        let cache = BoardCache::open(&config.cache_name);
        Ok(Self {
            config,
            source,
            cache,
        })
    }

    /// Scrape the configured boards.
    ///
    /// Yields up to `max_count` records (`0` means unlimited), stopping as
    /// soon as the count is reached even mid-board. The remaining budget is
    /// threaded down to the listing adapter, so once the count is reached no
    /// further board, listing, or feed request is made. Every yielded record
    /// is appended to the dedup cache; with `persist_each` the cache file is
    /// rewritten after each record, trading write amplification for
    /// durability.
    #[instrument(level = "info", skip(self), fields(cache = %self.config.cache_name))]
    pub async fn scrap(
        &mut self,
        max_count: usize,
        persist_each: bool,
    ) -> Result<Vec<MediaRecord>, Box<dyn Error>> {
        let mut yielded = Vec::new();
        let boards = self.config.boards.clone();

        'boards: for board in &boards {
            let budget = (max_count != 0).then(|| max_count - yielded.len());
            let records = match &self.source {
                Source::Api(client) => {
                    scrapers::reddit::fetch_board(client, &self.config, board, None, budget)
                        .await?
                }
                Source::Feed(http) => {
                    scrapers::feed::fetch_board(http, &self.config, board).await?
                }
                #[cfg(test)]
                Source::Fixed { batches, fetched } => {
                    fetched.borrow_mut().push(board.clone());
                    batches.get(board).cloned().unwrap_or_default()
                }
            };

            if self.consume_board(board, records, max_count, persist_each, &mut yielded)? {
                break 'boards;
            }
        }

        info!(count = yielded.len(), "Scrape finished");
        Ok(yielded)
    }

    /// Filter, cache, and collect one board's records.
    ///
    /// Returns `true` once `max_count` is reached, which stops the scrape
    /// before any further board is fetched. Records are yielded whether or
    /// not the cache had seen them before; the cache itself only ever stores
    /// one copy.
    fn consume_board(
        &mut self,
        board: &str,
        records: Vec<MediaRecord>,
        max_count: usize,
        persist_each: bool,
        yielded: &mut Vec<MediaRecord>,
    ) -> Result<bool, Box<dyn Error>> {
        for record in records {
            let record = if self.config.clean_titles {
                filters::clean_record(record)
            } else {
                record
            };

            let appended = self.cache.append(board, record.clone());
            if appended && persist_each {
                self.cache.flush()?;
            }
            debug!(board, title = %record.title, appended, "Yielding record");
            yielded.push(record);

            if max_count != 0 && yielded.len() >= max_count {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// All previously cached records for the configured boards, in board
    /// order, ignoring freshness.
    pub fn cached_entries(&self) -> Vec<MediaRecord> {
        self.cache.all_records(&self.config.boards)
    }

    /// Read `config`'s cached records without building a finder.
    ///
    /// No source adapter is constructed and no network request is made, so
    /// this works offline even when a credential pair is configured.
    pub fn cached_records(config: &FinderConfig) -> Vec<MediaRecord> {
        BoardCache::open(&config.cache_name).all_records(&config.boards)
    }

    /// Persist the dedup cache now. Useful after a `scrap` with
    /// `persist_each` off.
    pub fn flush_cache(&self) -> Result<(), Box<dyn Error>> {
        self.cache.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(title: &str) -> MediaRecord {
        MediaRecord {
            title: title.to_string(),
            url: format!("https://archive.org/details/{title}"),
            channel_url: None,
            thumbnail: None,
            image: None,
            description: None,
        }
    }

    fn feed_finder(config: FinderConfig, cache: BoardCache) -> Finder {
        Finder {
            config,
            source: Source::Feed(reqwest::Client::new()),
            cache,
        }
    }

    fn fixed_finder(
        config: FinderConfig,
        cache: BoardCache,
        batches: &[(&str, Vec<MediaRecord>)],
    ) -> Finder {
        Finder {
            config,
            source: Source::Fixed {
                batches: batches
                    .iter()
                    .map(|(board, records)| (board.to_string(), records.clone()))
                    .collect(),
                fetched: std::cell::RefCell::new(Vec::new()),
            },
            cache,
        }
    }

    fn fetched_boards(finder: &Finder) -> Vec<String> {
        match &finder.source {
            Source::Fixed { fetched, .. } => fetched.borrow().clone(),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_scrap_with_limit_never_fetches_later_boards() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(
            ["alpha", "beta", "gamma"].map(String::from).to_vec(),
            "test_cache",
        );
        let cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        let mut finder = fixed_finder(
            config,
            cache,
            &[
                ("alpha", vec![record("a"), record("b")]),
                ("beta", vec![record("c"), record("d"), record("e")]),
                ("gamma", vec![record("f")]),
            ],
        );

        let yielded = finder.scrap(3, false).await.unwrap();
        assert_eq!(yielded.len(), 3);
        assert_eq!(
            fetched_boards(&finder),
            vec!["alpha", "beta"],
            "the limit was reached mid-beta, so gamma is never fetched"
        );
    }

    #[tokio::test]
    async fn test_scrap_unlimited_visits_every_board() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(
            ["alpha", "beta"].map(String::from).to_vec(),
            "test_cache",
        );
        let cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        let mut finder = fixed_finder(
            config,
            cache,
            &[
                ("alpha", vec![record("a")]),
                ("beta", vec![record("b")]),
            ],
        );

        let yielded = finder.scrap(0, false).await.unwrap();
        assert_eq!(yielded.len(), 2);
        assert_eq!(fetched_boards(&finder), vec!["alpha", "beta"]);
        assert!(finder.cache.contains_board("alpha"));
        assert!(finder.cache.contains_board("beta"));
    }

    #[test]
    fn test_cached_records_without_source() {
        // read-only lookup of a namespace nothing ever writes to; no source
        // adapter exists at any point
        let config = FinderConfig::new(
            vec!["alpha".to_string()],
            "reddit_media_finder_nonexistent_test_namespace",
        );
        assert!(Finder::cached_records(&config).is_empty());
    }

    #[test]
    fn test_consume_board_reports_limit_reached() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(
            vec!["alpha".to_string(), "beta".to_string()],
            "test_cache",
        );
        let cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        let mut finder = feed_finder(config, cache);

        let mut yielded = Vec::new();
        let first = vec![record("a"), record("b")];
        let second = vec![record("c"), record("d"), record("e")];

        let done = finder
            .consume_board("alpha", first, 3, false, &mut yielded)
            .unwrap();
        assert!(!done);
        let done = finder
            .consume_board("beta", second, 3, false, &mut yielded)
            .unwrap();
        assert!(done, "limit reached mid-board stops the scrape");
        assert_eq!(yielded.len(), 3);
    }

    #[test]
    fn test_unlimited_scrap_drains_everything() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(vec!["alpha".to_string()], "test_cache");
        let cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        let mut finder = feed_finder(config, cache);

        let mut yielded = Vec::new();
        let records = vec![record("a"), record("b"), record("c")];
        let done = finder
            .consume_board("alpha", records, 0, false, &mut yielded)
            .unwrap();
        assert!(!done);
        assert_eq!(yielded.len(), 3);
    }

    #[test]
    fn test_consume_applies_cleanup_when_configured() {
        let dir = tempdir().unwrap();
        let mut config = FinderConfig::new(vec!["alpha".to_string()], "test_cache");
        config.clean_titles = true;
        let cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        let mut finder = feed_finder(config, cache);

        let mut yielded = Vec::new();
        let raw = MediaRecord {
            title: "Metropolis - 1927 silent classic Full movie".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            channel_url: None,
            thumbnail: None,
            image: None,
            description: None,
        };
        finder
            .consume_board("alpha", vec![raw], 0, false, &mut yielded)
            .unwrap();
        assert_eq!(yielded[0].title, "Metropolis");
        assert_eq!(yielded[0].description.as_deref(), Some("1927 silent classic"));
        // the cleaned record, not the raw one, lands in the cache
        assert_eq!(finder.cached_entries()[0].title, "Metropolis");
    }

    #[test]
    fn test_already_cached_records_still_yield_but_cache_once() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(vec!["alpha".to_string()], "test_cache");
        let mut cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        cache.append("alpha", record("seen"));
        let mut finder = feed_finder(config, cache);

        let mut yielded = Vec::new();
        finder
            .consume_board("alpha", vec![record("seen")], 0, false, &mut yielded)
            .unwrap();
        assert_eq!(yielded.len(), 1);
        assert_eq!(finder.cached_entries().len(), 1);
    }

    #[test]
    fn test_cached_entries_follow_board_order() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(
            vec!["alpha".to_string(), "beta".to_string()],
            "test_cache",
        );
        let mut cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        cache.append("beta", record("late"));
        cache.append("alpha", record("early"));

        let finder = feed_finder(config, cache);
        let titles: Vec<String> = finder
            .cached_entries()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["early", "late"]);
    }

    #[test]
    fn test_cached_entries_skip_unseen_boards() {
        let dir = tempdir().unwrap();
        let config = FinderConfig::new(
            vec!["alpha".to_string(), "never_scraped".to_string()],
            "test_cache",
        );
        let mut cache = BoardCache::at_path(dir.path().join("test_cache.json"));
        cache.append("alpha", record("only"));

        let finder = feed_finder(config, cache);
        assert_eq!(finder.cached_entries().len(), 1);
    }

    #[test]
    fn test_flush_cache_writes_namespace_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_cache.json");
        let config = FinderConfig::new(vec!["alpha".to_string()], "test_cache");
        let mut cache = BoardCache::at_path(path.clone());
        cache.append("alpha", record("kept"));

        let finder = feed_finder(config, cache);
        finder.flush_cache().unwrap();
        assert!(path.exists());

        let reloaded = BoardCache::at_path(path);
        assert!(reloaded.contains_board("alpha"));
    }
}
