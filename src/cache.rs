//! Persistent per-board dedup cache.
//!
//! Every finder owns a [`BoardCache`]: a mapping from board name to the
//! ordered list of records already yielded for that board. The cache is a
//! permanent sighting log, not an LRU: entries are appended, never evicted or
//! expired, so a record is only ever yielded once per namespace for the
//! lifetime of the cache file.
//!
//! # On-disk format
//!
//! One JSON object per namespace, keyed by board name:
//!
//! ```text
//! {cache_dir}/reddit_media_finder/reddit_yt_movies.json
//! {
//!   "fullmoviesonyoutube": [ { "title": "...", "url": "..." }, ... ],
//!   "FullSciFiMovies": [ ... ]
//! }
//! ```
//!
//! The whole mapping is rewritten on every [`BoardCache::flush`]; callers
//! decide how often to flush (after every record for durability, or never).
//! Single-process access is assumed: there is no locking, and the last writer
//! wins.

use crate::models::MediaRecord;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Mapping from board name to previously seen records, backed by a JSON file.
#[derive(Debug)]
pub struct BoardCache {
    path: PathBuf,
    boards: BTreeMap<String, Vec<MediaRecord>>,
}

impl BoardCache {
    /// Open the cache for a namespace at the default platform cache location.
    ///
    /// A missing file yields an empty cache; so does an unreadable or corrupt
    /// one, since the cache is reconstructible and losing it only means
    /// re-yielding old records.
    pub fn open(namespace: &str) -> Self {
        let dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at_path(dir.join("reddit_media_finder").join(format!("{namespace}.json")))
    }

    /// Open the cache backed by an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        let boards = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(boards) => boards,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cache file is corrupt; starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        debug!(path = %path.display(), boards = boards.len(), "Opened board cache");
        Self { path, boards }
    }

    /// Whether any record has ever been cached for `board`.
    pub fn contains_board(&self, board: &str) -> bool {
        self.boards.contains_key(board)
    }

    /// Append `record` to `board`'s sequence unless an equal record is
    /// already present.
    ///
    /// Returns `true` when the record was actually appended. Appending only
    /// mutates memory; call [`BoardCache::flush`] to persist.
    pub fn append(&mut self, board: &str, record: MediaRecord) -> bool {
        let records = self.boards.entry(board.to_string()).or_default();
        if records.contains(&record) {
            return false;
        }
        records.push(record);
        true
    }

    /// Persist the full mapping to the namespace file.
    pub fn flush(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.boards)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), boards = self.boards.len(), "Flushed board cache");
        Ok(())
    }

    /// All cached records across `boards`, concatenated in board order.
    ///
    /// Boards with no cached records are skipped.
    pub fn all_records(&self, boards: &[String]) -> Vec<MediaRecord> {
        let mut records = Vec::new();
        for board in boards {
            if let Some(cached) = self.boards.get(board) {
                records.extend(cached.iter().cloned());
            }
        }
        records
    }
}
