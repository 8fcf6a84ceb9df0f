//! Data models for media records and finder configuration.
//!
//! This module defines the core data structures used throughout the application:
//! - [`MediaRecord`]: A normalized media link scraped from a board
//! - [`FinderConfig`]: Immutable per-finder configuration
//! - [`Preset`]: Named finder configurations for the bundled media boards
//!
//! Optional fields on [`MediaRecord`] are skipped during serialization so the
//! cache files and printed JSON stay sparse: the authenticated listing path
//! populates `channel_url`/`thumbnail`, the feed path populates `image`, and
//! neither populates both.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default blacklist applied to submission titles (case-insensitive substring match).
pub const DEFAULT_BLACKLIST: &[&str] = &["Deleted video", "trailer"];

/// Link substrings the feed adapter accepts as playable media URLs.
pub const DEFAULT_VALID_URLS: &[&str] = &["archive.org/details", "watch?v="];

/// User agent sent on every token, listing, and feed request.
///
/// Reddit throttles or rejects generic client user agents, so this must be
/// descriptive of the application.
pub const DEFAULT_USER_AGENT: &str = "RedditMediaFinder";

/// A normalized media link scraped from a board.
///
/// This is both the unit of output and the unit of cache storage. Two records
/// are duplicates when all populated fields compare equal; the field set
/// differs between the authenticated and feed paths, so records for the same
/// video obtained through different paths are not expected to dedup against
/// each other.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaRecord {
    /// Cleaned title of the media.
    pub title: String,
    /// Playable/viewable media URL.
    pub url: String,
    /// Uploader attribution URL (authenticated path only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,
    /// Thumbnail URL from the oEmbed payload (authenticated path only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Thumbnail URL from the feed entry (feed path only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Trailing half of a "Title - Description" split, when the cleanup
    /// filter found one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Immutable configuration for one finder instance.
///
/// Fixed at construction; the finder never mutates it. Use [`Preset`] for the
/// bundled board lists or [`FinderConfig::new`] for an ad-hoc set of boards.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Board (subreddit) names, iterated in declaration order.
    pub boards: Vec<String>,
    /// Title substrings that disqualify a submission (case-insensitive).
    pub blacklist: Vec<String>,
    /// Namespace of the on-disk dedup cache file.
    pub cache_name: String,
    /// Accepted link substrings for the feed adapter.
    pub valid_urls: Vec<String>,
    /// User agent for all outgoing requests.
    pub user_agent: String,
    /// Apply the title cleanup filter (movie presets only).
    pub clean_titles: bool,
    /// Also dedup the final ("hot") listing within a single adapter call.
    ///
    /// Off by default: the first three orderings skip records already seen in
    /// the same call, the fourth historically does not.
    pub dedup_final_listing: bool,
}

impl FinderConfig {
    /// Build a config for an arbitrary set of boards with the default
    /// blacklist, accepted URLs, and no title cleanup.
    pub fn new(boards: Vec<String>, cache_name: impl Into<String>) -> Self {
        Self {
            boards,
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            cache_name: cache_name.into(),
            valid_urls: DEFAULT_VALID_URLS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            clean_titles: false,
            dedup_final_listing: false,
        }
    }

    fn movies(boards: &[&str], cache_name: &str) -> Self {
        let mut config = Self::new(boards.iter().map(|s| s.to_string()).collect(), cache_name);
        config.clean_titles = true;
        config
    }
}

/// Named finder configurations for the bundled media boards.
///
/// Each preset fixes a board list and a cache namespace; all of them share
/// the default blacklist and accepted-URL set and enable title cleanup. The
/// single-board presets are narrowings of [`Preset::YoutubeMovies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Full movies posted to the YouTube-oriented movie boards.
    YoutubeMovies,
    /// Science fiction movies only.
    Scifi,
    /// Exploitation movies only.
    Exploitation,
    /// Movies hosted on the Internet Archive.
    InternetArchive,
    /// Documentaries.
    Documentaries,
    /// Full cartoons.
    Cartoons,
    /// Full TV shows.
    TvShows,
}

/// Presets run by the CLI when none is selected, in run order.
pub const ALL_PRESETS: &[Preset] = &[
    Preset::InternetArchive,
    Preset::Exploitation,
    Preset::Scifi,
    Preset::YoutubeMovies,
    Preset::Cartoons,
    Preset::Documentaries,
    Preset::TvShows,
];

impl Preset {
    /// The finder configuration this preset names.
    pub fn config(self) -> FinderConfig {
        match self {
            Preset::YoutubeMovies => FinderConfig::movies(
                &[
                    "fullmoviesonyoutube",
                    "FullLengthFilms",
                    "exploitation",
                    "FullSciFiMovies",
                ],
                "reddit_yt_movies",
            ),
            Preset::Scifi => FinderConfig::movies(&["FullSciFiMovies"], "reddit_yt_movies"),
            Preset::Exploitation => FinderConfig::movies(&["exploitation"], "reddit_yt_movies"),
            Preset::InternetArchive => {
                FinderConfig::movies(&["internetarchivemovies"], "reddit_ia_movies")
            }
            Preset::Documentaries => FinderConfig::movies(&["Documentaries"], "reddit_yt_movies"),
            Preset::Cartoons => {
                FinderConfig::movies(&["fullcartoonsonyoutube"], "reddit_yt_movies")
            }
            Preset::TvShows => {
                FinderConfig::movies(&["fulltvshowsonyoutube"], "reddit_yt_movies")
            }
        }
    }
}
