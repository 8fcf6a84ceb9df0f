//! # Reddit Media Finder
//!
//! Scrapes full movies, documentaries, cartoons and TV shows posted to media
//! subreddits. Records are normalized, title-cleaned, and remembered in a
//! per-board JSON cache so the same link is only stored once per namespace.
//!
//! ## Architecture
//!
//! The pipeline per finder:
//! 1. **Source**: authenticated listing API when a credential pair is
//!    available, public RSS feed otherwise (fixed at construction, see
//!    [`finder::Source`])
//! 2. **Normalize**: oEmbed/anchor extraction into [`models::MediaRecord`]s
//! 3. **Filter**: boilerplate title cleanup for the movie presets
//! 4. **Cache**: append to the per-board dedup cache, optionally flushing
//!    after every record
//!
//! ## Example
//!
//! ```no_run
//! use reddit_media_finder::config::Credentials;
//! use reddit_media_finder::finder::Finder;
//! use reddit_media_finder::models::Preset;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut finder = Finder::new(Preset::Scifi.config(), Credentials::default()).await?;
//! for record in finder.scrap(10, true).await? {
//!     println!("{} -> {}", record.title, record.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod filters;
pub mod finder;
pub mod models;
pub mod scrapers;
