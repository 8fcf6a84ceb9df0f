//! Source adapters for pulling candidate media links out of a board.
//!
//! Exactly one adapter is active per finder, chosen once at construction by
//! credential availability (see [`crate::finder::Source`]):
//!
//! | Adapter | Module | Method | Notes |
//! |---------|--------|--------|-------|
//! | Authenticated listing | [`reddit`] | OAuth listing API | Drains rising/top/new/hot; richer records (attribution, thumbnail) |
//! | Public feed | [`feed`] | RSS/Atom feed | No credentials; records carry the feed thumbnail only |
//!
//! # Common behavior
//!
//! Both adapters:
//! - Fetch a whole board eagerly and return `Vec<MediaRecord>`
//! - Discard malformed submissions/entries one at a time (missing oEmbed,
//!   no iframe, no matching anchor) without failing the board
//! - Propagate transport failures (the listing or feed fetch itself) to the
//!   caller untouched

pub mod feed;
pub mod reddit;
