//! Title cleanup for movie-oriented finders.
//!
//! Board titles carry boilerplate like "Night of the Living Dead - Full movie
//! (1968)". This module strips the known boilerplate phrases and, when a title
//! follows the common `Title - Description` convention, splits it into a title
//! and a description.
//!
//! The base finder forwards titles untouched; only the movie presets enable
//! this filter (see [`crate::models::FinderConfig::clean_titles`]).

use crate::models::MediaRecord;

/// Boilerplate phrases removed from titles, in their posted spelling.
///
/// Each phrase is also removed in lowercase, UPPERCASE, and Title Case, since
/// posters capitalize these freely.
const BOILERPLATE: &[&str] = &["full HD movie", "Full movie"];

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(f) => {
                    f.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_edges(s: &str) -> &str {
    s.trim_matches(|c: char| c == '-' || c.is_whitespace())
}

/// Clean a raw submission title, returning the title and an optional
/// description.
///
/// # Algorithm
///
/// 1. Remove every [`BOILERPLATE`] phrase in its original, lowercase,
///    UPPERCASE, and Title Case spellings.
/// 2. If splitting the result on `-` yields exactly two segments that are both
///    non-empty once hyphens and whitespace are stripped, the first segment
///    becomes the title and the second the description.
/// 3. Otherwise the whole string, with leading/trailing hyphens and whitespace
///    stripped, is the title and there is no description.
///
/// The split decision looks at the string before edge-stripping, so a leading
/// `"- "` left behind by boilerplate removal counts as a stray edge rather
/// than a separator.
pub fn clean_title(raw: &str) -> (String, Option<String>) {
    let mut title = raw.to_string();
    for phrase in BOILERPLATE {
        for variant in [
            phrase.to_string(),
            phrase.to_lowercase(),
            phrase.to_uppercase(),
            title_case(phrase),
        ] {
            title = title.replace(&variant, "");
        }
    }

    let segments: Vec<&str> = title.split('-').collect();
    if segments.len() == 2 {
        let head = strip_edges(segments[0]);
        let tail = strip_edges(segments[1]);
        if !head.is_empty() && !tail.is_empty() {
            return (head.to_string(), Some(tail.to_string()));
        }
    }

    (strip_edges(&title).to_string(), None)
}

/// Apply [`clean_title`] to a record in place.
///
/// A description produced by the split overwrites nothing: records reaching
/// this filter never have one yet.
pub fn clean_record(mut record: MediaRecord) -> MediaRecord {
    let (title, description) = clean_title(&record.title);
    record.title = title;
    if description.is_some() {
        record.description = description;
    }
    record
}
