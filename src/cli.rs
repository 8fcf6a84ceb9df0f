//! Command-line interface definitions.
//!
//! With no arguments, every bundled preset runs to exhaustion and each found
//! record is printed as one JSON line. Flags narrow that down to a single
//! preset, cap the record count, or dump the cache instead of scraping.

use crate::models::Preset;
use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Run every preset, printing each record
/// reddit_media_finder
///
/// # Only science fiction movies, at most 5 records
/// reddit_media_finder --preset scifi --max 5
///
/// # Authenticated listing adapter instead of the public feeds
/// reddit_media_finder --client-id ID --client-secret SECRET
///
/// # Everything found so far, without touching the network
/// reddit_media_finder --preset youtube-movies --cached
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Preset finder to run (default: all of them)
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Stop after this many records per finder (0 = unlimited)
    #[arg(short, long, default_value_t = 0)]
    pub max: usize,

    /// Do not rewrite the dedup cache file after each record
    #[arg(long)]
    pub no_store: bool,

    /// Print previously cached records and exit without scraping
    #[arg(long)]
    pub cached: bool,

    /// API client id (falls back to the credentials file)
    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API client secret (falls back to the credentials file)
    #[arg(long, env = "REDDIT_CLIENT_SECRET")]
    pub client_secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["reddit_media_finder"]);
        assert_eq!(cli.preset, None);
        assert_eq!(cli.max, 0);
        assert!(!cli.no_store);
        assert!(!cli.cached);
    }

    #[test]
    fn test_preset_selection() {
        let cli = Cli::parse_from(["reddit_media_finder", "--preset", "scifi"]);
        assert_eq!(cli.preset, Some(Preset::Scifi));

        let cli = Cli::parse_from(["reddit_media_finder", "-p", "internet-archive"]);
        assert_eq!(cli.preset, Some(Preset::InternetArchive));
    }

    #[test]
    fn test_max_and_store_flags() {
        let cli = Cli::parse_from(["reddit_media_finder", "--max", "5", "--no-store"]);
        assert_eq!(cli.max, 5);
        assert!(cli.no_store);
    }

    #[test]
    fn test_credentials_flags() {
        let cli = Cli::parse_from([
            "reddit_media_finder",
            "--client-id",
            "id",
            "--client-secret",
            "shh",
        ]);
        assert_eq!(cli.client_id.as_deref(), Some("id"));
        assert_eq!(cli.client_secret.as_deref(), Some("shh"));
    }
}
