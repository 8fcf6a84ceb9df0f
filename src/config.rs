//! Credential storage for the authenticated listing API.
//!
//! Credentials are an optional Reddit script-app pair. They can be passed on
//! the command line, or read from a JSON file at
//! `{config_dir}/reddit_media_finder/credentials.json`:
//!
//! ```json
//! { "client": "...", "secret": "..." }
//! ```
//!
//! Either or both fields may be absent. A finder with an incomplete pair
//! falls back to the public feed adapter, so a missing or malformed file is
//! never an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An optional API client id/secret pair.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Credentials {
    /// OAuth client id.
    pub client: Option<String>,
    /// OAuth client secret.
    pub secret: Option<String>,
}

impl Credentials {
    /// Both halves of the pair are present.
    pub fn is_complete(&self) -> bool {
        self.client.is_some() && self.secret.is_some()
    }

    /// Load credentials from the default config file, or an empty pair if the
    /// file is missing or malformed.
    pub fn load() -> Self {
        Self::from_file(&default_path())
    }

    /// Load credentials from `path`, or an empty pair on any failure.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(creds) => {
                    debug!(path = %path.display(), "Loaded credentials file");
                    creds
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Credentials file is malformed; using feed adapter");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

fn default_path() -> PathBuf {
    let dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join("reddit_media_finder").join("credentials.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_pair() {
        let dir = tempdir().unwrap();
        let creds = Credentials::from_file(&dir.path().join("absent.json"));
        assert!(!creds.is_complete());
        assert_eq!(creds.client, None);
    }

    #[test]
    fn test_complete_pair() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"client": "id", "secret": "shh"}"#).unwrap();
        let creds = Credentials::from_file(&path);
        assert!(creds.is_complete());
        assert_eq!(creds.client.as_deref(), Some("id"));
        assert_eq!(creds.secret.as_deref(), Some("shh"));
    }

    #[test]
    fn test_half_pair_is_incomplete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"client": "id"}"#).unwrap();
        assert!(!Credentials::from_file(&path).is_complete());
    }

    #[test]
    fn test_malformed_file_is_empty_pair() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(!Credentials::from_file(&path).is_complete());
    }
}
