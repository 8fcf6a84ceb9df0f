//! Authenticated Reddit listing API client.
//!
//! This module wraps the two HTTP calls the authenticated path needs:
//!
//! 1. An OAuth2 client-credentials token request against
//!    `https://www.reddit.com/api/v1/access_token`
//! 2. Board listing requests against `https://oauth.reddit.com/r/{board}/{ordering}`
//!
//! Listings come back as a JSON envelope of "children"; each child's `data`
//! carries the submission, and embedded videos hang off its
//! `secure_media.oembed` descriptor. Every field of the descriptor is
//! optional on the wire, so the serde models below default everything and
//! leave presence checks to the adapter.
//!
//! Fetch failures here (token or listing) propagate to the caller; there is
//! no retry. Per-submission malformation is not this module's concern.

use serde::Deserialize;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A listing ranking mode.
///
/// The adapter drains the four orderings in the order given by
/// [`Ordering::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Rising,
    Top,
    New,
    Hot,
}

impl Ordering {
    /// All orderings, in the sequence the adapter queries them.
    pub const ALL: [Ordering; 4] = [Ordering::Rising, Ordering::Top, Ordering::New, Ordering::Hot];

    /// The path segment for this ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            Ordering::Rising => "rising",
            Ordering::Top => "top",
            Ordering::New => "new",
            Ordering::Hot => "hot",
        }
    }
}

/// oEmbed descriptor attached to a submission with embedded media.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Oembed {
    /// HTML snippet containing the embed iframe.
    #[serde(default)]
    pub html: Option<String>,
    /// Title of the embedded media.
    #[serde(default)]
    pub title: Option<String>,
    /// Uploader attribution URL.
    #[serde(default)]
    pub author_url: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// `secure_media` payload of a submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecureMedia {
    #[serde(default)]
    pub oembed: Option<Oembed>,
}

/// A single submission as returned inside a listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub secure_media: Option<SecureMedia>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Submission,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Source of board listings.
///
/// [`RedditClient`] is the implementation that talks to the network; the
/// listing adapter is generic over this trait so its traversal logic can be
/// exercised against canned listings.
pub trait ListingApi {
    /// Fetch one listing of `board` under `ordering`.
    ///
    /// `limit` caps the number of submissions per listing; `None` takes the
    /// API default page size.
    async fn listing(
        &self,
        board: &str,
        ordering: Ordering,
        limit: Option<u32>,
    ) -> Result<Vec<Submission>, Box<dyn Error>>;
}

/// Client for the authenticated listing API.
///
/// Holds a bearer token obtained once at construction; tokens last long
/// enough for a full scrape, so there is no refresh logic.
#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    token: String,
}

impl RedditClient {
    /// Exchange a client id/secret pair for a bearer token and return a
    /// ready-to-use client.
    #[instrument(level = "info", skip_all)]
    pub async fn authenticate(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        let t0 = Instant::now();
        let response = http
            .post("https://www.reddit.com/api/v1/access_token")
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?;
        let token: TokenResponse = response.json().await?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Obtained API access token"
        );
        Ok(Self {
            http,
            token: token.access_token,
        })
    }
}

impl ListingApi for RedditClient {
    #[instrument(level = "info", skip(self))]
    async fn listing(
        &self,
        board: &str,
        ordering: Ordering,
        limit: Option<u32>,
    ) -> Result<Vec<Submission>, Box<dyn Error>> {
        let url = format!(
            "https://oauth.reddit.com/r/{}/{}",
            board,
            ordering.as_str()
        );

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("raw_json", "1")]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }

        let t0 = Instant::now();
        let response = request.send().await;
        let response = match response {
            Ok(r) => r.error_for_status()?,
            Err(e) => {
                warn!(%url, error = %e, "Listing fetch failed");
                return Err(e.into());
            }
        };
        let listing: Listing = response.json().await?;

        let submissions: Vec<Submission> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect();
        debug!(
            %url,
            count = submissions.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched listing"
        );
        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_sequence() {
        let names: Vec<&str> = Ordering::ALL.iter().map(|o| o.as_str()).collect();
        assert_eq!(names, vec!["rising", "top", "new", "hot"]);
    }

    #[test]
    fn test_listing_deserialization() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "secure_media": {
                                "oembed": {
                                    "html": "<iframe src=\"https://www.youtube.com/embed/abc\"></iframe>",
                                    "title": "Metropolis",
                                    "author_url": "https://www.youtube.com/@archive",
                                    "thumbnail_url": "https://i.ytimg.com/vi/abc/hq.jpg"
                                }
                            }
                        }
                    },
                    { "kind": "t3", "data": {} }
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.children.len(), 2);

        let oembed = listing.data.children[0]
            .data
            .secure_media
            .as_ref()
            .unwrap()
            .oembed
            .as_ref()
            .unwrap();
        assert_eq!(oembed.title.as_deref(), Some("Metropolis"));
        assert!(listing.data.children[1].data.secure_media.is_none());
    }

    #[test]
    fn test_submission_without_media_deserializes() {
        let sub: Submission = serde_json::from_str(r#"{"secure_media": null}"#).unwrap();
        assert!(sub.secure_media.is_none());
    }
}
