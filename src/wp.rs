//! WordPress REST API client.
//!
//! Typed projections of the content collections (posts, categories, pages)
//! plus a client whose fetches route through the [`FetchCache`].
//!
//! ## Never-failing fetches
//!
//! The content API is a remote, mutable, partially-unreliable dependency,
//! and a broken backend must not break SEO coverage for the whole site.
//! [`WpClient::collection`] therefore absorbs every failure — non-2xx
//! status, transport error, timeout, undeserializable body — at this
//! boundary: the cause is logged as a warning and the caller receives an
//! empty collection. Internally failures stay visible as a
//! [`FetchError`]; only the public contract is infallible.
//!
//! ## Sparse responses
//!
//! Collections are usually fetched with `_fields=slug`, so the API returns
//! objects with most fields missing. Every projection field except `slug`
//! carries a serde default — absent titles and excerpts degrade to empty
//! strings rather than parse errors.

use crate::cache::FetchCache;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on any single API request. An unresponsive backend must
/// not stall the whole build.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Collections larger than this are truncated. Pagination past the first
/// page is a known limitation.
const COLLECTION_LIMIT: u32 = 100;

/// Number of posts in the RSS feed.
const FEED_POSTS: u32 = 20;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bad status {0}")]
    Status(reqwest::StatusCode),
}

/// WP wraps rendered content as `{"rendered": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// Post projection: the fields routing and the feed need.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: u64,
    pub slug: String,
    pub title: Rendered,
    pub excerpt: Rendered,
    /// Publish timestamp as reported by WP (`2024-05-01T12:00:00`).
    pub date: String,
    pub categories: Vec<u64>,
}

/// Category projection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: u64,
    pub slug: String,
    pub name: String,
}

/// Static page projection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageDoc {
    pub id: u64,
    pub slug: String,
    pub title: Rendered,
}

/// Content API client with a per-run fetch cache.
pub struct WpClient {
    http: reqwest::blocking::Client,
    api_base: String,
    cache: FetchCache,
}

impl WpClient {
    /// `api_base` is the REST root, e.g.
    /// `https://example.com/backend/wp-json/wp/v2`.
    pub fn new(api_base: String, cache: FetchCache) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_base,
            cache,
        })
    }

    /// Up to 100 posts, slugs only.
    pub fn post_slugs(&mut self) -> Vec<Post> {
        self.collection(
            Some("posts_slugs"),
            &format!("posts?per_page={COLLECTION_LIMIT}&_fields=slug"),
        )
    }

    /// Up to 100 categories, slugs only.
    pub fn category_slugs(&mut self) -> Vec<Category> {
        self.collection(
            Some("categories_slugs"),
            &format!("categories?per_page={COLLECTION_LIMIT}&_fields=slug"),
        )
    }

    /// Up to 100 static pages, slugs only.
    pub fn page_slugs(&mut self) -> Vec<PageDoc> {
        self.collection(
            Some("pages_slugs"),
            &format!("pages?per_page={COLLECTION_LIMIT}&_fields=slug"),
        )
    }

    /// The 20 most recent posts with embedded relations, for the feed.
    pub fn recent_posts(&mut self) -> Vec<Post> {
        self.collection(
            Some("recent_posts"),
            &format!("posts?_embed=1&per_page={FEED_POSTS}"),
        )
    }

    /// Fetch a collection through the cache. Never fails: any fetch or
    /// parse problem is logged and yields an empty collection.
    ///
    /// An explicit `cache_key` overrides the URL-derived key; pass `None`
    /// for one-off requests keyed by their full URL.
    pub fn collection<T: DeserializeOwned>(
        &mut self,
        cache_key: Option<&str>,
        path_and_query: &str,
    ) -> Vec<T> {
        let url = format!("{}/{}", self.api_base, path_and_query);
        let key = cache_key.unwrap_or(&url);

        if let Some(data) = self.cache.lookup(key) {
            match serde_json::from_value(data) {
                Ok(items) => return items,
                // A projection change since the entry was written; refetch.
                Err(err) => log::warn!("discarding cached '{key}': {err}"),
            }
        }

        let data = match self.request(&url) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("fetch failed for {url}: {err}");
                return Vec::new();
            }
        };
        self.cache.store(key, data.clone());

        match serde_json::from_value(data) {
            Ok(items) => items,
            Err(err) => {
                log::warn!("unexpected response shape from {url}: {err}");
                Vec::new()
            }
        }
    }

    fn request(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json()?)
    }
}
