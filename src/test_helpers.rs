//! Shared test utilities for the presite test suite.
//!
//! Fixture builders for WP REST responses plus mock-server wiring used by
//! the client, discovery, and generator tests.

use crate::cache::FetchCache;
use crate::wp::WpClient;
use httpmock::prelude::*;
use serde_json::{Value, json};

/// Client pointed at a mock server's REST root.
pub fn mock_client(server: &MockServer, cache: FetchCache) -> WpClient {
    WpClient::new(format!("{}/wp-json/wp/v2", server.base_url()), cache).unwrap()
}

/// `[{"slug": ...}, ...]` — the shape of a `_fields=slug` response.
pub fn slugs_json(slugs: &[&str]) -> Value {
    Value::Array(slugs.iter().map(|s| json!({"slug": s})).collect())
}

/// A full post object as the feed fetch sees it.
pub fn post_json(slug: &str, title: &str, excerpt: &str, date: &str) -> Value {
    json!({
        "id": 1,
        "slug": slug,
        "title": {"rendered": title},
        "excerpt": {"rendered": excerpt},
        "date": date,
        "categories": [2],
    })
}

/// Mount the three collection endpoints with the given slugs.
pub fn mock_collections(
    server: &MockServer,
    posts: &[&str],
    categories: &[&str],
    pages: &[&str],
) {
    let posts_body = slugs_json(posts);
    server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .query_param("_fields", "slug");
        then.status(200).json_body(posts_body.clone());
    });
    let categories_body = slugs_json(categories);
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/categories");
        then.status(200).json_body(categories_body.clone());
    });
    let pages_body = slugs_json(pages);
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/pages");
        then.status(200).json_body(pages_body.clone());
    });
}
