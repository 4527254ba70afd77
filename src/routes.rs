//! Route discovery.
//!
//! Derives the canonical set of addressable routes from the remote content
//! source. Routes are origin-relative paths: always a leading `/`, no
//! trailing slash except the root itself. The result is a `BTreeSet`, so
//! duplicates collapse and iteration order is deterministic — callers
//! (the prerenderer, the sitemap) see the same set in the same order on
//! every run against the same content snapshot.
//!
//! Discovery is additive over three collections:
//!
//! - posts → `/blog/{slug}`
//! - categories → `/category/{slug}`
//! - pages → `/page/{slug}`
//!
//! on top of the fixed set `/` and `/blog`. A failed fetch contributes
//! zero routes (the fetch boundary already absorbed the failure), so the
//! worst case is the fixed set alone. Collections are capped at 100 items
//! by the API query; larger sites are truncated rather than paginated.

use crate::wp::WpClient;
use std::collections::BTreeSet;

/// Routes that exist regardless of remote content.
const FIXED_ROUTES: [&str; 2] = ["/", "/blog"];

/// Discover the full route set for the current content snapshot.
pub fn discover(client: &mut WpClient) -> BTreeSet<String> {
    let mut routes: BTreeSet<String> =
        FIXED_ROUTES.iter().map(|r| (*r).to_string()).collect();

    for post in client.post_slugs() {
        add_route(&mut routes, "/blog", &post.slug);
    }
    for category in client.category_slugs() {
        add_route(&mut routes, "/category", &category.slug);
    }
    for page in client.page_slugs() {
        add_route(&mut routes, "/page", &page.slug);
    }
    routes
}

/// Add `{prefix}/{slug}`, skipping items with an empty slug — a degraded
/// fetch must contribute nothing rather than a malformed route.
fn add_route(routes: &mut BTreeSet<String>, prefix: &str, slug: &str) {
    if !slug.is_empty() {
        routes.insert(format!("{prefix}/{slug}"));
    }
}
