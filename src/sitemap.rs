//! Sitemap generation.
//!
//! Maps the discovered route set to a sitemap-protocol XML document with
//! fully-qualified URLs. Every entry carries a `lastmod` equal to the
//! generation timestamp rather than the item's own modification time —
//! behavior carried over from the legacy build scripts (see DESIGN.md).
//! Crawlers treat `lastmod` as a hint, and the sitemap is regenerated on
//! every build anyway.
//!
//! Routes contain only slug characters and `/`, so URL text needs no XML
//! escaping here; the feed generator, which carries free-form titles, is
//! where escaping matters.

use crate::routes;
use crate::wp::WpClient;
use chrono::{SecondsFormat, Utc};

const URLSET_OPEN: &str =
    "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">";

/// Generate the sitemap document for the current content snapshot.
pub fn generate(client: &mut WpClient, origin: &str) -> String {
    let routes = routes::discover(client);
    let lastmod = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(URLSET_OPEN);
    xml.push('\n');
    for route in &routes {
        let loc = qualify(origin, route);
        xml.push_str(&format!(
            "  <url><loc>{loc}</loc><lastmod>{lastmod}</lastmod></url>\n"
        ));
    }
    xml.push_str("</urlset>");
    xml
}

/// Fully qualify a route. The root route keeps its slash (`origin/`);
/// other routes already carry a leading slash.
fn qualify(origin: &str, route: &str) -> String {
    format!("{origin}{route}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchCache;
    use crate::test_helpers::{mock_client, mock_collections};
    use httpmock::prelude::*;

    const ORIGIN: &str = "https://example.com";

    #[test]
    fn contains_one_url_per_route_with_no_duplicates() {
        let server = MockServer::start();
        mock_collections(
            &server,
            &["one", "two", "three"],
            &["news", "tips"],
            &["about"],
        );
        let mut client = mock_client(&server, FetchCache::disabled());

        let xml = generate(&mut client, ORIGIN);
        // 2 fixed + 3 posts + 2 categories + 1 page
        assert_eq!(xml.matches("<url>").count(), 8);
        assert_eq!(xml.matches("</url>").count(), 8);
        assert_eq!(
            xml.matches("<loc>https://example.com/blog/one</loc>").count(),
            1
        );
    }

    #[test]
    fn fixed_urls_always_present() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });
        let mut client = mock_client(&server, FetchCache::disabled());

        let xml = generate(&mut client, ORIGIN);
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog</loc>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn declares_sitemap_protocol_namespace() {
        let server = MockServer::start();
        mock_collections(&server, &[], &[], &[]);
        let mut client = mock_client(&server, FetchCache::disabled());

        let xml = generate(&mut client, ORIGIN);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn every_url_carries_a_lastmod() {
        let server = MockServer::start();
        mock_collections(&server, &["post"], &[], &[]);
        let mut client = mock_client(&server, FetchCache::disabled());

        let xml = generate(&mut client, ORIGIN);
        assert_eq!(
            xml.matches("<lastmod>").count(),
            xml.matches("<url>").count()
        );
        // RFC 3339 UTC with milliseconds, e.g. 2026-08-26T12:00:00.000Z
        let lastmod = xml
            .split("<lastmod>")
            .nth(1)
            .and_then(|s| s.split("</lastmod>").next())
            .unwrap();
        assert!(lastmod.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(lastmod).is_ok());
    }

    #[test]
    fn category_and_page_urls_are_qualified() {
        let server = MockServer::start();
        mock_collections(&server, &[], &["news"], &["about"]);
        let mut client = mock_client(&server, FetchCache::disabled());

        let xml = generate(&mut client, ORIGIN);
        assert!(xml.contains("<loc>https://example.com/category/news</loc>"));
        assert!(xml.contains("<loc>https://example.com/page/about</loc>"));
    }
}
