//! RSS feed generation.
//!
//! Emits an RSS 2.0 document for the 20 most recent posts. Unlike routes
//! and sitemap URLs, feed text is free-form content from the CMS — post
//! titles and excerpts routinely carry `&`, `<`, and `>` — so everything
//! inserted into an element body is escaped for the three XML
//! metacharacters. Unescaped injection would not just look wrong, it can
//! make the whole document unparsable for feed readers.
//!
//! Descriptions come from the post excerpt with HTML tags stripped first:
//! the excerpt is rendered markup (`<p>…</p>`), and feed description
//! bodies want plain text.

use crate::config::Settings;
use crate::wp::{Post, WpClient};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Generate the RSS document for the most recent posts.
pub fn generate(client: &mut WpClient, settings: &Settings, origin: &str) -> String {
    let items: String = client
        .recent_posts()
        .iter()
        .filter(|p| !p.slug.is_empty())
        .map(|p| render_item(p, origin))
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\">\n\
         <channel>\n\
         \x20 <title>{title}</title>\n\
         \x20 <link>{origin}</link>\n\
         \x20 <description>{description}</description>\n\
         {items}\
         </channel>\n\
         </rss>",
        title = escape_xml(&settings.seo.default_title),
        description = escape_xml(&settings.seo.description),
    )
}

fn render_item(post: &Post, origin: &str) -> String {
    let url = format!("{origin}/blog/{}", post.slug);
    let description = escape_xml(&strip_tags(&post.excerpt.rendered));
    format!(
        "  <item>\n\
         \x20   <title>{title}</title>\n\
         \x20   <link>{url}</link>\n\
         \x20   <guid>{url}</guid>\n\
         \x20   <description>{description}</description>\n\
         \x20   <pubDate>{date}</pubDate>\n\
         \x20 </item>\n",
        title = escape_xml(&post.title.rendered),
        date = rfc822(&post.date),
    )
}

/// Escape the XML metacharacters for element body text. `&` must go
/// first or the other substitutions would be double-escaped.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Remove HTML tags, keeping the text between them. An unclosed `<` is
/// kept as text rather than swallowing the remainder.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// RFC 822 date for `pubDate`, e.g. `Wed, 01 May 2024 12:00:00 GMT`.
///
/// WP reports dates either as RFC 3339 or as a naive local-less
/// `%Y-%m-%dT%H:%M:%S`; the naive form is treated as UTC. An unparsable
/// date falls back to the generation time rather than failing the feed.
fn rfc822(date: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| Utc::now());
    parsed.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchCache;
    use crate::test_helpers::{mock_client, post_json};
    use httpmock::prelude::*;
    use serde_json::Value;

    const ORIGIN: &str = "https://example.com";

    fn feed_with(posts: Vec<Value>) -> String {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/wp-json/wp/v2/posts");
            then.status(200).json_body(Value::Array(posts));
        });
        let mut client = mock_client(&server, FetchCache::disabled());
        let settings = Settings {
            seo: crate::config::SeoSettings {
                default_title: "Field Notes & Essays".to_string(),
                description: "Notes on <everything>".to_string(),
            },
            ..Settings::default()
        };
        generate(&mut client, &settings, ORIGIN)
    }

    #[test]
    fn titles_are_escaped() {
        let xml = feed_with(vec![post_json(
            "a-and-b",
            "A & B <Test>",
            "",
            "2024-05-01T12:00:00",
        )]);
        assert!(xml.contains("<title>A &amp; B &lt;Test&gt;</title>"));
        assert!(!xml.contains("<title>A & B"));
    }

    #[test]
    fn descriptions_are_stripped_then_escaped() {
        let xml = feed_with(vec![post_json(
            "post",
            "Post",
            "<p>Ems &amp; dashes</p>",
            "2024-05-01T12:00:00",
        )]);
        assert!(xml.contains("<description>Ems &amp;amp; dashes</description>"));
    }

    #[test]
    fn link_and_guid_match() {
        let xml = feed_with(vec![post_json(
            "hello-world",
            "Hello",
            "",
            "2024-05-01T12:00:00",
        )]);
        assert!(xml.contains("<link>https://example.com/blog/hello-world</link>"));
        assert!(xml.contains("<guid>https://example.com/blog/hello-world</guid>"));
    }

    #[test]
    fn pub_date_is_rfc822() {
        let xml = feed_with(vec![post_json(
            "p",
            "P",
            "",
            "2024-05-01T12:30:45",
        )]);
        assert!(xml.contains("<pubDate>Wed, 01 May 2024 12:30:45 GMT</pubDate>"));
    }

    #[test]
    fn channel_metadata_is_escaped() {
        let xml = feed_with(vec![]);
        assert!(xml.contains("<title>Field Notes &amp; Essays</title>"));
        assert!(xml.contains("<description>Notes on &lt;everything&gt;</description>"));
    }

    #[test]
    fn empty_feed_is_still_a_document() {
        let xml = feed_with(vec![]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.ends_with("</rss>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn fetch_failure_degrades_to_empty_feed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });
        let mut client = mock_client(&server, FetchCache::disabled());
        let xml = generate(&mut client, &Settings::default(), ORIGIN);
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</rss>"));
    }

    #[test]
    fn escape_orders_ampersand_first() {
        assert_eq!(escape_xml("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(strip_tags("<p>Hello <em>world</em></p>"), "Hello world");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn strip_tags_keeps_unclosed_angle() {
        assert_eq!(strip_tags("5 < 6"), "5 < 6");
    }

    #[test]
    fn rfc822_parses_rfc3339_dates_too() {
        assert_eq!(
            rfc822("2024-05-01T12:30:45Z"),
            "Wed, 01 May 2024 12:30:45 GMT"
        );
        assert_eq!(
            rfc822("2024-05-01T14:30:45+02:00"),
            "Wed, 01 May 2024 12:30:45 GMT"
        );
    }

    #[test]
    fn rfc822_unparsable_date_falls_back() {
        // Generation time, not a panic.
        assert!(rfc822("not a date").ends_with("GMT"));
    }
}
