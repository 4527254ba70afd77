//! Robots policy.
//!
//! A fixed crawl policy: everything is crawlable except the WordPress
//! backend mount, and the sitemap's absolute URL is advertised. The only
//! dynamic parts are the computed origin and the backend path.

/// Generate the `robots.txt` contents.
pub fn generate(origin: &str, wp_base_path: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: {wp_base_path}\nSitemap: {origin}/sitemap.xml"
    )
}
