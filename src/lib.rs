//! # Presite
//!
//! Build-time prerenderer and SEO artifact generator for WordPress-backed
//! single-page sites. The client app stays a SPA; presite runs after the
//! client build and materializes everything crawlers need before
//! hydration: one prerendered HTML document per route, a sitemap, an RSS
//! feed, and a robots policy.
//!
//! # Architecture: One Pass, Four Artifacts
//!
//! ```text
//! WordPress API ──▶ FetchCache ──▶ Route Discovery ──▶ Prerenderer ──▶ dist/**/index.html
//!                        │               └────────────▶ Sitemap     ──▶ dist/sitemap.xml
//!                        ├───────────────────────────▶ RSS Feed     ──▶ dist/rss.xml
//!                        └──(origin only)────────────▶ Robots       ──▶ dist/robots.txt
//! ```
//!
//! Each generator is an independent entry point (`presite prerender`,
//! `sitemap`, `rss`, `robots`); `presite build` runs all four. The
//! generators share nothing but the fetch cache, so their relative order
//! does not matter.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `presite.toml` settings, origin resolution with `ORIGIN` override |
//! | [`cache`] | Two-tier (memory + durable) TTL cache for API responses |
//! | [`wp`] | WordPress REST client — typed projections, never-failing fetches |
//! | [`routes`] | Canonical route set derived from posts/categories/pages |
//! | [`render`] | Renderer contract + adapter over the external SSR artifact |
//! | [`compose`] | Page-shell marker substitution (head metadata + markup) |
//! | [`emit`] | Route → output-path mapping and whole-file writes |
//! | [`prerender`] | Orchestrator: discover → render → compose → write |
//! | [`sitemap`] | Sitemap-protocol XML from the route set |
//! | [`feed`] | RSS 2.0 from recent posts, XML-escaped |
//! | [`robots`] | Fixed crawl policy referencing the sitemap |
//!
//! # Design Decisions
//!
//! ## The Content API Is Allowed to Be Down
//!
//! The WordPress backend is remote, mutable, and occasionally broken, and
//! a bad backend day must not cost the site its SEO coverage. All fetch
//! failures are absorbed inside [`wp`]: callers always receive a
//! well-typed (possibly empty) collection, the pipeline always completes,
//! and the damage is limited to the routes that genuinely depend on the
//! missing data. `/` and `/blog` are prerendered even with the API fully
//! dark.
//!
//! ## The Renderer Is an Artifact, Not a Library
//!
//! Rendering belongs to the client app's SSR build, which presite treats
//! as an opaque executable: route in, JSON `{markup, head}` out. This
//! keeps the pipeline independent of the frontend's framework and build
//! churn — the only coupling is a five-line JSON contract. The flip side
//! is a hard precondition: if the artifact is missing, presite exits
//! non-zero before writing anything.
//!
//! ## Deterministic Output
//!
//! Route sets are `BTreeSet`s, path mapping is a pure function, and
//! documents are whole-file writes. Two runs against the same content
//! snapshot produce byte-identical trees, which makes `dist/` diffable
//! and deploys verifiable. The only time-dependent bytes are the
//! sitemap's `lastmod` and the feed's `pubDate`.
//!
//! ## Fresh Cache Instance per Run
//!
//! The fetch cache is an explicit value constructed at the start of each
//! run, not a process-wide singleton. The durable tier carries entries
//! across back-to-back runs (a `build` right after a `sitemap` reuses
//! the same responses); the 30-second TTL bounds how stale any run can
//! be.

pub mod cache;
pub mod compose;
pub mod config;
pub mod emit;
pub mod feed;
pub mod prerender;
pub mod render;
pub mod robots;
pub mod routes;
pub mod sitemap;
pub mod wp;

#[cfg(test)]
pub(crate) mod test_helpers;
