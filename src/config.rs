//! Site settings.
//!
//! Handles loading and validating the optional `presite.toml` settings file.
//! All keys have defaults, so a missing file is not an error — a bare
//! checkout builds against `https://example.com` until configured.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! canonical_base_url = "https://example.com"  # Origin for emitted URLs
//! wp_base_path = "/backend"                   # WordPress mount path
//!
//! [seo]
//! default_title = ""                          # RSS channel title
//! description = ""                            # RSS channel description
//! ```
//!
//! ## Origin resolution
//!
//! The origin used in every emitted URL (sitemap entries, feed links, the
//! robots sitemap directive) comes from the `ORIGIN` environment variable
//! when set, falling back to `canonical_base_url`. CI deploys to preview
//! environments by exporting `ORIGIN` without touching the settings file.
//!
//! The content API base is derived from the same origin — the WordPress
//! instance is assumed to be reverse-proxied under the site's own domain at
//! `wp_base_path`, which is why there is no separate API origin setting.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Origin used when neither `ORIGIN` nor `canonical_base_url` is set.
const DEFAULT_ORIGIN: &str = "https://example.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site settings loaded from `presite.toml`.
///
/// All fields have defaults. User settings files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Canonical site origin, e.g. `https://blog.example.org`.
    pub canonical_base_url: String,
    /// Path prefix the WordPress backend is mounted under.
    pub wp_base_path: String,
    /// SEO defaults used by the feed generator.
    pub seo: SeoSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoSettings {
    /// Site-wide title, used as the RSS channel title.
    pub default_title: String,
    /// Site-wide description, used as the RSS channel description.
    pub description: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canonical_base_url: DEFAULT_ORIGIN.to_string(),
            wp_base_path: "/backend".to_string(),
            seo: SeoSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The origin for emitted URLs: `ORIGIN` env var, then
    /// `canonical_base_url`, then the stock default.
    pub fn origin(&self) -> String {
        resolve_origin(std::env::var("ORIGIN").ok(), self)
    }

    /// Base URL of the WordPress REST API for a given origin.
    pub fn api_base(&self, origin: &str) -> String {
        format!("{}{}/wp-json/wp/v2", origin, self.wp_base_path)
    }
}

fn resolve_origin(env_origin: Option<String>, settings: &Settings) -> String {
    match env_origin.filter(|o| !o.is_empty()) {
        Some(origin) => origin,
        None if settings.canonical_base_url.is_empty() => DEFAULT_ORIGIN.to_string(),
        None => settings.canonical_base_url.clone(),
    }
}
