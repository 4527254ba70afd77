//! Content fetch cache for the build pipeline.
//!
//! Every generator (prerender, sitemap, feed) starts by asking the content
//! API for the same handful of collections. This module lets repeated
//! requests within one build — and across back-to-back builds — skip the
//! network while the data is still fresh.
//!
//! # Design
//!
//! Two tiers, checked in order:
//!
//! - **Memory**: a per-run map from cache key to payload. One instance is
//!   constructed at the start of each run and discarded at the end — there
//!   is no process-wide ambient cache.
//! - **Durable**: one JSON file per key under the cache directory, so a
//!   `presite build` immediately after `presite sitemap` reuses the same
//!   responses. A durable hit within TTL is promoted into the memory tier.
//!
//! Entries carry the capture timestamp and are valid only while younger
//! than the TTL (30 seconds). The TTL is deliberately short: new posts and
//! categories should show up in the next build, while the four generators
//! of a single build still share one fetch per collection.
//!
//! ## Cache keys
//!
//! Keys are short logical names (`"routes_posts"`, `"feed_posts"`) chosen
//! by the caller rather than raw URLs, so equivalent requests with
//! different query spellings share an entry. Durable filenames are the
//! SHA-256 of the key — keys never need escaping for the filesystem.
//!
//! ## Failure behavior
//!
//! A durable file that is missing, unreadable, or unparsable is a plain
//! cache miss. Durable writes are best-effort: a read-only cache directory
//! degrades to memory-only caching with a warning, never a build failure.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum age of a cached response before it must be refetched.
const TTL_SECONDS: i64 = 30;

/// A cached API response with its capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Two-tier (memory + durable) TTL cache for content API responses.
pub struct FetchCache {
    memory: HashMap<String, CacheEntry>,
    durable_dir: Option<PathBuf>,
    ttl: Duration,
}

impl FetchCache {
    /// Cache with both tiers. Pass `None` for a memory-only cache.
    pub fn new(durable_dir: Option<PathBuf>) -> Self {
        Self::with_ttl(durable_dir, Duration::seconds(TTL_SECONDS))
    }

    /// Cache with an explicit TTL. Tests use short TTLs to exercise
    /// expiry without waiting out the production window.
    pub fn with_ttl(durable_dir: Option<PathBuf>, ttl: Duration) -> Self {
        Self {
            memory: HashMap::new(),
            durable_dir,
            ttl,
        }
    }

    /// Cache that never hits and never stores (`--no-cache`).
    pub fn disabled() -> Self {
        Self::with_ttl(None, Duration::zero())
    }

    /// Look up a fresh entry, checking memory first, then the durable
    /// tier. A durable hit is promoted into the memory tier.
    pub fn lookup(&mut self, key: &str) -> Option<serde_json::Value> {
        if let Some(entry) = self.memory.get(key)
            && self.is_fresh(entry)
        {
            return Some(entry.data.clone());
        }

        let entry = self.load_durable(key)?;
        if !self.is_fresh(&entry) {
            return None;
        }
        let data = entry.data.clone();
        self.memory.insert(key.to_string(), entry);
        Some(data)
    }

    /// Record a fetched payload in both tiers, stamped with the current
    /// time.
    pub fn store(&mut self, key: &str, data: serde_json::Value) {
        let entry = CacheEntry {
            timestamp: Utc::now(),
            data,
        };
        self.write_durable(key, &entry);
        self.memory.insert(key.to_string(), entry);
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        Utc::now() - entry.timestamp < self.ttl
    }

    /// Read a durable entry. Any failure — missing file, bad JSON — is a
    /// miss, never an error.
    fn load_durable(&self, key: &str) -> Option<CacheEntry> {
        let path = self.durable_path(key)?;
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_durable(&self, key: &str, entry: &CacheEntry) {
        let Some(path) = self.durable_path(key) else {
            return;
        };
        let json = match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("cache entry for '{key}' not serializable: {err}");
                return;
            }
        };
        if let Err(err) = ensure_dir_and_write(&path, &json) {
            log::warn!("failed to write cache entry {}: {err}", path.display());
        }
    }

    fn durable_path(&self, key: &str) -> Option<PathBuf> {
        let dir = self.durable_dir.as_ref()?;
        let digest = Sha256::digest(key.as_bytes());
        Some(dir.join(format!("{digest:x}.json")))
    }
}

fn ensure_dir_and_write(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
