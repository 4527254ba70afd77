//! File emission.
//!
//! Maps routes to output paths and writes composed documents. The mapping
//! is directory-style for extensionless URLs: every route gets its own
//! `index.html`, so a plain file server resolves `/blog/hello-world` to
//! `blog/hello-world/index.html` with no rewrite rules.
//!
//! `path_for` is pure and injective over distinct routes — repeated runs
//! produce byte-identical paths, and no two routes can collide on a write
//! destination. Writes are whole-file: a failure mid-build leaves either
//! the previous file or a fresh complete one, never a truncated hybrid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Output path for a route. `/` maps to `index.html` at the output root;
/// `/a/b` maps to `a/b/index.html`.
pub fn path_for(output_dir: &Path, route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

/// Write a composed document, creating intermediate directories as needed
/// and overwriting any previous file. Safe to call when the directories
/// already exist.
pub fn write_page(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
