//! Output page cache for incremental builds.
//!
//! Regenerating the site after a catalog edit should only touch the pages
//! that actually changed, so deploy tools that sync by mtime upload a handful
//! of files instead of the whole directory.
//!
//! # Design
//!
//! The cache maps each output page path (relative to the output directory)
//! to the SHA-256 of the HTML last written there. A page is rewritten only
//! when its freshly rendered HTML hashes differently or the file has gone
//! missing.
//!
//! Pages recorded by the previous build but not produced by this one belong
//! to categories that disappeared from the catalog. They are deleted so the
//! output never links to stale listings.
//!
//! ## Storage
//!
//! The cache manifest is a JSON file at `<output_dir>/.annuaire-cache.json`.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to `generate` or `build` to rewrite every page. The
//! stale-page sweep still uses the stored manifest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the cache manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = ".annuaire-cache.json";

/// Bump to invalidate all existing caches when the format changes.
const MANIFEST_VERSION: u32 = 1;

/// What happened to an output page during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Written,
    Unchanged,
    Removed,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageStatus::Written => "written",
            PageStatus::Unchanged => "unchanged",
            PageStatus::Removed => "removed",
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageCache {
    pub version: u32,
    /// Output path → content hash, sorted for stable diffs.
    pub pages: BTreeMap<String, String>,
}

impl PageCache {
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            pages: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty cache if the file
    /// doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(cache) if cache.version == MANIFEST_VERSION => cache,
            _ => Self::empty(),
        }
    }

    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// True if `rel_path` was last written with exactly this content and is
    /// still on disk.
    pub fn is_fresh(&self, rel_path: &str, content_hash: &str, output_dir: &Path) -> bool {
        self.pages.get(rel_path).is_some_and(|h| h == content_hash)
            && output_dir.join(rel_path).exists()
    }

    pub fn insert(&mut self, rel_path: String, content_hash: String) {
        self.pages.insert(rel_path, content_hash);
    }

    /// Paths recorded here that are absent from `current`.
    pub fn stale_paths<'a>(&'a self, current: &'a PageCache) -> impl Iterator<Item = &'a str> {
        self.pages
            .keys()
            .filter(|path| !current.pages.contains_key(*path))
            .map(String::as_str)
    }
}

/// SHA-256 of text, returned as a hex string.
pub fn hash_text(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Write `content` to `rel_path` unless the previous build already did.
pub fn write_page(
    previous: &PageCache,
    current: &mut PageCache,
    output_dir: &Path,
    rel_path: &str,
    content: &str,
    use_cache: bool,
) -> io::Result<PageStatus> {
    let hash = hash_text(content);
    let status = if use_cache && previous.is_fresh(rel_path, &hash, output_dir) {
        PageStatus::Unchanged
    } else {
        let path = output_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        PageStatus::Written
    };
    current.insert(rel_path.to_string(), hash);
    Ok(status)
}
