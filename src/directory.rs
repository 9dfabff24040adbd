//! Lazily-loaded directory data.
//!
//! [`Directory`] owns the catalog source and every value derived from it:
//!
//! ```text
//! source ──read──▶ text ──parse──▶ entries ──fold──▶ tree ──▶ slug index
//! ```
//!
//! Each stage is computed on first access and memoized in a `OnceLock`, so
//! the catalog is read and parsed at most once no matter how many pages ask
//! for it. Nothing is mutated after construction; [`Directory::reload`] drops
//! every memoized value so the next access starts over from the source.
//!
//! A catalog that cannot be read is treated as empty. The failure is logged
//! and never surfaced as an error.

use crate::catalog::{self, Entry};
use crate::slug::SlugIndex;
use crate::tree::{self, CategoryListing, CategoryTree};
use crate::types::CategoryPath;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Text(String),
}

#[derive(Debug)]
pub struct Directory {
    source: Source,
    text: OnceLock<String>,
    entries: OnceLock<Vec<Entry>>,
    tree: OnceLock<CategoryTree>,
    index: OnceLock<SlugIndex>,
}

impl Directory {
    /// A directory backed by a catalog file, read on first access.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Source::File(path.into()))
    }

    /// A directory backed by in-memory catalog text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Source::Text(text.into()))
    }

    fn new(source: Source) -> Self {
        Self {
            source,
            text: OnceLock::new(),
            entries: OnceLock::new(),
            tree: OnceLock::new(),
            index: OnceLock::new(),
        }
    }

    /// The catalog file, if this directory is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Text(_) => None,
        }
    }

    /// Decoded catalog text. Empty if the file could not be read.
    pub fn catalog_text(&self) -> &str {
        self.text.get_or_init(|| match &self.source {
            Source::File(path) => match catalog::read_catalog(path) {
                Ok(text) => text,
                Err(err) => {
                    warn!("{err}; continuing with an empty catalog");
                    String::new()
                }
            },
            Source::Text(text) => text.clone(),
        })
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.get_or_init(|| {
            let entries = catalog::parse_catalog(self.catalog_text());
            debug!(count = entries.len(), "parsed catalog entries");
            entries
        })
    }

    pub fn tree(&self) -> &CategoryTree {
        self.tree.get_or_init(|| tree::build_tree(self.entries()))
    }

    pub fn slug_index(&self) -> &SlugIndex {
        self.index.get_or_init(|| {
            let index = SlugIndex::build(self.tree());
            debug!(slugs = index.len(), "built slug index");
            index
        })
    }

    /// Resolve a slug to its category path.
    pub fn resolve(&self, slug: &str) -> Option<&CategoryPath> {
        self.slug_index().get(slug)
    }

    /// Resolve a slug straight to its listing.
    pub fn listing(&self, slug: &str) -> Option<CategoryListing> {
        let path = self.resolve(slug)?;
        self.tree().lookup(path)
    }

    /// Discard every memoized value; the next access re-reads the source.
    pub fn reload(&mut self) {
        self.text = OnceLock::new();
        self.entries = OnceLock::new();
        self.tree = OnceLock::new();
        self.index = OnceLock::new();
    }
}
