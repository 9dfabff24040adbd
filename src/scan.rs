//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory and produces a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                 # Content root
//! ├── config.toml          # Site configuration (optional)
//! ├── annuaire.csv         # Catalog (name set by `catalog`)
//! ├── intro.md             # Home page introduction (optional)
//! └── assets/              # Copied to the output root (optional)
//! ```
//!
//! ## Output
//!
//! The manifest carries the category tree, the entry count, a SHA-256 of the
//! catalog text and the resolved configuration. `build` compares the hash and
//! config with the previous manifest to skip rescanning an unchanged catalog.
//!
//! A catalog that cannot be read scans as empty (see
//! [`crate::directory::Directory`]); only config and intro errors fail the
//! stage.

use crate::cache;
use crate::config::{self, SiteConfig};
use crate::directory::Directory;
use crate::tree::CategoryTree;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Catalog file name, relative to the content directory.
    pub catalog: String,
    /// SHA-256 of the decoded catalog text.
    pub catalog_hash: String,
    /// Entries that survived row filtering.
    pub entry_count: usize,
    pub tree: CategoryTree,
    /// Raw markdown of the home page introduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let directory = Directory::from_path(root.join(&config.catalog));
    let intro = read_intro(root, &config.intro)?;

    Ok(Manifest {
        catalog: config.catalog.clone(),
        catalog_hash: cache::hash_text(directory.catalog_text()),
        entry_count: directory.entries().len(),
        tree: directory.tree().clone(),
        intro,
        config,
    })
}

fn read_intro(root: &Path, name: &str) -> Result<Option<String>, ScanError> {
    if name.is_empty() {
        return Ok(None);
    }
    let path = root.join(name);
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(path)?;
    Ok(Some(body).filter(|b| !b.trim().is_empty()))
}

impl Manifest {
    /// True when `other` was scanned from the same catalog text and config.
    pub fn is_current(&self, other: &Manifest) -> bool {
        self.catalog_hash == other.catalog_hash
            && self.config == other.config
            && self.intro == other.intro
    }
}
