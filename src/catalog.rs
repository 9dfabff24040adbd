//! Catalog parsing.
//!
//! The catalog is a semicolon-delimited text file. The first line is a header
//! and is always discarded; every other line describes one listing:
//!
//! ```text
//! Categorie1;Categorie2;Categorie3;Nom;Lien
//! Commerces;Alimentation;Boulangeries;Chez Tama;chez.tama
//! Commerces;Alimentation;;Le Marché;facebook.com/lemarche
//! Services;Santé;;Pharmacie;https://fb.me/pharma
//! ```
//!
//! ## Row Rules
//!
//! - Blank lines are skipped.
//! - Lines with fewer than five fields are skipped; extra fields are ignored.
//! - Every field is trimmed. A row with an empty first category, name or link
//!   is skipped.
//! - There is no quoting: a `;` inside a field is not representable.
//!
//! Skipped rows are dropped silently. They are neither logged nor counted.
//!
//! ## Links
//!
//! Links are normalized to absolute URLs by [`normalize_link`]: bare page
//! handles become `https://www.facebook.com/<handle>`.

use crate::types::Listing;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const DELIMITER: char = ';';
const FIELD_COUNT: usize = 5;
const FACEBOOK_BASE: &str = "https://www.facebook.com/";
const HOST_PREFIXES: &[&str] = &["facebook.com", "www.facebook.com", "fb.me"];

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub category1: String,
    pub category2: String,
    pub category3: String,
    pub name: String,
    pub link: String,
}

impl Entry {
    pub fn listing(&self) -> Listing {
        Listing {
            name: self.name.clone(),
            link: self.link.clone(),
        }
    }
}

/// Parse catalog text into entries, in file order.
pub fn parse_catalog(text: &str) -> Vec<Entry> {
    text.split('\n').skip(1).filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<Entry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let [cat1, cat2, cat3, name, link] = [0, 1, 2, 3, 4].map(|i| fields[i].trim());
    if cat1.is_empty() || name.is_empty() || link.is_empty() {
        return None;
    }

    Some(Entry {
        category1: cat1.to_string(),
        category2: cat2.to_string(),
        category3: cat3.to_string(),
        name: name.to_string(),
        link: normalize_link(link),
    })
}

/// Turn a catalog link into an absolute URL.
///
/// - `""` → `""`
/// - `"https://fb.me/x"` → unchanged (anything starting with `http`)
/// - `"facebook.com/page"` → `"https://facebook.com/page"`
/// - `"page"` → `"https://www.facebook.com/page"`
pub fn normalize_link(link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }
    if link.starts_with("http") {
        return link.to_string();
    }
    if HOST_PREFIXES.iter().any(|prefix| link.starts_with(prefix)) {
        format!("https://{link}")
    } else {
        format!("{FACEBOOK_BASE}{link}")
    }
}

/// Decode raw catalog bytes.
///
/// UTF-8 is tried first (a leading byte-order mark is dropped). Spreadsheet
/// exports are often Latin-1, so invalid UTF-8 falls back to a byte-per-char
/// Latin-1 decode, which never fails.
pub fn decode_catalog(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Read and decode a catalog file.
pub fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode_catalog(&bytes))
}
