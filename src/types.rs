//! Shared types used across the catalog core and both pipeline stages.
//!
//! These types are serialized into the scan manifest and read back by the
//! generate stage, so they must stay identical across modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directory listing: display name plus its social page link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub link: String,
}

/// A resolved position in the category hierarchy.
///
/// `cat3` is empty when the path points at a second-level category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub cat1: String,
    pub cat2: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cat3: String,
}

impl CategoryPath {
    pub fn new(cat1: impl Into<String>, cat2: impl Into<String>, cat3: impl Into<String>) -> Self {
        Self {
            cat1: cat1.into(),
            cat2: cat2.into(),
            cat3: cat3.into(),
        }
    }

    /// The deepest non-empty level: cat3 if present, otherwise cat2.
    pub fn title(&self) -> &str {
        if self.cat3.is_empty() {
            &self.cat2
        } else {
            &self.cat3
        }
    }

    /// Human-readable trail, e.g. `Shops > Food > Bakeries`.
    pub fn breadcrumb(&self) -> String {
        if self.cat3.is_empty() {
            format!("{} > {}", self.cat1, self.cat2)
        } else {
            format!("{} > {} > {}", self.cat1, self.cat2, self.cat3)
        }
    }

    pub fn slug(&self) -> String {
        crate::slug::encode(&self.cat1, &self.cat2, &self.cat3)
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.breadcrumb())
    }
}
