//! Shared test utilities for the annuaire test suite.
//!
//! Provides fixture setup, terse constructors for catalog rows, and lookup
//! helpers over the category tree and menu.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = build_tree(&[
//!     entry("Shops", "Food", "", "Market", "https://fb.me/m"),
//!     entry("Shops", "Wear", "Shoes", "Tama", "https://fb.me/t"),
//! ]);
//! assert_eq!(tree_shape(&tree), vec![
//!     ("Shops".to_string(), vec!["Food".to_string(), "Wear".to_string()]),
//! ]);
//!
//! let menu = build_menu(&tree, false);
//! let wear = find_section(&menu, "Shops", "Wear");
//! assert!(wear.heading.link.is_none());
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::Entry;
use crate::menu::{Menu, MenuSection};
use crate::tree::CategoryTree;
use crate::types::Listing;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Constructors
// =========================================================================

/// A parsed catalog row. Empty strings stand for absent levels.
pub fn entry(cat1: &str, cat2: &str, cat3: &str, name: &str, link: &str) -> Entry {
    Entry {
        category1: cat1.to_string(),
        category2: cat2.to_string(),
        category3: cat3.to_string(),
        name: name.to_string(),
        link: link.to_string(),
    }
}

pub fn listing(name: &str, link: &str) -> Listing {
    Listing {
        name: name.to_string(),
        link: link.to_string(),
    }
}

// =========================================================================
// Tree and menu lookups — panics with a clear message on miss
// =========================================================================

/// Top category names in order.
pub fn category_names(tree: &CategoryTree) -> Vec<&str> {
    tree.categories.iter().map(|c| c.name.as_str()).collect()
}

/// Top categories with their second-level names, in order.
pub fn tree_shape(tree: &CategoryTree) -> Vec<(String, Vec<String>)> {
    tree.categories
        .iter()
        .map(|top| {
            (
                top.name.clone(),
                top.subcategories.iter().map(|n| n.name.clone()).collect(),
            )
        })
        .collect()
}

/// Find the menu section for `cat1 > cat2`. Panics if not found.
pub fn find_section<'a>(menu: &'a Menu, cat1: &str, cat2: &str) -> &'a MenuSection {
    let block = menu
        .blocks
        .iter()
        .find(|b| b.title == cat1)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = menu.blocks.iter().map(|b| b.title.as_str()).collect();
            panic!("menu block '{cat1}' not found. Available: {titles:?}")
        });
    block
        .sections
        .iter()
        .find(|s| s.heading.title == cat2)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = block
                .sections
                .iter()
                .map(|s| s.heading.title.as_str())
                .collect();
            panic!("section '{cat2}' not found in '{cat1}'. Available: {titles:?}")
        })
}
