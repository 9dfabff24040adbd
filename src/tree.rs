//! Category tree construction and lookup.
//!
//! The flat entry list is folded into a three-level hierarchy:
//!
//! ```text
//! Commerces                      ← top category (cat1)
//! ├── Alimentation               ← Cat2Node
//! │   ├── items: [Le Marché]     ← entries with no cat3
//! │   └── Boulangeries           ← subcategory (cat3)
//! │       └── [Chez Tama]
//! └── Vêtements
//!     └── items: [...]
//! ```
//!
//! Every level keeps first-seen order, which drives menu and listing order.
//! Nodes are plain vectors rather than maps: directories hold tens of
//! categories, and a vector keeps insertion order and serializes as-is into
//! the scan manifest.
//!
//! An entry with no second category still creates its top category but is
//! otherwise dropped: only entries with at least two levels are listed.

use crate::catalog::Entry;
use crate::types::{CategoryPath, Listing};
use serde::{Deserialize, Serialize};

/// Ordered three-level category hierarchy. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub categories: Vec<TopCategory>,
}

/// A first-level category and its second-level children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategory {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Cat2Node>,
}

/// A second-level category.
///
/// `items` holds entries filed directly under it; `subcategories` holds its
/// third-level children. An entry lands in exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat2Node {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Listing>,
    #[serde(default)]
    pub subcategories: Vec<Cat3Node>,
}

/// A third-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat3Node {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Listing>,
}

/// Resolved category page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    pub path: CategoryPath,
    pub title: String,
    pub breadcrumb: String,
    pub items: Vec<Listing>,
}

/// Fold entries into a tree, preserving first-seen order at every level.
pub fn build_tree(entries: &[Entry]) -> CategoryTree {
    let mut tree = CategoryTree::default();
    for entry in entries {
        let top = tree.top_mut_or_insert(&entry.category1);
        if entry.category2.is_empty() {
            continue;
        }
        let node = top.cat2_mut_or_insert(&entry.category2);
        if entry.category3.is_empty() {
            node.items.push(entry.listing());
        } else {
            node.cat3_mut_or_insert(&entry.category3)
                .items
                .push(entry.listing());
        }
    }
    tree
}

impl CategoryTree {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn top(&self, cat1: &str) -> Option<&TopCategory> {
        self.categories.iter().find(|c| c.name == cat1)
    }

    pub fn node(&self, cat1: &str, cat2: &str) -> Option<&Cat2Node> {
        self.top(cat1)?.subcategory(cat2)
    }

    /// Iterate every `(cat1, node)` pair in tree order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Cat2Node)> {
        self.categories.iter().flat_map(|top| {
            top.subcategories
                .iter()
                .map(move |node| (top.name.as_str(), node))
        })
    }

    /// Total number of listings across all levels.
    pub fn listing_count(&self) -> usize {
        self.nodes().map(|(_, node)| node.total_items()).sum()
    }

    /// Title, breadcrumb and listings for a category path.
    ///
    /// Returns `None` when the top or second-level category is unknown. An
    /// unknown third level resolves to an empty listing.
    pub fn lookup(&self, path: &CategoryPath) -> Option<CategoryListing> {
        let node = self.node(&path.cat1, &path.cat2)?;
        let items = if path.cat3.is_empty() {
            node.items.clone()
        } else {
            node.subcategory(&path.cat3)
                .map(|cat3| cat3.items.clone())
                .unwrap_or_default()
        };
        Some(CategoryListing {
            path: path.clone(),
            title: path.title().to_string(),
            breadcrumb: path.breadcrumb(),
            items,
        })
    }

    fn top_mut_or_insert(&mut self, cat1: &str) -> &mut TopCategory {
        let idx = match self.categories.iter().position(|c| c.name == cat1) {
            Some(idx) => idx,
            None => {
                self.categories.push(TopCategory {
                    name: cat1.to_string(),
                    subcategories: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[idx]
    }
}

impl TopCategory {
    pub fn subcategory(&self, cat2: &str) -> Option<&Cat2Node> {
        self.subcategories.iter().find(|n| n.name == cat2)
    }

    fn cat2_mut_or_insert(&mut self, cat2: &str) -> &mut Cat2Node {
        let idx = match self.subcategories.iter().position(|n| n.name == cat2) {
            Some(idx) => idx,
            None => {
                self.subcategories.push(Cat2Node::new(cat2));
                self.subcategories.len() - 1
            }
        };
        &mut self.subcategories[idx]
    }
}

impl Cat2Node {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    pub fn subcategory(&self, cat3: &str) -> Option<&Cat3Node> {
        self.subcategories.iter().find(|n| n.name == cat3)
    }

    pub fn has_subcategories(&self) -> bool {
        !self.subcategories.is_empty()
    }

    /// Direct items plus everything under third-level children.
    pub fn total_items(&self) -> usize {
        self.items.len()
            + self
                .subcategories
                .iter()
                .map(|c| c.items.len())
                .sum::<usize>()
    }

    fn cat3_mut_or_insert(&mut self, cat3: &str) -> &mut Cat3Node {
        let idx = match self.subcategories.iter().position(|n| n.name == cat3) {
            Some(idx) => idx,
            None => {
                self.subcategories.push(Cat3Node {
                    name: cat3.to_string(),
                    items: Vec::new(),
                });
                self.subcategories.len() - 1
            }
        };
        &mut self.subcategories[idx]
    }
}
