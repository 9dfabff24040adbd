//! Category slugs.
//!
//! A slug is the URL-safe identifier of a category page, derived from its
//! path:
//!
//! ```text
//! ("Commerces", "Alimentation", "Boulangeries") → commerces-alimentation-boulangeries
//! ("Café", "Bar", "")                           → cafe-bar
//! ("Shops", "Food & Drinks", "")                → shops-food-drinks
//! ```
//!
//! Encoding is lossy: accents are folded and punctuation collapses, so two
//! paths can share a slug. Decoding searches the tree in order and the first
//! matching path wins.

use crate::tree::CategoryTree;
use crate::types::CategoryPath;
use std::collections::HashMap;

/// Derive the slug for a category path. Empty parts are skipped.
pub fn encode(cat1: &str, cat2: &str, cat3: &str) -> String {
    let joined = [cat1, cat2, cat3]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    let mut slug = String::with_capacity(joined.len());
    for c in joined.chars().map(fold_accent) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Fold accented lowercase Latin vowels and cedilla-c to their base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// Find the category path whose slug equals `slug`.
///
/// For each second-level category in tree order, its third-level children are
/// tried before the category itself. Linear in the number of categories.
pub fn decode(slug: &str, tree: &CategoryTree) -> Option<CategoryPath> {
    candidates(tree).find(|(candidate, _)| candidate == slug).map(|(_, path)| path)
}

/// Every `(slug, path)` pair in the order [`decode`] tries them.
fn candidates(tree: &CategoryTree) -> impl Iterator<Item = (String, CategoryPath)> + '_ {
    tree.nodes().flat_map(|(cat1, node)| {
        node.subcategories
            .iter()
            .map(move |cat3| CategoryPath::new(cat1, &node.name, &cat3.name))
            .chain(std::iter::once(CategoryPath::new(cat1, &node.name, "")))
            .map(|path| (path.slug(), path))
    })
}

/// Precomputed slug → path map with the same first-match semantics as
/// [`decode`]. Must be rebuilt whenever the tree is.
#[derive(Debug, Clone, Default)]
pub struct SlugIndex {
    paths: HashMap<String, CategoryPath>,
}

impl SlugIndex {
    pub fn build(tree: &CategoryTree) -> Self {
        let mut paths = HashMap::new();
        for (slug, path) in candidates(tree) {
            paths.entry(slug).or_insert(path);
        }
        Self { paths }
    }

    pub fn get(&self, slug: &str) -> Option<&CategoryPath> {
        self.paths.get(slug)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
