//! Category page resolution.
//!
//! A category page is addressed by a slug carried in the `cat` query
//! parameter (`category.html?cat=commerces-alimentation`). Resolution always
//! produces a displayable [`PageState`]; lookup failures become placeholder
//! states rather than errors.

use crate::directory::Directory;
use crate::tree::{CategoryListing, CategoryTree};
use crate::types::CategoryPath;

/// Query parameter carrying the category slug.
pub const CATEGORY_PARAM: &str = "cat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No slug was given.
    NoCategory,
    /// The slug matches no category in the tree.
    NotFound { slug: String },
    /// The category exists but has no listings.
    Empty { title: String, breadcrumb: String },
    Listing(CategoryListing),
}

/// Extract the category slug from a query string.
///
/// The leading `?` is optional and values are percent-decoded. The first
/// `cat` parameter wins.
pub fn category_param(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| urlencoding::decode(key).is_ok_and(|k| k == CATEGORY_PARAM))
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

/// Resolve an optional slug against the directory.
pub fn resolve_page(directory: &Directory, slug: Option<&str>) -> PageState {
    let Some(slug) = slug.filter(|s| !s.is_empty()) else {
        return PageState::NoCategory;
    };
    let Some(path) = directory.resolve(slug) else {
        return PageState::NotFound {
            slug: slug.to_string(),
        };
    };
    path_state(directory.tree(), path)
}

/// Page state for a category path already resolved from a slug.
pub fn path_state(tree: &CategoryTree, path: &CategoryPath) -> PageState {
    match tree.lookup(path) {
        Some(listing) if !listing.items.is_empty() => PageState::Listing(listing),
        Some(listing) => PageState::Empty {
            title: listing.title,
            breadcrumb: listing.breadcrumb,
        },
        None => PageState::Empty {
            title: path.title().to_string(),
            breadcrumb: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
header
Commerces;Alimentation;;Le Marché;lemarche
Commerces;Alimentation;Boulangeries;Chez Tama;chez.tama
";

    #[test]
    fn param_extracted_and_decoded() {
        assert_eq!(category_param("?cat=a-b"), Some("a-b".into()));
        assert_eq!(category_param("cat=a-b"), Some("a-b".into()));
        assert_eq!(category_param("x=1&cat=a%2Db&cat=z"), Some("a-b".into()));
        assert_eq!(category_param("?cat="), Some(String::new()));
        assert_eq!(category_param("?cat"), Some(String::new()));
    }

    #[test]
    fn param_missing() {
        assert_eq!(category_param(""), None);
        assert_eq!(category_param("?category=a"), None);
    }

    #[test]
    fn missing_slug_is_no_category() {
        let dir = Directory::from_text(CATALOG);
        assert_eq!(resolve_page(&dir, None), PageState::NoCategory);
        assert_eq!(resolve_page(&dir, Some("")), PageState::NoCategory);
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let dir = Directory::from_text(CATALOG);
        assert_eq!(
            resolve_page(&dir, Some("nope")),
            PageState::NotFound {
                slug: "nope".into()
            }
        );
    }

    #[test]
    fn populated_category_is_listing() {
        let dir = Directory::from_text(CATALOG);
        match resolve_page(&dir, Some("commerces-alimentation-boulangeries")) {
            PageState::Listing(listing) => {
                assert_eq!(listing.title, "Boulangeries");
                assert_eq!(listing.items.len(), 1);
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn category_without_direct_items_is_empty() {
        // "Alimentation" only has a third-level child here.
        let dir = Directory::from_text("header\nCommerces;Alimentation;Pain;Tama;t\n");
        assert_eq!(
            resolve_page(&dir, Some("commerces-alimentation")),
            PageState::Empty {
                title: "Alimentation".into(),
                breadcrumb: "Commerces > Alimentation".into(),
            }
        );
    }
}
