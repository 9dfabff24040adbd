//! Navigation menu model.
//!
//! The menu mirrors the category tree: one block per top category, one
//! section per second-level category. Which entries are clickable follows
//! from what a visitor would find behind the link:
//!
//! | Node | Rendered as |
//! |------|-------------|
//! | second level, no children, ≥1 listing | heading linking to its own page |
//! | second level, otherwise | plain heading |
//! | third level, ≥1 listing | link to its page |
//! | third level, no listing | inert text (visible, not a link) |
//!
//! Counts are optional annotations on links. Markup is produced separately by
//! [`crate::generate::render_menu`]; this module only decides structure.

use crate::tree::CategoryTree;
use crate::types::CategoryPath;
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub blocks: Vec<MenuBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBlock {
    pub title: String,
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub heading: MenuItem,
    pub children: Vec<MenuItem>,
}

/// A menu label, clickable when `link` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub path: CategoryPath,
    pub link: Option<MenuLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub slug: String,
    pub count: Option<usize>,
}

/// A category page the generator should write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    pub path: CategoryPath,
    pub slug: String,
}

impl MenuItem {
    fn new(path: CategoryPath, item_count: usize, show_counts: bool) -> Self {
        let link = (item_count > 0).then(|| MenuLink {
            slug: path.slug(),
            count: show_counts.then_some(item_count),
        });
        Self {
            title: path.title().to_string(),
            path,
            link,
        }
    }

    fn plain(path: CategoryPath) -> Self {
        Self {
            title: path.title().to_string(),
            path,
            link: None,
        }
    }
}

impl Menu {
    /// All links in menu order: each section heading, then its children.
    pub fn links(&self) -> impl Iterator<Item = (&MenuItem, &MenuLink)> {
        self.blocks
            .iter()
            .flat_map(|block| &block.sections)
            .flat_map(|section| std::iter::once(&section.heading).chain(&section.children))
            .filter_map(|item| item.link.as_ref().map(|link| (item, link)))
    }
}

pub fn build_menu(tree: &CategoryTree, show_counts: bool) -> Menu {
    let blocks = tree
        .categories
        .iter()
        .map(|top| MenuBlock {
            title: top.name.clone(),
            sections: top
                .subcategories
                .iter()
                .map(|node| {
                    let path = CategoryPath::new(&top.name, &node.name, "");
                    if node.has_subcategories() {
                        MenuSection {
                            heading: MenuItem::plain(path),
                            children: node
                                .subcategories
                                .iter()
                                .map(|cat3| {
                                    MenuItem::new(
                                        CategoryPath::new(&top.name, &node.name, &cat3.name),
                                        cat3.items.len(),
                                        show_counts,
                                    )
                                })
                                .collect(),
                        }
                    } else {
                        MenuSection {
                            heading: MenuItem::new(path, node.items.len(), show_counts),
                            children: Vec::new(),
                        }
                    }
                })
                .collect(),
        })
        .collect();
    Menu { blocks }
}

/// Every clickable menu destination, in menu order.
///
/// Paths whose slugs collide are reachable only through the first one, so
/// later duplicates are dropped with a warning.
pub fn page_targets(tree: &CategoryTree) -> Vec<PageTarget> {
    let menu = build_menu(tree, false);
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for (item, link) in menu.links() {
        if !seen.insert(link.slug.clone()) {
            warn!(
                slug = %link.slug,
                category = %item.path,
                "slug already used by an earlier category; page skipped"
            );
            continue;
        }
        targets.push(PageTarget {
            path: item.path.clone(),
            slug: link.slug.clone(),
        });
    }
    targets
}
