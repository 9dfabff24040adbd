//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Categories lead with
//! their positional index and title; listing counts and output paths are
//! secondary detail. The result reads as a directory inventory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 Commerces
//!     001 Alimentation (1 listing)
//!         001 Boulangeries (2 listings)
//!     002 Vêtements (1 listing)
//!
//! Catalog
//!     annuaire.csv (10 entries)
//!
//! Config
//!     config.toml
//!     intro.md
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Boulangeries (2 listings) → pages/commerces-alimentation-boulangeries.html
//!     unchanged
//! 002 Vêtements (1 listing) → pages/commerces-vetements.html
//!
//! Generated 2 category pages: 2 written, 1 unchanged, 0 removed
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::cache::PageStatus;
use crate::generate::GenerateReport;
use crate::menu;
use crate::scan::Manifest;
use crate::slug::SlugIndex;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Index + title, with the listing count when the node holds listings.
fn category_line(index: usize, title: &str, items: usize) -> String {
    if items == 0 {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} ({})", format_index(index), title, plural(items, "listing", "listings"))
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered category tree.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];

    if manifest.tree.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, top) in manifest.tree.categories.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), top.name));
        for (j, node) in top.subcategories.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                category_line(j + 1, &node.name, node.items.len())
            ));
            for (k, cat3) in node.subcategories.iter().enumerate() {
                lines.push(format!(
                    "{}{}",
                    indent(2),
                    category_line(k + 1, &cat3.name, cat3.items.len())
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Catalog".to_string());
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        manifest.catalog,
        plural(manifest.entry_count, "entry", "entries")
    ));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if manifest.intro.is_some() {
        lines.push(format!("{}{}", indent(1), manifest.config.intro));
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: one line per page with its output path,
/// then a summary.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut index = 0;

    for page in &report.pages {
        if page.status == PageStatus::Removed {
            lines.push(format!("Removed {}", page.rel_path));
            continue;
        }
        if page.rel_path == "index.html" {
            lines.push(format!("Home \u{2192} {}", page.rel_path));
        } else {
            index += 1;
            lines.push(format!(
                "{} \u{2192} {}",
                category_line(index, &page.title, page.item_count),
                page.rel_path
            ));
        }
        if page.status == PageStatus::Unchanged {
            lines.push(format!("{}{}", indent(1), page.status));
        }
    }

    lines.push(String::new());
    let category_pages = report
        .pages
        .iter()
        .filter(|p| p.status != PageStatus::Removed && p.rel_path != "index.html")
        .count();
    lines.push(format!(
        "Generated {}: {} written, {} unchanged, {} removed",
        plural(category_pages, "category page", "category pages"),
        report.count(PageStatus::Written),
        report.count(PageStatus::Unchanged),
        report.count(PageStatus::Removed),
    ));
    if report.assets_copied > 0 {
        lines.push(format!("Copied {}", plural(report.assets_copied, "asset", "assets")));
    }

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the `check` summary: catalog size, pages that would be generated,
/// and menu links whose slug decodes to a different category.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let menu = menu::build_menu(&manifest.tree, false);
    let slugs = SlugIndex::build(&manifest.tree);
    let shadowed = menu
        .links()
        .filter(|(item, link)| slugs.get(&link.slug) != Some(&item.path))
        .count();
    let targets = menu::page_targets(&manifest.tree);

    let mut lines = vec![
        "Config OK".to_string(),
        format!(
            "Catalog {}: {} in {}",
            manifest.catalog,
            plural(manifest.entry_count, "entry", "entries"),
            plural(
                manifest.tree.categories.len(),
                "top category",
                "top categories"
            )
        ),
        format!(
            "{} to generate",
            plural(targets.len(), "category page", "category pages")
        ),
    ];
    if shadowed > 0 {
        lines.push(format!(
            "Shown as another category (shared slug): {}",
            plural(shadowed, "menu link", "menu links")
        ));
    }
    lines
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
