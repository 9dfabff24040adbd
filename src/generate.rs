//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Home page** (`/index.html`): site title, optional introduction and
//!   the full category menu
//! - **Category pages** (`/pages/{slug}.html`): one embed card per listing,
//!   for every clickable menu destination
//!
//! Every page carries the same side menu, opened and closed with a CSS-only
//! checkbox toggle.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── .annuaire-cache.json
//! ├── favicon.svg                          # from content/assets/
//! └── pages/
//!     ├── commerces-vetements.html
//!     └── commerces-alimentation-boulangeries.html
//! ```
//!
//! ## Page Links
//!
//! Generated pages link to each other as static files. The `render` command
//! instead produces the page a server would return for
//! `category.html?cat={slug}`, so its links use the query form
//! (see [`LinkStyle`]).
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Catalog text is escaped automatically.

use crate::cache::{self, PageCache, PageStatus};
use crate::config::{self, EmbedConfig, SiteConfig};
use crate::menu::{self, Menu, MenuItem};
use crate::page::{self, CATEGORY_PARAM, PageState};
use crate::scan::Manifest;
use crate::slug::SlugIndex;
use crate::types::Listing;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot copy assets: {0}")]
    Assets(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Asks the embed SDK to parse cards inserted after it loaded.
const EMBED_RESCAN_JS: &str = "if (window.FB && window.FB.XFBML) { window.FB.XFBML.parse(); }";

const PAGES_DIR: &str = "pages";
const QUERY_PAGE: &str = "category.html";

/// How pages link to category pages and back home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle<'a> {
    /// Static files under `pages/`; `base` is the path back to the site root
    /// (`""` from the root, `"../"` from inside `pages/`).
    Pages { base: &'a str },
    /// A single `category.html?cat={slug}` page at the site root.
    Query,
}

impl LinkStyle<'_> {
    pub fn category_href(&self, slug: &str) -> String {
        match self {
            LinkStyle::Pages { base } => format!("{base}{PAGES_DIR}/{slug}.html"),
            LinkStyle::Query => {
                format!("{QUERY_PAGE}?{CATEGORY_PARAM}={}", urlencoding::encode(slug))
            }
        }
    }

    pub fn home_href(&self) -> String {
        match self {
            LinkStyle::Pages { base } => format!("{base}index.html"),
            LinkStyle::Query => "index.html".to_string(),
        }
    }
}

/// One written (or skipped, or removed) output page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    pub rel_path: String,
    pub item_count: usize,
    pub status: PageStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Home page first, then category pages in menu order, then removals.
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
}

impl GenerateReport {
    pub fn count(&self, status: PageStatus) -> usize {
        self.pages.iter().filter(|p| p.status == status).count()
    }
}

/// Page path relative to the output directory.
pub fn category_page_path(slug: &str) -> String {
    format!("{PAGES_DIR}/{slug}.html")
}

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_from_manifest(&manifest, source_dir, output_dir, use_cache)
}

pub fn generate_from_manifest(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let css = site_css(config);
    let menu = menu::build_menu(&manifest.tree, config.menu.show_counts);

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(&source_dir.join(&config.assets_dir), output_dir)?;

    let previous = PageCache::load(output_dir);
    let mut current = PageCache::empty();
    let mut pages = Vec::new();

    let index_html = render_index(manifest, &menu, &css).into_string();
    let status = cache::write_page(
        &previous,
        &mut current,
        output_dir,
        "index.html",
        &index_html,
        use_cache,
    )?;
    pages.push(GeneratedPage {
        title: config.site_title.clone(),
        rel_path: "index.html".to_string(),
        item_count: manifest.tree.listing_count(),
        status,
    });

    // A page shows whatever its slug decodes to, same as `render`.
    let slugs = SlugIndex::build(&manifest.tree);
    let links = LinkStyle::Pages { base: "../" };
    for target in menu::page_targets(&manifest.tree) {
        let path = slugs.get(&target.slug).unwrap_or(&target.path);
        if path != &target.path {
            warn!(
                slug = %target.slug,
                category = %target.path,
                shown = %path,
                "slug decodes to an earlier category; page shows that category"
            );
        }
        let state = page::path_state(&manifest.tree, path);
        let (title, item_count) = match &state {
            PageState::Listing(listing) => (listing.title.clone(), listing.items.len()),
            _ => (path.title().to_string(), 0),
        };
        let current_slug = Some(target.slug.as_str());
        let html =
            render_category_page(&state, &menu, config, &css, links, current_slug).into_string();
        let rel_path = category_page_path(&target.slug);
        let status =
            cache::write_page(&previous, &mut current, output_dir, &rel_path, &html, use_cache)?;
        pages.push(GeneratedPage {
            title,
            rel_path,
            item_count,
            status,
        });
    }

    for stale in previous.stale_paths(&current) {
        if !is_generated_page(stale) {
            warn!(page = stale, "ignoring cache entry outside the generated pages");
            continue;
        }
        let path = output_dir.join(stale);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        debug!(page = stale, "removed page no longer in catalog");
        pages.push(GeneratedPage {
            title: stale.to_string(),
            rel_path: stale.to_string(),
            item_count: 0,
            status: PageStatus::Removed,
        });
    }

    current.save(output_dir)?;

    Ok(GenerateReport {
        pages,
        assets_copied,
    })
}

/// True for paths this stage writes: `index.html` and files under `pages/`,
/// relative and without `..`.
fn is_generated_page(rel_path: &str) -> bool {
    let path = Path::new(rel_path);
    path.components().all(|c| matches!(c, Component::Normal(_)))
        && (path == Path::new("index.html") || path.starts_with(PAGES_DIR))
}

/// Output paths owned by the generator that assets must not overwrite.
fn is_reserved_output(rel: &Path) -> bool {
    rel == Path::new("index.html")
        || rel == Path::new(cache::MANIFEST_FILENAME)
        || rel.starts_with(PAGES_DIR)
}

/// Copy the assets directory into the output root. Missing is fine.
///
/// Assets that would land on a generated page or the page cache are skipped.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        if is_reserved_output(rel) {
            if entry.file_type().is_file() {
                warn!(asset = %rel.display(), "asset clashes with generated output; skipped");
            }
            continue;
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Color variables followed by the static stylesheet.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    config: &SiteConfig,
    title: &str,
    css: &str,
    head: Markup,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
                (head)
            }
            body {
                (content)
                footer.footer {
                    p { (config.footer) }
                }
            }
        }
    }
}

/// Renders the slide-in side menu with its open/close controls
fn side_menu(menu: &Menu, title: &str, links: LinkStyle, current: Option<&str>) -> Markup {
    html! {
        input.menu-toggle type="checkbox" id="menu-toggle";
        label.menu-btn for="menu-toggle" { "☰ Menu" }
        nav.side-menu {
            div.menu-header {
                h2 { (title) }
                label.close-btn for="menu-toggle" { "×" }
            }
            div.menu-content {
                (render_menu(menu, links, current))
            }
        }
        label.menu-overlay for="menu-toggle" {}
    }
}

/// Renders the category menu: one block per top category.
pub fn render_menu(menu: &Menu, links: LinkStyle, current: Option<&str>) -> Markup {
    html! {
        @for block in &menu.blocks {
            div.menu-category {
                div.menu-category-title { (block.title) }
                @for section in &block.sections {
                    div.menu-subcategory {
                        @if section.heading.link.is_some() {
                            (menu_link(&section.heading, "menu-subcategory-title", links, current))
                        } @else {
                            div.menu-subcategory-title { (section.heading.title) }
                        }
                        @for child in &section.children {
                            div.menu-subsubcategory {
                                @if child.link.is_some() {
                                    (menu_link(child, "menu-subsubcategory-link", links, current))
                                } @else {
                                    span.menu-subsubcategory-inert { (child.title) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn menu_link(item: &MenuItem, class: &str, links: LinkStyle, current: Option<&str>) -> Markup {
    let Some(link) = &item.link else {
        return html! { (item.title) };
    };
    let class = if current == Some(link.slug.as_str()) {
        format!("{class} current")
    } else {
        class.to_string()
    };
    html! {
        a class=(class) href=(links.category_href(&link.slug)) {
            (item.title)
            @if let Some(count) = link.count {
                " "
                span.menu-count { "(" (count) ")" }
            }
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Renders one listing as an embeddable page card
fn embed_card(listing: &Listing, embed: &EmbedConfig) -> Markup {
    html! {
        div.fb-card {
            div.fb-feed {
                div.fb-page
                    data-href=(listing.link)
                    data-tabs=(embed.tabs)
                    data-small-header=(flag(embed.small_header))
                    data-hide-cover=(flag(embed.hide_cover))
                    data-show-facepile=(flag(embed.show_facepile))
                    data-adapt-container-width=(flag(embed.adapt_container_width))
                    data-height=(embed.height)
                {
                    blockquote.fb-xfbml-parse-ignore cite=(listing.link) {
                        a href=(listing.link) { (listing.name) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with introduction and inline menu
fn render_index(manifest: &Manifest, menu: &Menu, css: &str) -> Markup {
    let config = &manifest.config;
    let links = LinkStyle::Pages { base: "" };

    let intro_html = manifest.intro.as_deref().map(|body| {
        let mut out = String::new();
        md_html::push_html(&mut out, Parser::new(body));
        out
    });

    let content = html! {
        (side_menu(menu, &config.menu.title, links, None))
        div.container {
            header.home-header {
                h1 { (config.site_title) }
            }
            @if let Some(intro) = intro_html {
                article.intro { (PreEscaped(intro)) }
            }
            section.home-menu {
                (render_menu(menu, links, None))
            }
        }
    };

    base_document(config, &config.site_title, css, html! {}, content)
}

/// Renders a category page for any resolution state.
///
/// Listings get one card each; the other states show a placeholder under the
/// header so the page is never blank.
pub fn render_category_page(
    state: &PageState,
    menu: &Menu,
    config: &SiteConfig,
    css: &str,
    links: LinkStyle,
    current: Option<&str>,
) -> Markup {
    let (title, breadcrumb): (&str, &str) = match state {
        PageState::NoCategory => ("Erreur", "Aucune catégorie spécifiée"),
        PageState::NotFound { .. } => ("Catégorie introuvable", "La catégorie demandée n'existe pas"),
        PageState::Empty { title, breadcrumb } => (title, breadcrumb),
        PageState::Listing(listing) => (&listing.title, &listing.breadcrumb),
    };

    let head = html! {
        script async defer crossorigin="anonymous" src=(config.embed.sdk_url) {}
    };

    let content = html! {
        div id="fb-root" {}
        (side_menu(menu, &config.menu.title, links, current))
        div.container {
            div.category-header {
                h1.category-title { (title) }
                p.category-breadcrumb { (breadcrumb) }
                a.back-link href=(links.home_href()) { "← Retour à l'accueil" }
            }
            @match state {
                PageState::Listing(listing) => {
                    div.fb-cards-container {
                        @for item in &listing.items {
                            (embed_card(item, &config.embed))
                        }
                    }
                    script { (PreEscaped(EMBED_RESCAN_JS)) }
                }
                _ => {
                    div.no-results {
                        p { "Aucun résultat trouvé." }
                    }
                }
            }
        }
    };

    let page_title = format!("{} - {}", title, config.site_title);
    base_document(config, &page_title, css, head, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::build_menu;
    use crate::scan;
    use crate::test_helpers::{entry, listing, setup_fixtures};
    use crate::tree::{Cat2Node, Cat3Node, CategoryListing, CategoryTree, TopCategory, build_tree};
    use crate::types::CategoryPath;
    use tempfile::TempDir;

    fn sample_menu(show_counts: bool) -> Menu {
        build_menu(
            &build_tree(&[
                entry("Shops", "Food", "", "Market", "https://fb.me/m"),
                entry("Shops", "Wear", "Shoes", "Tama", "https://fb.me/t"),
            ]),
            show_counts,
        )
    }

    fn sample_listing() -> CategoryListing {
        CategoryListing {
            path: CategoryPath::new("Shops", "Food", ""),
            title: "Food".into(),
            breadcrumb: "Shops > Food".into(),
            items: vec![
                listing("Market", "https://www.facebook.com/market"),
                listing("Bakery", "https://www.facebook.com/bakery"),
            ],
        }
    }

    fn render(state: &PageState) -> String {
        render_category_page(
            state,
            &sample_menu(false),
            &SiteConfig::default(),
            "",
            LinkStyle::Pages { base: "../" },
            None,
        )
        .into_string()
    }

    // =========================================================================
    // Links
    // =========================================================================

    #[test]
    fn link_styles() {
        let pages = LinkStyle::Pages { base: "../" };
        assert_eq!(pages.category_href("a-b"), "../pages/a-b.html");
        assert_eq!(pages.home_href(), "../index.html");
        assert_eq!(LinkStyle::Query.category_href("a-b"), "category.html?cat=a-b");
        assert_eq!(LinkStyle::Query.home_href(), "index.html");
    }

    // =========================================================================
    // Menu
    // =========================================================================

    #[test]
    fn menu_renders_links_and_headings() {
        let html = render_menu(&sample_menu(false), LinkStyle::Pages { base: "" }, None)
            .into_string();
        assert!(html.contains(r#"href="pages/shops-food.html""#));
        assert!(html.contains(r#"href="pages/shops-wear-shoes.html""#));
        // "Wear" has a child, so its heading is not a link.
        assert!(html.contains(r#"<div class="menu-subcategory-title">Wear</div>"#));
        assert!(!html.contains("menu-count"));
    }

    #[test]
    fn menu_renders_counts_when_enabled() {
        let html = render_menu(&sample_menu(true), LinkStyle::Query, None).into_string();
        assert!(html.contains(r#"<span class="menu-count">(1)</span>"#));
        assert!(html.contains(r#"href="category.html?cat=shops-food""#));
    }

    #[test]
    fn menu_marks_current_link() {
        let html = render_menu(
            &sample_menu(false),
            LinkStyle::Pages { base: "" },
            Some("shops-food"),
        )
        .into_string();
        assert!(html.contains("menu-subcategory-title current"));
        assert!(!html.contains("menu-subsubcategory-link current"));
    }

    #[test]
    fn empty_nodes_render_without_links() {
        let tree = CategoryTree {
            categories: vec![TopCategory {
                name: "A".into(),
                subcategories: vec![
                    Cat2Node::new("Nothing"),
                    Cat2Node {
                        name: "B".into(),
                        items: vec![],
                        subcategories: vec![Cat3Node {
                            name: "Bare".into(),
                            items: vec![],
                        }],
                    },
                ],
            }],
        };
        let html = render_menu(&build_menu(&tree, true), LinkStyle::Pages { base: "" }, None)
            .into_string();
        assert!(!html.contains("<a "));
        assert!(html.contains(r#"<div class="menu-subcategory-title">Nothing</div>"#));
        assert!(html.contains(r#"<span class="menu-subsubcategory-inert">Bare</span>"#));
    }

    // =========================================================================
    // Category pages
    // =========================================================================

    #[test]
    fn listing_page_has_one_card_per_item() {
        let html = render(&PageState::Listing(sample_listing()));
        assert_eq!(html.matches(r#"class="fb-card""#).count(), 2);
        assert!(html.contains(r#"data-href="https://www.facebook.com/market""#));
        assert!(html.contains(r#"cite="https://www.facebook.com/market""#));
        assert!(html.contains("<title>Food - Annuaire</title>"));
        assert!(html.contains("Shops &gt; Food"));
        assert!(html.contains("XFBML.parse"));
    }

    #[test]
    fn embed_attributes_follow_config() {
        let html = render(&PageState::Listing(sample_listing()));
        assert!(html.contains(r#"data-tabs="timeline""#));
        assert!(html.contains(r#"data-small-header="true""#));
        assert!(html.contains(r#"data-hide-cover="true""#));
        assert!(html.contains(r#"data-show-facepile="false""#));
        assert!(html.contains(r#"data-adapt-container-width="true""#));
        assert!(html.contains(r#"data-height="500""#));
        assert!(html.contains("connect.facebook.net"));
    }

    #[test]
    fn no_category_state() {
        let html = render(&PageState::NoCategory);
        assert!(html.contains("Erreur"));
        assert!(html.contains("Aucune catégorie spécifiée"));
        assert!(html.contains("no-results"));
        assert!(!html.contains("fb-card"));
    }

    #[test]
    fn not_found_state() {
        let html = render(&PageState::NotFound {
            slug: "nope".into(),
        });
        assert!(html.contains("Catégorie introuvable"));
        assert!(html.contains("no-results"));
    }

    #[test]
    fn empty_state_keeps_title() {
        let html = render(&PageState::Empty {
            title: "Food".into(),
            breadcrumb: "Shops > Food".into(),
        });
        assert!(html.contains(r#"<h1 class="category-title">Food</h1>"#));
        assert!(html.contains("no-results"));
        assert!(!html.contains("fb-cards-container"));
    }

    #[test]
    fn catalog_text_is_escaped() {
        let mut listing = sample_listing();
        listing.items = vec![listing_named("<script>alert('x')</script>")];
        let html = render(&PageState::Listing(listing));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    fn listing_named(name: &str) -> Listing {
        listing(name, "https://www.facebook.com/x")
    }

    #[test]
    fn base_document_uses_lang_and_footer() {
        let mut config = SiteConfig::default();
        config.lang = "en".into();
        config.footer = "Local directory".into();
        let doc = base_document(&config, "T", "", html! {}, html! {}).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="en">"#));
        assert!(doc.contains("Local directory"));
    }

    // =========================================================================
    // Site generation
    // =========================================================================

    #[test]
    fn generate_writes_home_and_category_pages() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();

        let report = generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();

        assert!(out.path().join("index.html").exists());
        assert!(
            out.path()
                .join("pages/commerces-alimentation-boulangeries.html")
                .exists()
        );
        assert!(out.path().join(cache::MANIFEST_FILENAME).exists());
        assert_eq!(report.pages[0].rel_path, "index.html");
        assert_eq!(report.count(PageStatus::Written), report.pages.len());
        assert_eq!(report.assets_copied, 1);
        assert!(out.path().join("favicon.svg").exists());
    }

    #[test]
    fn home_page_renders_intro_markdown() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("<h1>Bienvenue</h1>"));
        assert!(index.contains("<strong>"));
        assert!(index.contains(r#"href="pages/commerces-vetements.html""#));
    }

    #[test]
    fn regenerate_is_unchanged_then_removes_stale_pages() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();

        let again = generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(again.count(PageStatus::Written), 0);
        assert_eq!(again.count(PageStatus::Unchanged), again.pages.len());

        let mut smaller = manifest.clone();
        smaller.tree.categories.retain(|c| c.name != "Restauration");
        let report = generate_from_manifest(&smaller, content.path(), out.path(), true).unwrap();
        assert!(report.count(PageStatus::Removed) > 0);
        assert!(!out.path().join("pages/restauration-snacks.html").exists());
        // Home page menu changed.
        assert_eq!(report.pages[0].status, PageStatus::Written);
    }

    #[test]
    fn generate_reads_manifest_file() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let manifest_path = content.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let report = generate(&manifest_path, content.path(), out.path(), false).unwrap();
        assert!(report.pages.len() > 1);
    }

    #[test]
    fn shared_slug_page_shows_decoded_category() {
        // "A > B" has a child, so only "A > B!" links to pages/a-b.html, yet
        // the slug decodes to "A > B".
        let content = TempDir::new().unwrap();
        fs::write(
            content.path().join("annuaire.csv"),
            "h\nA;B;;Direct;d\nA;B;C;Child;c\nA;B!;;Other;o\n",
        )
        .unwrap();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();

        let decoded = crate::slug::decode("a-b", &manifest.tree).unwrap();
        assert_eq!(decoded, CategoryPath::new("A", "B", ""));

        let html = fs::read_to_string(out.path().join("pages/a-b.html")).unwrap();
        assert!(html.contains("Direct"));
        assert!(!html.contains(r#"data-href="https://www.facebook.com/o""#));

        let directory = crate::directory::Directory::from_text(
            "h\nA;B;;Direct;d\nA;B;C;Child;c\nA;B!;;Other;o\n",
        );
        let rendered = render_category_page(
            &crate::page::resolve_page(&directory, Some("a-b")),
            &build_menu(&manifest.tree, false),
            &manifest.config,
            &site_css(&manifest.config),
            LinkStyle::Pages { base: "../" },
            Some("a-b"),
        )
        .into_string();
        assert_eq!(html, rendered);
    }

    #[test]
    fn stale_cache_entries_outside_pages_are_not_deleted() {
        let root = TempDir::new().unwrap();
        let out = root.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        let outside = root.path().join("keep.txt");
        fs::write(&outside, "keep").unwrap();
        let stray = out.join("notes.txt");
        fs::write(&stray, "mine").unwrap();

        let mut poisoned = PageCache::empty();
        poisoned.insert("../keep.txt".into(), "x".into());
        poisoned.insert(outside.display().to_string(), "x".into());
        poisoned.insert("notes.txt".into(), "x".into());
        poisoned.insert("pages/../../keep.txt".into(), "x".into());
        poisoned.save(&out).unwrap();

        let content = setup_fixtures();
        let manifest = scan::scan(content.path()).unwrap();
        let report = generate_from_manifest(&manifest, content.path(), &out, true).unwrap();

        assert!(outside.exists());
        assert!(stray.exists());
        assert_eq!(report.count(PageStatus::Removed), 0);
    }

    #[test]
    fn generated_page_paths() {
        assert!(is_generated_page("index.html"));
        assert!(is_generated_page("pages/a-b.html"));
        assert!(!is_generated_page("../x.html"));
        assert!(!is_generated_page("/etc/passwd"));
        assert!(!is_generated_page("pages/../../x.html"));
        assert!(!is_generated_page("favicon.svg"));
    }

    #[test]
    fn assets_cannot_overwrite_generated_output() {
        let content = setup_fixtures();
        let assets = content.path().join("assets");
        fs::write(assets.join("index.html"), "asset index").unwrap();
        fs::create_dir_all(assets.join("pages")).unwrap();
        fs::write(assets.join("pages/commerces-vetements.html"), "asset page").unwrap();
        fs::write(assets.join("pages/extra.html"), "asset extra").unwrap();

        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let first = generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(first.assets_copied, 1);

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("Moorea Life"));
        let page = fs::read_to_string(out.path().join("pages/commerces-vetements.html")).unwrap();
        assert!(page.contains("Pareo Shop"));
        assert!(!out.path().join("pages/extra.html").exists());

        // A rebuild must not leave a clobbered page reported as unchanged.
        let again = generate_from_manifest(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(again.count(PageStatus::Written), 0);
        let page = fs::read_to_string(out.path().join("pages/commerces-vetements.html")).unwrap();
        assert!(page.contains("Pareo Shop"));
    }
}
