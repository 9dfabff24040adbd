//! # Annuaire
//!
//! A static site generator for local business directories. A single
//! semicolon-separated catalog is the data source: each row files one
//! business page under up to three category levels, and the site shows one
//! page per category with the businesses' embedded social page cards.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (catalog → category tree)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON. `build` skips rewriting it when the
//! catalog text and config are unchanged, and the page cache skips rewriting
//! pages whose HTML is unchanged.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Catalog decoding, row parsing, link normalization |
//! | [`tree`] | Three-level category tree built from catalog entries |
//! | [`slug`] | Category path ↔ URL slug codec and reverse index |
//! | [`directory`] | Lazily parsed catalog with memoized tree and slug index |
//! | [`menu`] | Menu structure and the set of category pages to generate |
//! | [`page`] | Query parameter parsing and category page resolution |
//! | [`scan`] | Stage 1, produces the scan manifest |
//! | [`generate`] | Stage 2, renders HTML with Maud and writes the site |
//! | [`cache`] | Content-hash page cache for incremental output |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types (`Listing`, `CategoryPath`) |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Slugs Are Derived, Not Stored
//!
//! A category's URL slug is computed from its path by lowercasing, folding
//! accents, and collapsing everything else to hyphens. Slugs are not
//! injective (`Café` and `Cafe` collide); the first path in catalog order
//! owns the slug and later ones are unreachable by URL.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Catalog text
//! lands in pages auto-escaped, so a business name cannot inject markup.
//!
//! ## CSS-Only Menu
//!
//! The side menu opens with a hidden checkbox and its `:checked` sibling
//! selectors. The only script on a page is the embed SDK.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod generate;
pub mod menu;
pub mod output;
pub mod page;
pub mod scan;
pub mod slug;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
