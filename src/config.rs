//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! catalog = "annuaire.csv"  # Catalog file, relative to the content directory
//! intro = "intro.md"        # Home page introduction (markdown, optional file)
//! assets_dir = "assets"     # Copied verbatim to the output root
//! site_title = "Annuaire"
//! lang = "fr"
//! footer = "Annuaire local"
//!
//! [menu]
//! title = "Catégories"
//! show_counts = false       # Append listing counts to menu links
//!
//! [embed]
//! sdk_url = "https://connect.facebook.net/fr_FR/sdk.js#xfbml=1&version=v19.0"
//! tabs = "timeline"
//! small_header = true
//! hide_cover = true
//! show_facepile = false
//! adapt_container_width = true
//! height = 500
//!
//! [colors.light]
//! background = "#f0f2f5"
//! text = "#1c1e21"
//! text_muted = "#65676b"
//! border = "#dddfe2"
//! link = "#1877f2"
//! link_hover = "#166fe5"
//! card = "#ffffff"
//!
//! [colors.dark]
//! background = "#18191a"
//! text = "#e4e6eb"
//! text_muted = "#b0b3b8"
//! border = "#3e4042"
//! link = "#2d88ff"
//! link_hover = "#4599ff"
//! card = "#242526"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! site_title = "Moorea Life"
//!
//! [menu]
//! show_counts = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Height range accepted by the page embed widget, in pixels.
const EMBED_HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 70..=2000;

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Catalog file, relative to the content directory.
    pub catalog: String,
    /// Optional markdown introduction shown on the home page.
    pub intro: String,
    /// Static assets directory, copied to the output root.
    pub assets_dir: String,
    pub site_title: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    pub footer: String,
    pub menu: MenuConfig,
    pub embed: EmbedConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog: "annuaire.csv".to_string(),
            intro: "intro.md".to_string(),
            assets_dir: "assets".to_string(),
            site_title: "Annuaire".to_string(),
            lang: "fr".to_string(),
            footer: "Annuaire local".to_string(),
            menu: MenuConfig::default(),
            embed: EmbedConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.trim().is_empty() {
            return Err(ConfigError::Validation("catalog must not be empty".into()));
        }
        if !EMBED_HEIGHT_RANGE.contains(&self.embed.height) {
            return Err(ConfigError::Validation(format!(
                "embed.height must be {}-{}",
                EMBED_HEIGHT_RANGE.start(),
                EMBED_HEIGHT_RANGE.end()
            )));
        }
        if self.embed.tabs.trim().is_empty() {
            return Err(ConfigError::Validation("embed.tabs must not be empty".into()));
        }
        Ok(())
    }
}

/// Navigation menu settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Side menu heading.
    pub title: String,
    /// Append the listing count to each menu link.
    pub show_counts: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: "Catégories".to_string(),
            show_counts: false,
        }
    }
}

/// Social page embed settings, emitted as `data-*` attributes on each card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    /// Embed SDK script, loaded once per category page.
    pub sdk_url: String,
    /// Comma-separated tabs to show (`timeline`, `events`, `messages`).
    pub tabs: String,
    pub small_header: bool,
    pub hide_cover: bool,
    pub show_facepile: bool,
    pub adapt_container_width: bool,
    /// Widget height in pixels.
    pub height: u32,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            sdk_url: "https://connect.facebook.net/fr_FR/sdk.js#xfbml=1&version=v19.0"
                .to_string(),
            tabs: "timeline".to_string(),
            small_header: true,
            hide_cover: true,
            show_facepile: false,
            adapt_container_width: true,
            height: 500,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted/secondary text color (breadcrumbs, counts, inert menu entries).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Card and side menu surface.
    pub card: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f0f2f5".to_string(),
            text: "#1c1e21".to_string(),
            text_muted: "#65676b".to_string(),
            border: "#dddfe2".to_string(),
            link: "#1877f2".to_string(),
            link_hover: "#166fe5".to_string(),
            card: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#18191a".to_string(),
            text: "#e4e6eb".to_string(),
            text_muted: "#b0b3b8".to_string(),
            border: "#3e4042".to_string(),
            link: "#2d88ff".to_string(),
            link_hover: "#4599ff".to_string(),
            card: "#242526".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Annuaire Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Catalog file, relative to the content directory.
# Format: header line, then category1;category2;category3;name;link
catalog = "annuaire.csv"

# Markdown introduction shown on the home page (skipped if the file is missing).
intro = "intro.md"

# Static assets (favicon, images) copied to the output root.
assets_dir = "assets"

site_title = "Annuaire"
lang = "fr"
footer = "Annuaire local"

# ---------------------------------------------------------------------------
# Navigation menu
# ---------------------------------------------------------------------------
[menu]
title = "Catégories"

# Append the number of listings to each menu link, e.g. "Boulangeries (4)".
show_counts = false

# ---------------------------------------------------------------------------
# Page embeds
# ---------------------------------------------------------------------------
[embed]
# Embed SDK, loaded once on every category page.
sdk_url = "https://connect.facebook.net/fr_FR/sdk.js#xfbml=1&version=v19.0"

# Tabs shown in each card: timeline, events, messages (comma-separated).
tabs = "timeline"
small_header = true
hide_cover = true
show_facepile = false
adapt_container_width = true

# Card height in pixels (70-2000).
height = 500

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f0f2f5"
text = "#1c1e21"
text_muted = "#65676b"    # Breadcrumbs, counts, inert menu entries
border = "#dddfe2"
link = "#1877f2"
link_hover = "#166fe5"
card = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#18191a"
text = "#e4e6eb"
text_muted = "#b0b3b8"
border = "#3e4042"
link = "#2d88ff"
link_hover = "#4599ff"
card = "#242526"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_variables(&colors.light, "    "),
        dark = color_variables(&colors.dark, "        "),
    )
}

fn color_variables(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("link", &scheme.link),
        ("link-hover", &scheme.link_hover),
        ("card", &scheme.card),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
