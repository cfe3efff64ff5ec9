//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` from the site root.
//! Stock defaults are overridden by whatever keys the user file sets.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Site config (optional)
//! ├── pages/                   # Markdown copy for advertise/terms (optional)
//! └── public/
//!     ├── pdfs/
//!     └── images/
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! site_name = "Acme"
//!
//! [contact]
//! phone = "+1 555 0100"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::routes::Route;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Company name shown in the header and page titles.
    pub site_name: String,
    /// Directory (relative to the site root) holding the published assets.
    pub public_dir: String,
    /// Directory (relative to the site root) holding markdown page copy.
    pub pages_dir: String,
    pub layout: LayoutConfig,
    pub refresh: RefreshConfig,
    pub preview: PreviewConfig,
    pub routes: RoutesConfig,
    pub contact: ContactConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Neyna".to_string(),
            public_dir: "public".to_string(),
            pages_dir: "pages".to_string(),
            layout: LayoutConfig::default(),
            refresh: RefreshConfig::default(),
            preview: PreviewConfig::default(),
            routes: RoutesConfig::default(),
            contact: ContactConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation("site_name must not be empty".into()));
        }
        if !(1..=MAX_REFRESH_SECS).contains(&self.refresh.interval_secs) {
            return Err(ConfigError::Validation(format!(
                "refresh.interval_secs must be between 1 and {MAX_REFRESH_SECS}"
            )));
        }
        if self.preview.reload_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "preview.reload_delay_ms must be at most 10000".into(),
            ));
        }
        for (key, dir) in [
            ("layout.pdfs_dir", &self.layout.pdfs_dir),
            ("layout.images_dir", &self.layout.images_dir),
        ] {
            if dir.is_empty() || dir.contains('/') || dir.contains('\\') || dir == ".." {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single directory name"
                )));
            }
        }
        if self.layout.pdfs_dir == self.layout.images_dir {
            return Err(ConfigError::Validation(
                "layout.pdfs_dir and layout.images_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Where the two asset categories live under the public directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub pdfs_dir: String,
    pub images_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pdfs_dir: "pdfs".to_string(),
            images_dir: "images".to_string(),
        }
    }
}

/// Longest refresh interval accepted: one day.
pub const MAX_REFRESH_SECS: u64 = 86_400;

/// Catalog re-discovery interval, used by `watch` and by the downloads page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// How long the document viewer stays blank between clearing and
    /// restoring its source on reload.
    pub reload_delay_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            reload_delay_ms: 100,
        }
    }
}

/// Which page `/` serves. The other one of the pair keeps its own path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Landing {
    Advertise,
    Downloads,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub landing: Landing,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            landing: Landing::Advertise,
        }
    }
}

impl RoutesConfig {
    pub fn landing_route(&self) -> Route {
        match self.landing {
            Landing::Advertise => Route::Advertise,
            Landing::Downloads => Route::Downloads,
        }
    }
}

/// An outbound link rendered on the contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Fixed contact affordances. Rendered as-is, never validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub phone: String,
    pub phone_note: String,
    pub email: String,
    pub email_note: String,
    /// Number used for the WhatsApp deep link; empty hides it.
    pub whatsapp: String,
    pub address: Vec<String>,
    pub address_note: String,
    pub social: Vec<SocialLink>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+91 9040 987 452".to_string(),
            phone_note: "Available Monday-Friday, 9AM-6PM IST".to_string(),
            email: "niharbaleshwar@gmail.com".to_string(),
            email_note: "We'll respond as soon as possible".to_string(),
            whatsapp: "+91 9040 987 452".to_string(),
            address: vec![
                "Nitish welding work".to_string(),
                "Rameshwar nagar".to_string(),
                "Baleshwar, Odisha".to_string(),
                "India 756001".to_string(),
            ],
            address_note: "Visit us during business hours".to_string(),
            social: vec![
                SocialLink {
                    label: "Facebook".to_string(),
                    url: "https://www.facebook.com/nihar panda".to_string(),
                },
                SocialLink {
                    label: "YouTube".to_string(),
                    url: "http://www.youtube.com/@Niteshweldingwork".to_string(),
                },
            ],
        }
    }
}

/// Digits of a phone number, keeping a leading `+` (for `tel:` links).
pub fn dial_string(phone: &str) -> String {
    let mut out = String::with_capacity(phone.len());
    for (i, c) in phone.trim().chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub accent: String,
    pub header_background: String,
    pub header_text: String,
    pub background: String,
    pub text: String,
    pub card: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#ff6b00".to_string(),
            header_background: "#001529".to_string(),
            header_text: "#ffffff".to_string(),
            background: "#f5f5f5".to_string(),
            text: "#1f1f1f".to_string(),
            card: "#ffffff".to_string(),
        }
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
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    tracing::debug!(root = %root.display(), site = %config.site_name, "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# neyna-site configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Company name shown in the header and page titles.
site_name = "Neyna"

# Published assets, relative to the site root. Everything in here is copied
# to the output directory as-is.
public_dir = "public"

# Markdown copy for the advertise and terms pages (advertise.md, terms.md).
# Missing files fall back to built-in copy.
pages_dir = "pages"

# ---------------------------------------------------------------------------
# Asset layout under public_dir
# ---------------------------------------------------------------------------
[layout]
# Documents: *.pdf
pdfs_dir = "pdfs"
# Images: *.png, *.jpg, *.jpeg, *.gif, *.webp, *.avif
images_dir = "images"

# ---------------------------------------------------------------------------
# Catalog refresh
# ---------------------------------------------------------------------------
[refresh]
# Seconds between re-discovery in `watch` mode. The downloads page polls
# catalog.json on the same interval. At most 86400 (one day).
interval_secs = 30

# ---------------------------------------------------------------------------
# Document preview
# ---------------------------------------------------------------------------
[preview]
# Milliseconds the viewer stays blank while reloading a document.
reload_delay_ms = 100

# ---------------------------------------------------------------------------
# Routes
# ---------------------------------------------------------------------------
[routes]
# Page served at "/": "advertise" or "downloads".
landing = "advertise"

# ---------------------------------------------------------------------------
# Contact page
# ---------------------------------------------------------------------------
[contact]
phone = "+91 9040 987 452"
phone_note = "Available Monday-Friday, 9AM-6PM IST"
email = "niharbaleshwar@gmail.com"
email_note = "We'll respond as soon as possible"
# Number for the WhatsApp deep link. Empty string hides the link.
whatsapp = "+91 9040 987 452"
address = ["Nitish welding work", "Rameshwar nagar", "Baleshwar, Odisha", "India 756001"]
address_note = "Visit us during business hours"

[[contact.social]]
label = "Facebook"
url = "https://www.facebook.com/nihar panda"

[[contact.social]]
label = "YouTube"
url = "http://www.youtube.com/@Niteshweldingwork"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
accent = "#ff6b00"
header_background = "#001529"
header_text = "#ffffff"
background = "#f5f5f5"
text = "#1f1f1f"
card = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --color-header-bg: {header_bg};
    --color-header-text: {header_text};
    --color-bg: {bg};
    --color-text: {text};
    --color-card: {card};
}}"#,
        accent = colors.accent,
        header_bg = colors.header_background,
        header_text = colors.header_text,
        bg = colors.background,
        text = colors.text,
        card = colors.card,
    )
}
