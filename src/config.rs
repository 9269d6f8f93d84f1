//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! overridden by an optional `site.toml` in the content directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_file = "content.json"  # Content data, relative to the content dir
//!
//! [reveal]
//! threshold = 0.05          # Fraction of a section that must be visible
//! early_margin = 200.0      # Pixels trimmed off the viewport bottom
//!
//! [zoom]
//! base_scale = 1.0          # Mission image scale below the fold
//! max_scale = 1.3           # Scale after a full transit
//!
//! [banner]
//! enabled = true
//! text = "Recovery is possible."
//! link_text = "Join us and begin your journey today."
//! href = "/apply"
//!
//! [newsletter]
//! excerpt_length = 150      # Characters shown before "Read more"
//!
//! [colors]
//! background = "#f0efeb"
//! text = "#111111"
//! heading = "#a16207"
//! accent = "#f9a8d4"
//! accent_hover = "#f472b6"
//! highlight = "#fdba74"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the content directory.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content data file, relative to the content directory.
    #[serde(default = "default_content_file")]
    pub content_file: String,
    /// Scroll reveal trigger.
    pub reveal: RevealConfig,
    /// Mission image zoom range.
    pub zoom: ZoomConfig,
    /// Sticky apply banner.
    pub banner: BannerConfig,
    /// Newsletter listing.
    pub newsletter: NewsletterConfig,
    /// Brand palette.
    pub colors: ColorConfig,
}

fn default_content_file() -> String {
    "content.json".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_file: default_content_file(),
            reveal: RevealConfig::default(),
            zoom: ZoomConfig::default(),
            banner: BannerConfig::default(),
            newsletter: NewsletterConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if !self.reveal.early_margin.is_finite() || self.reveal.early_margin < 0.0 {
            return Err(ConfigError::Validation(
                "reveal.early_margin must be non-negative".into(),
            ));
        }
        if !self.zoom.base_scale.is_finite() || self.zoom.base_scale <= 0.0 {
            return Err(ConfigError::Validation(
                "zoom.base_scale must be positive".into(),
            ));
        }
        if !self.zoom.max_scale.is_finite() || self.zoom.max_scale < self.zoom.base_scale {
            return Err(ConfigError::Validation(
                "zoom.max_scale must not be smaller than zoom.base_scale".into(),
            ));
        }
        if self.newsletter.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "newsletter.excerpt_length must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of a section's area that must be visible before it fades in.
    pub threshold: f64,
    /// Pixels subtracted from the viewport's bottom edge before testing.
    pub early_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: crate::visibility::DEFAULT_THRESHOLD,
            early_margin: crate::visibility::DEFAULT_EARLY_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    pub base_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            base_scale: crate::scroll::BASE_SCALE,
            max_scale: crate::scroll::MAX_SCALE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    /// Show the sticky banner under the header on the home page.
    pub enabled: bool,
    pub text: String,
    pub link_text: String,
    pub href: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Recovery is possible.".to_string(),
            link_text: "Join us and begin your journey today.".to_string(),
            href: "/apply".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsletterConfig {
    pub excerpt_length: usize,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            excerpt_length: crate::newsletter::DEFAULT_EXCERPT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background (the warm off-white of section panels).
    pub background: String,
    /// Body text.
    pub text: String,
    /// Section headings.
    pub heading: String,
    /// Buttons and the apply banner.
    pub accent: String,
    pub accent_hover: String,
    /// Secondary hero button and title highlight.
    pub highlight: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f0efeb".to_string(),
            text: "#111111".to_string(),
            heading: "#a16207".to_string(),
            accent: "#f9a8d4".to_string(),
            accent_hover: "#f472b6".to_string(),
            highlight: "#fdba74".to_string(),
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

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `site.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge user values on top of stock defaults, reject unknown keys, and
/// validate the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    tracing::debug!(dir = %dir.display(), "loaded site config");
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# purpose-site configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Content data file, relative to the content directory.
content_file = "content.json"

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction (0-1) of a section's area that must be on screen before it fades in.
threshold = 0.05

# Pixels trimmed off the bottom of the viewport before testing, so sections
# start fading in a little after they appear.
early_margin = 200.0

# ---------------------------------------------------------------------------
# Mission image zoom
# ---------------------------------------------------------------------------
[zoom]
# Scale while the image is below the fold.
base_scale = 1.0

# Scale once the image has travelled all the way through the viewport.
max_scale = 1.3

# ---------------------------------------------------------------------------
# Apply banner (sticky, dismissible, home page only)
# ---------------------------------------------------------------------------
[banner]
enabled = true
text = "Recovery is possible."
link_text = "Join us and begin your journey today."
href = "/apply"

# ---------------------------------------------------------------------------
# Newsletter listing
# ---------------------------------------------------------------------------
[newsletter]
# Descriptions longer than this many characters get a "Read more" link.
excerpt_length = 150

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#f0efeb"
text = "#111111"
heading = "#a16207"
accent = "#f9a8d4"
accent_hover = "#f472b6"
highlight = "#fdba74"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-heading: {heading};
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
    --color-highlight: {highlight};
}}"#,
        background = colors.background,
        text = colors.text,
        heading = colors.heading,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
        highlight = colors.highlight,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.content_file, "content.json");
        assert_eq!(config.reveal.threshold, 0.05);
        assert_eq!(config.reveal.early_margin, 200.0);
        assert_eq!(config.zoom.base_scale, 1.0);
        assert_eq!(config.zoom.max_scale, 1.3);
        assert_eq!(config.newsletter.excerpt_length, 150);
        assert!(config.banner.enabled);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[reveal]
threshold = 0.1
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.early_margin, 200.0);
        assert_eq!(config.zoom.max_scale, 1.3);
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[zoom]
maximum = 2.0
"#;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.reveal.threshold, defaults.reveal.threshold);
        assert_eq!(config.zoom.max_scale, defaults.zoom.max_scale);
        assert_eq!(config.banner.href, defaults.banner.href);
        assert_eq!(config.colors.accent, defaults.colors.accent);
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_margin() {
        let mut config = SiteConfig::default();
        config.reveal.early_margin = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_zoom() {
        let mut config = SiteConfig::default();
        config.zoom.max_scale = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_excerpt() {
        let mut config = SiteConfig::default();
        config.newsletter.excerpt_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_overrides_nested_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[banner]\nenabled = false").unwrap();
        let config: SiteConfig = merge_toml(base, overlay).try_into().unwrap();
        assert!(!config.banner.enabled);
        assert_eq!(config.banner.href, "/apply");
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.reveal.threshold, 0.05);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[zoom]\nmax_scale = 1.5\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.zoom.max_scale, 1.5);
        assert_eq!(config.zoom.base_scale, 1.0);
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[reveal]\nthreshold = 2.0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn color_css_has_custom_properties() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--color-accent: #f9a8d4;"));
        assert!(css.contains("--color-bg: #f0efeb;"));
    }
}
