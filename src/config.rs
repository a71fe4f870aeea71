//! Site configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` that
//! sits next to the content document. The content document says *what* the
//! site contains; this file controls *how* it is built and styled.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml     # Optional (overrides stock defaults)
//! ├── content.json    # The content document
//! └── assets/         # Copied verbatim to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_file = "content.json"  # Content document, relative to the source dir
//! assets_dir = "assets"          # Static assets copied to the output root
//! lang = "en"                    # <html lang="...">
//!
//! [theme]
//! max_width = "72rem"            # Width of the centered content column
//! radius = "0.5rem"              # Corner radius for cards and buttons
//! font_family = "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif"
//!
//! [colors]
//! text = "#18181b"
//! text_muted = "#52525b"         # Secondary copy, captions
//! surface = "#f4f4f5"            # Alternating section background
//! border = "#e4e4e7"
//! on_primary = "#ffffff"         # Text on primary/accent backgrounds
//!
//! [processing]
//! max_processes = 4              # Max parallel render workers (omit for auto)
//! ```
//!
//! Brand colors (`primaryColor`, `accentColor`) come from the content
//! document, not from here: they are business facts, edited with the copy.
//!
//! Unknown keys are rejected to catch typos early.

use crate::content::Design;
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

/// Build configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content document path, relative to the source directory.
    pub content_file: String,
    /// Directory (relative to the source directory) copied to the output root.
    pub assets_dir: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    /// Layout settings.
    pub theme: ThemeConfig,
    /// Neutral palette; brand colors come from the content document.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_file: "content.json".to_string(),
            assets_dir: "assets".to_string(),
            lang: "en".to_string(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_file must not be empty".into(),
            ));
        }
        if self.lang.trim().is_empty() {
            return Err(ConfigError::Validation("lang must not be empty".into()));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        for (key, value) in self.css_values() {
            if !is_plain_css_value(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} is not a plain CSS value: {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Every value written into the `:root` block, keyed by its config path.
    fn css_values(&self) -> [(&'static str, &str); 8] {
        [
            ("theme.max_width", self.theme.max_width.as_str()),
            ("theme.radius", self.theme.radius.as_str()),
            ("theme.font_family", self.theme.font_family.as_str()),
            ("colors.text", self.colors.text.as_str()),
            ("colors.text_muted", self.colors.text_muted.as_str()),
            ("colors.surface", self.colors.surface.as_str()),
            ("colors.border", self.colors.border.as_str()),
            ("colors.on_primary", self.colors.on_primary.as_str()),
        ]
    }
}

/// A custom property value that cannot end its declaration, its rule or
/// the enclosing `<style>` element.
pub fn is_plain_css_value(value: &str) -> bool {
    !value.contains(['<', '>', '{', '}', ';'])
}

/// Escape a value for the inline `<style>` block.
///
/// `<` becomes the CSS escape `\3c `, so no value can close the element.
fn css_value(value: &str) -> String {
    value.replace('<', "\\3c ")
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page-rendering workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Max width of the centered content column (CSS value).
    pub max_width: String,
    /// Corner radius for cards, chips and buttons (CSS value).
    pub radius: String,
    /// Body font stack.
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_width: "72rem".to_string(),
            radius: "0.5rem".to_string(),
            font_family: "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif".to_string(),
        }
    }
}

/// Neutral colors shared by every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub text: String,
    /// Secondary copy and captions.
    pub text_muted: String,
    /// Background of alternating sections and cards.
    pub surface: String,
    pub border: String,
    /// Text drawn on primary/accent backgrounds.
    pub on_primary: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            text: "#18181b".to_string(),
            text_muted: "#52525b".to_string(),
            surface: "#f4f4f5".to_string(),
            border: "#e4e4e7".to_string(),
            on_primary: "#ffffff".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
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
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Storefront Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Brand colors (primaryColor / accentColor) live in the content document.

# Content document, relative to this directory.
content_file = "content.json"

# Directory copied verbatim to the output root (favicon, images).
assets_dir = "assets"

# Value of <html lang="...">.
lang = "en"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Width of the centered content column (CSS value).
max_width = "72rem"

# Corner radius for cards, chips and buttons (CSS value).
radius = "0.5rem"

# Body font stack.
font_family = "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif"

# ---------------------------------------------------------------------------
# Neutral colors
# ---------------------------------------------------------------------------
[colors]
text = "#18181b"
text_muted = "#52525b"    # Secondary copy, captions
surface = "#f4f4f5"       # Alternating section background
border = "#e4e4e7"
on_primary = "#ffffff"    # Text on primary/accent backgrounds

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page-rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate the `:root` custom properties for brand, palette and layout.
///
/// Values are escaped with [`css_value`]; loading already rejects values
/// that fail [`is_plain_css_value`].
pub fn generate_theme_css(design: &Design, config: &SiteConfig) -> String {
    format!(
        r#":root {{
    --site-primary: {primary};
    --site-accent: {accent};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-surface: {surface};
    --color-border: {border};
    --color-on-primary: {on_primary};
    --max-width: {max_width};
    --radius: {radius};
    --font-family: {font_family};
}}"#,
        primary = css_value(&design.primary_color),
        accent = css_value(&design.accent_color),
        text = css_value(&config.colors.text),
        text_muted = css_value(&config.colors.text_muted),
        surface = css_value(&config.colors.surface),
        border = css_value(&config.colors.border),
        on_primary = css_value(&config.colors.on_primary),
        max_width = css_value(&config.theme.max_width),
        radius = css_value(&config.theme.radius),
        font_family = css_value(&config.theme.font_family),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn design() -> Design {
        Design {
            primary_color: "#1e3a5f".to_string(),
            accent_color: "#e07a1f".to_string(),
        }
    }

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.content_file, "content.json");
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.lang, "en");
        assert_eq!(config.theme.max_width, "72rem");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
lang = "fr"

[colors]
text = "#000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.lang, "fr");
        assert_eq!(config.colors.text, "#000");
        // Unspecified values keep defaults
        assert_eq!(config.colors.border, "#e4e4e7");
        assert_eq!(config.content_file, "content.json");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.content_file, "content.json");
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
content_file = "data/site.json"

[theme]
radius = "0"

[processing]
max_processes = 2
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.content_file, "data/site.json");
        assert_eq!(config.theme.radius, "0");
        assert_eq!(config.theme.max_width, "72rem");
        assert_eq!(config.processing.max_processes, Some(2));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
lang = "en"
colour = "red"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r##"
[colors]
primary = "#f00"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[theme]\nmax_widht = \"60rem\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validate_empty_content_file() {
        let mut config = SiteConfig::default();
        config.content_file = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_empty_lang() {
        let mut config = SiteConfig::default();
        config.lang = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_processes() {
        let mut config = SiteConfig::default();
        config.processing.max_processes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("lang = \"en\"").unwrap();
        let overlay: toml::Value = toml::from_str("lang = \"de\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["lang"].as_str(), Some("de"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let merged = merge_toml(
            stock_defaults_value(),
            toml::from_str("[colors]\ntext = \"#111\"").unwrap(),
        );
        assert_eq!(merged["colors"]["text"].as_str(), Some("#111"));
        assert_eq!(merged["colors"]["border"].as_str(), Some("#e4e4e7"));
        assert_eq!(merged["lang"].as_str(), Some("en"));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.content_file, defaults.content_file);
        assert_eq!(config.theme.font_family, defaults.theme.font_family);
        assert_eq!(config.colors.on_primary, defaults.colors.on_primary);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn theme_css_includes_brand_and_palette() {
        let css = generate_theme_css(&design(), &SiteConfig::default());
        assert!(css.contains("--site-primary: #1e3a5f;"));
        assert!(css.contains("--site-accent: #e07a1f;"));
        assert!(css.contains("--color-surface: #f4f4f5;"));
        assert!(css.contains("--max-width: 72rem;"));
        assert!(css.starts_with(":root {"));
    }

    #[test]
    fn validate_rejects_style_breakout() {
        let mut config = SiteConfig::default();
        config.colors.surface = "#fff;}</style><script>x()</script>".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("colors.surface"));
    }

    #[test]
    fn validate_rejects_braces_in_theme() {
        let mut config = SiteConfig::default();
        config.theme.radius = "0 } body { display: none".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_rejects_unsafe_css_value() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[colors]\ntext = \"red</style>\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn plain_css_values() {
        assert!(is_plain_css_value("#1e3a5f"));
        assert!(is_plain_css_value("rgb(30, 58, 95)"));
        assert!(is_plain_css_value("system-ui, 'Segoe UI', sans-serif"));
        assert!(!is_plain_css_value("red;"));
        assert!(!is_plain_css_value("</style>"));
    }

    #[test]
    fn theme_css_escapes_angle_brackets() {
        let design = Design {
            primary_color: "red</style><script>alert(1)</script>".to_string(),
            accent_color: "#e07a1f".to_string(),
        };
        let css = generate_theme_css(&design, &SiteConfig::default());
        assert!(!css.contains('<'));
        assert!(css.contains(r"--site-primary: red\3c /style>\3c script>"));
    }

    #[test]
    fn effective_threads_auto() {
        let threads = effective_threads(&ProcessingConfig::default());
        assert!(threads >= 1);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        assert_eq!(effective_threads(&config), cores);
    }
}
