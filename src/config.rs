//! Tool configuration.
//!
//! Every tunable of both pipelines lives in one [`ToolsConfig`], loaded from
//! an optional `config.toml` in the site root and passed explicitly into each
//! pipeline entry point.
//!
//! ## Config File Location
//!
//! ```text
//! docs/
//! ├── config.toml        # Optional, overrides stock defaults
//! ├── images/
//! ├── recipes/
//! └── index.json         # Generated
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! root = "images"
//! supported_extensions = ["jpg", "jpeg", "png", "bmp", "tiff", "gif"]
//! quality = 80              # Primary WebP quality (0-100)
//! lowres_quality = 50       # Preview WebP quality (0-100)
//! lowres_scale = 0.5        # Preview size relative to the source
//! method = 6                # Encoder effort, 0 (fast) to 6 (smallest)
//! delete_originals = true
//!
//! [references]
//! enabled = true
//! file_extensions = ["json", "md", "html", "js", "ts", "tsx", "py"]
//!
//! [index]
//! recipes_dir = "recipes"
//! output = "index.json"
//! path_prefix = "recipes"
//! default_language = "en"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have defaults matching the site's historical behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Image conversion settings.
    pub images: ImagesConfig,
    /// Reference rewriting settings.
    pub references: ReferencesConfig,
    /// Recipe index settings.
    pub index: IndexConfig,
}

impl ToolsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.lowres_quality > 100 {
            return Err(ConfigError::Validation(
                "images.lowres_quality must be 0-100".into(),
            ));
        }
        if !(self.images.lowres_scale > 0.0 && self.images.lowres_scale <= 1.0) {
            return Err(ConfigError::Validation(
                "images.lowres_scale must be greater than 0 and at most 1".into(),
            ));
        }
        if self.images.method > 6 {
            return Err(ConfigError::Validation("images.method must be 0-6".into()));
        }
        if !has_usable_extension(&self.images.supported_extensions) {
            return Err(ConfigError::Validation(
                "images.supported_extensions must not be empty".into(),
            ));
        }
        if self
            .images
            .supported_extensions
            .iter()
            .any(|ext| crate::naming::normalize_extension(ext) == crate::naming::WEBP_EXTENSION)
        {
            return Err(ConfigError::Validation(format!(
                "images.supported_extensions must not contain the output extension `{}`",
                crate::naming::WEBP_EXTENSION
            )));
        }
        if !has_usable_extension(&self.references.file_extensions) {
            return Err(ConfigError::Validation(
                "references.file_extensions must not be empty".into(),
            ));
        }
        if self.index.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "index.default_language must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn has_usable_extension(extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| !crate::naming::normalize_extension(ext).is_empty())
}

/// Image conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory scanned for source images, relative to the site root.
    pub root: String,
    /// Source extensions that get converted (case-insensitive, dot optional).
    pub supported_extensions: Vec<String>,
    /// Lossy quality of the primary variant (0 = worst, 100 = best).
    pub quality: u32,
    /// Lossy quality of the `_lower` preview variant.
    pub lowres_quality: u32,
    /// Scale factor applied to both dimensions for the preview variant.
    pub lowres_scale: f64,
    /// WebP encoder effort (0 = fastest, 6 = slowest/smallest).
    pub method: u32,
    /// Untrack and delete the source image once both variants exist.
    pub delete_originals: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            root: "images".to_string(),
            supported_extensions: ["jpg", "jpeg", "png", "bmp", "tiff", "gif"]
                .map(String::from)
                .to_vec(),
            quality: 80,
            lowres_quality: 50,
            lowres_scale: 0.5,
            method: 6,
            delete_originals: true,
        }
    }
}

/// Reference rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferencesConfig {
    /// Rewrite old image extensions to `.webp` after converting.
    pub enabled: bool,
    /// Extensions of the text documents that get scanned.
    pub file_extensions: Vec<String>,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_extensions: ["json", "md", "html", "js", "ts", "tsx", "py"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Recipe index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Directory of per-recipe JSON documents, relative to the site root.
    pub recipes_dir: String,
    /// Aggregate index file, relative to the site root.
    pub output: String,
    /// Prefix of the `path` field written for each entry.
    pub path_prefix: String,
    /// Language a plain-string title is filed under; also the sort language.
    pub default_language: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            recipes_dir: "recipes".to_string(),
            output: "index.json".to_string(),
            path_prefix: "recipes".to_string(),
            default_language: "en".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolsConfig::default()).expect("default config must serialize")
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
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root, falling back to defaults.
pub fn load_config(root: &Path) -> Result<ToolsConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# recipe-tools configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file at <root>/config.toml.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image conversion (`recipe-tools images`)
# ---------------------------------------------------------------------------
[images]
# Directory scanned recursively for source images, relative to the root.
root = "images"

# Source formats that get converted to WebP.
supported_extensions = ["jpg", "jpeg", "png", "bmp", "tiff", "gif"]

# Quality of <name>.webp (0 = worst, 100 = best).
quality = 80

# Quality of the <name>_lower.webp preview.
lowres_quality = 50

# Preview dimensions relative to the source (rounded down).
lowres_scale = 0.5

# Encoder effort: 0 is fastest, 6 produces the smallest files.
method = 6

# Remove the source image (git rm, then delete) once converted.
delete_originals = true

# ---------------------------------------------------------------------------
# Reference rewriting (runs after conversion)
# ---------------------------------------------------------------------------
[references]
# Replace .jpg/.png/... with .webp in documents under the root.
enabled = true

# Documents that get scanned.
file_extensions = ["json", "md", "html", "js", "ts", "tsx", "py"]

# ---------------------------------------------------------------------------
# Recipe index (`recipe-tools index`)
# ---------------------------------------------------------------------------
[index]
# Directory of per-recipe JSON documents, relative to the root.
recipes_dir = "recipes"

# Generated index file, relative to the root.
output = "index.json"

# Entries get "path": "<path_prefix>/<file name>".
path_prefix = "recipes"

# Plain-string titles are stored under this language; entries sort by it.
default_language = "en"
"##
}
