//! Generator configuration.
//!
//! Every URL, path and naming knob the generator uses lives here. The stock
//! defaults describe the upstream preset repository, so running without a
//! config file reproduces the published pages exactly.
//!
//! ## Config File Location
//!
//! An optional `config.toml` sits in the repository root, next to the
//! category folders (files are never mistaken for categories):
//!
//! ```text
//! repo/
//! ├── config.toml        # Optional, overrides stock defaults
//! ├── docs/              # Output directory (excluded from categories)
//! ├── images/            # Thumbnails: images/<category>/<stem>.jpg
//! ├── Farms/
//! │   └── Steve_BigFarm.json
//! └── Space Stations/
//!     └── Anna_Orbital_Ring.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! output_dir = "docs"               # Relative to the root unless absolute
//! exclude = ["docs", "images"]      # Folders that are never categories
//!
//! [site]
//! title = "No Man's Sky Base Builder Presets"
//! pages_url = "https://charliebanks.github.io/nms-base-builder-presets"
//!
//! [assets]
//! raw_url = "https://raw.githubusercontent.com/charliebanks/nms-base-builder-presets/master"
//! images_dir = "images"
//! thumbnail_extension = "jpg"
//! preset_extensions = []            # Empty = every file is a preset
//! missing_thumbnail = "https://raw.githubusercontent.com/.../images/missing_thumbnail.jpg"
//!
//! [probe]
//! timeout_secs = 10
//! ```
//!
//! Config files are sparse: they are merged over the stock defaults
//! key-by-key. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

const UPSTREAM_RAW_URL: &str =
    "https://raw.githubusercontent.com/charliebanks/nms-base-builder-presets/master";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where generated pages are written, relative to the repository root.
    pub output_dir: String,
    /// Top-level folders that are never treated as categories.
    pub exclude: Vec<String>,
    pub site: SiteInfo,
    pub assets: AssetsConfig,
    pub probe: ProbeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: "docs".to_string(),
            exclude: vec!["docs".to_string(), "images".to_string()],
            site: SiteInfo::default(),
            assets: AssetsConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

/// Page header and the public URL the pages are served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Top-level heading of every generated page.
    pub title: String,
    /// Base URL of the published pages; category links hang off it.
    pub pages_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "No Man's Sky Base Builder Presets".to_string(),
            pages_url: "https://charliebanks.github.io/nms-base-builder-presets".to_string(),
        }
    }
}

/// Where preset downloads and thumbnails are served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Raw-content base URL mirroring the repository layout.
    pub raw_url: String,
    /// Thumbnail root folder, laid out as `<images_dir>/<category>/<stem>.<ext>`.
    pub images_dir: String,
    /// Extension of thumbnail files, without the dot.
    pub thumbnail_extension: String,
    /// Only files with these extensions count as presets. Empty accepts all.
    pub preset_extensions: Vec<String>,
    /// Placeholder shown when a thumbnail probe fails.
    pub missing_thumbnail: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            raw_url: UPSTREAM_RAW_URL.to_string(),
            images_dir: "images".to_string(),
            thumbnail_extension: "jpg".to_string(),
            preset_extensions: Vec::new(),
            missing_thumbnail: format!("{UPSTREAM_RAW_URL}/images/missing_thumbnail.jpg"),
        }
    }
}

impl AssetsConfig {
    /// Whether a file with this name is a preset under the extension filter.
    pub fn accepts(&self, filename: &str) -> bool {
        if self.preset_extensions.is_empty() {
            return true;
        }
        let Some(ext) = Path::new(filename).extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        self.preset_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }
}

/// Thumbnail probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Per-request timeout for the remote existence check.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SiteConfig {
    /// Validate values and normalize trailing slashes off the URLs.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "probe.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.assets.images_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets.images_dir must not be empty".into(),
            ));
        }
        if self.assets.thumbnail_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "assets.thumbnail_extension must not be empty".into(),
            ));
        }
        for (key, url) in [
            ("site.pages_url", &mut self.site.pages_url),
            ("assets.raw_url", &mut self.assets.raw_url),
            ("assets.missing_thumbnail", &mut self.assets.missing_thumbnail),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an http:// or https:// URL, got {url:?}"
                )));
            }
            let trimmed_len = url.trim_end_matches('/').len();
            url.truncate(trimmed_len);
        }
        self.assets.thumbnail_extension = self
            .assets
            .thumbnail_extension
            .trim_start_matches('.')
            .to_string();
        Ok(())
    }

    /// Resolve the output directory against the repository root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        let out = Path::new(&self.output_dir);
        if out.is_absolute() {
            out.to_path_buf()
        } else {
            root.join(out)
        }
    }

    /// Whether a top-level folder name is on the denylist.
    pub fn is_excluded(&self, folder: &str) -> bool {
        self.exclude.iter().any(|e| e == folder)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the repository root, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILE))
}

/// Load config from an explicit path, falling back to stock defaults when absent.
pub fn load_config_file(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(config_path)?;
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# preset-pages configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Place this file in the repository root as config.toml.
# Unknown keys will cause an error.

# Where generated pages are written. Relative paths resolve against the root.
output_dir = "docs"

# Top-level folders that are never treated as categories.
exclude = ["docs", "images"]

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Heading at the top of every generated page.
title = "No Man's Sky Base Builder Presets"

# Public URL the generated pages are served from.
pages_url = "https://charliebanks.github.io/nms-base-builder-presets"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Raw-content host mirroring the repository; download links hang off it.
raw_url = "https://raw.githubusercontent.com/charliebanks/nms-base-builder-presets/master"

# Thumbnails live at <images_dir>/<category>/<preset stem>.<thumbnail_extension>.
images_dir = "images"
thumbnail_extension = "jpg"

# Restrict presets to these file extensions. Empty list accepts every file.
preset_extensions = []

# Placeholder used when a thumbnail cannot be found.
missing_thumbnail = "https://raw.githubusercontent.com/charliebanks/nms-base-builder-presets/master/images/missing_thumbnail.jpg"

# ---------------------------------------------------------------------------
# Thumbnail probe
# ---------------------------------------------------------------------------
[probe]
# Seconds before a thumbnail request is abandoned and the placeholder used.
timeout_secs = 10
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_upstream_repository() {
        let config = SiteConfig::default();
        assert_eq!(config.output_dir, "docs");
        assert_eq!(config.exclude, vec!["docs", "images"]);
        assert_eq!(config.site.title, "No Man's Sky Base Builder Presets");
        assert!(config.assets.raw_url.starts_with("https://raw.githubusercontent.com/"));
        assert!(
            config
                .assets
                .missing_thumbnail
                .ends_with("/images/missing_thumbnail.jpg")
        );
        assert_eq!(config.probe.timeout_secs, 10);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
title = "My Presets"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "My Presets");
        // Defaults preserved
        assert_eq!(config.site.pages_url, SiteInfo::default().pages_url);
        assert_eq!(config.assets.images_dir, "images");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output_dir, "docs");
        assert_eq!(config.probe.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
output_dir = "site"

[probe]
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output_dir, "site");
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.exclude, vec!["docs", "images"]);
    }

    #[test]
    fn load_config_file_from_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.toml");
        fs::write(&path, "exclude = [\"docs\", \"images\", \"drafts\"]\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(config.is_excluded("drafts"));
        assert!(!config.is_excluded("Farms"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[site]
title = "A"
pages_url = "https://a.example"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
title = "B"
"#,
        )
        .unwrap();

        let merged = merge_toml(base, overlay);
        let site = merged.get("site").unwrap();
        assert_eq!(site.get("title").unwrap().as_str(), Some("B"));
        assert_eq!(site.get("pages_url").unwrap().as_str(), Some("https://a.example"));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str(r#"exclude = ["docs", "images"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"exclude = ["out"]"#).unwrap();

        let merged = merge_toml(base, overlay);
        let exclude = merged.get("exclude").unwrap().as_array().unwrap();
        assert_eq!(exclude.len(), 1);
        assert_eq!(exclude[0].as_str(), Some("out"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[probe]
timeout = 5
"#,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err().to_string();
        assert!(err.contains("unknown field"), "got: {err}");
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = SiteConfig::default();
        config.probe.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_url_rejected() {
        let mut config = SiteConfig::default();
        config.assets.raw_url = "ftp://example.com/presets".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("assets.raw_url"));
    }

    #[test]
    fn validate_trims_trailing_slashes() {
        let mut config = SiteConfig::default();
        config.site.pages_url = "https://example.github.io/presets/".into();
        config.assets.raw_url = "https://raw.example.com/presets//".into();
        config.validate().unwrap();
        assert_eq!(config.site.pages_url, "https://example.github.io/presets");
        assert_eq!(config.assets.raw_url, "https://raw.example.com/presets");
    }

    #[test]
    fn validate_strips_dot_from_thumbnail_extension() {
        let mut config = SiteConfig::default();
        config.assets.thumbnail_extension = ".png".into();
        config.validate().unwrap();
        assert_eq!(config.assets.thumbnail_extension, "png");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn accepts_everything_without_extension_filter() {
        let assets = AssetsConfig::default();
        assert!(assets.accepts("Steve_BigFarm.json"));
        assert!(assets.accepts("README"));
    }

    #[test]
    fn accepts_filters_by_extension_case_insensitively() {
        let assets = AssetsConfig {
            preset_extensions: vec!["json".into(), ".nms".into()],
            ..AssetsConfig::default()
        };
        assert!(assets.accepts("Steve_BigFarm.JSON"));
        assert!(assets.accepts("Steve_BigFarm.nms"));
        assert!(!assets.accepts("notes.txt"));
        assert!(!assets.accepts("README"));
    }

    #[test]
    fn output_path_relative_and_absolute() {
        let mut config = SiteConfig::default();
        assert_eq!(config.output_path(Path::new("/repo")), PathBuf::from("/repo/docs"));
        config.output_dir = "/srv/pages".into();
        assert_eq!(config.output_path(Path::new("/repo")), PathBuf::from("/srv/pages"));
    }

    #[test]
    fn stock_config_toml_resolves_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        let default = SiteConfig::default();
        assert_eq!(config.site.title, default.site.title);
        assert_eq!(config.assets.raw_url, default.assets.raw_url);
        assert_eq!(config.assets.missing_thumbnail, default.assets.missing_thumbnail);
        assert_eq!(config.exclude, default.exclude);
    }
}
