//! Repository scanning.
//!
//! First stage of the page build. Lists the category folders under the
//! repository root and the preset files inside each, deriving author, name
//! and URLs from the filename convention in [`crate::naming`].
//!
//! ## Directory Structure
//!
//! ```text
//! repo/                                # Repository root
//! ├── config.toml                      # Optional generator config
//! ├── docs/                            # Output (excluded)
//! ├── images/                          # Thumbnails (excluded)
//! │   └── Farms/
//! │       └── Steve_BigFarm.jpg
//! ├── Farms/                           # Category
//! │   ├── Steve_BigFarm.json           # Preset: author Steve, name BigFarm
//! │   └── Anna_v2_Greenhouse.json      # Preset: author Anna, name Greenhouse
//! └── Space Stations/                  # Category (spaces allowed)
//!     └── Anna_Orbital_Ring.json
//! ```
//!
//! ## Rules
//!
//! - Categories are directories whose name is not hidden, contains no `.`,
//!   is not on the `exclude` denylist, and is not the output directory.
//! - Entries whose names are not valid UTF-8 are skipped with a warning.
//! - Presets are regular, non-hidden files passing the extension filter.
//!   Subdirectories inside a category are ignored.
//! - Both lists are sorted by name so reruns produce identical pages.

use crate::config::SiteConfig;
use crate::naming::{file_stem, parse_preset_filename};
use crate::types::{Category, Manifest, Preset};
use crate::urls::join_url;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Category is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan the whole repository: every category with its presets.
pub fn scan(root: &Path, config: &SiteConfig) -> Result<Manifest, ScanError> {
    let mut categories = Vec::new();
    for name in list_categories(root, config) {
        let presets = list_presets(root, &name, config)?;
        tracing::debug!(category = %name, presets = presets.len(), "scanned category");
        categories.push(Category { name, presets });
    }
    Ok(Manifest { categories })
}

/// List category folder names under the root, sorted.
///
/// The configured output directory is never a category. Names that are not
/// valid UTF-8 are skipped. An unreadable root yields an empty list; the
/// failure is only logged.
pub fn list_categories(root: &Path, config: &SiteConfig) -> Vec<String> {
    let output_dir = config.output_path(root);
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "cannot list repository root");
            return Vec::new();
        }
    };

    let mut categories: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| utf8_name(&e.path()))
        .filter(|name| {
            let keep = !name.contains('.')
                && !config.is_excluded(name)
                && !same_dir(&root.join(name), &output_dir);
            if !keep {
                tracing::trace!(folder = %name, "skipping non-category folder");
            }
            keep
        })
        .collect();

    categories.sort();
    categories
}

/// List the presets of one category, sorted by filename.
///
/// Fails if the category folder is missing or unreadable.
pub fn list_presets(
    root: &Path,
    category: &str,
    config: &SiteConfig,
) -> Result<Vec<Preset>, ScanError> {
    let dir = root.join(category);
    let entries = fs::read_dir(&dir).map_err(|e| {
        if dir.is_file() {
            ScanError::NotADirectory(dir.clone())
        } else {
            ScanError::Io(dir.clone(), e)
        }
    })?;

    let mut filenames: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| utf8_name(&e.path()))
        .filter(|name| !name.starts_with('.') && config.assets.accepts(name))
        .collect();
    filenames.sort();

    Ok(filenames
        .into_iter()
        .map(|filename| build_preset(category, filename, config))
        .collect())
}

/// File name as UTF-8, or `None` (logged) when it cannot be used in a URL.
fn utf8_name(path: &Path) -> Option<String> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => Some(name.to_string()),
        None => {
            tracing::warn!(path = %path.display(), "skipping entry with non-UTF-8 name");
            None
        }
    }
}

/// Whether two paths name the same directory on disk.
///
/// A path that does not exist yet never matches.
pub fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Derive a preset's metadata and URLs from its category and filename.
pub fn build_preset(category: &str, filename: String, config: &SiteConfig) -> Preset {
    let parsed = parse_preset_filename(&filename);
    let assets = &config.assets;

    let thumbnail_file = format!("{}.{}", file_stem(&filename), assets.thumbnail_extension);
    let download_url = join_url(&assets.raw_url, [category, filename.as_str()]);
    let thumbnail_url = join_url(
        &assets.raw_url,
        [assets.images_dir.as_str(), category, thumbnail_file.as_str()],
    );
    let thumbnail_path = format!("{}/{}/{}", assets.images_dir, category, thumbnail_file);

    Preset {
        filename,
        author: parsed.author,
        name: parsed.name,
        download_url,
        thumbnail_path,
        thumbnail_url,
    }
}
