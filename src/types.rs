//! Shared types passed from the scan stage to page generation.
//!
//! They also serialize to JSON for the `scan` command, so the field names
//! are part of the inspection format.

use serde::Serialize;

/// Everything discovered under the repository root, in page order.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub categories: Vec<Category>,
}

impl Manifest {
    pub fn preset_count(&self) -> usize {
        self.categories.iter().map(|c| c.presets.len()).sum()
    }
}

/// A top-level folder grouping related presets.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Folder name, used verbatim as the page title and output file stem.
    pub name: String,
    pub presets: Vec<Preset>,
}

/// A single downloadable preset file with its derived metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    /// File name on disk (`Steve_BigFarm.json`).
    pub filename: String,
    /// Text before the first underscore of the filename.
    pub author: String,
    /// Text after the last underscore, extension stripped.
    pub name: String,
    /// Raw-content URL of the preset file itself.
    pub download_url: String,
    /// Thumbnail path relative to the repository root, `/`-separated.
    pub thumbnail_path: String,
    /// Raw-content URL of the expected thumbnail.
    pub thumbnail_url: String,
}
