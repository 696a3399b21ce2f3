//! Shared test utilities for the preset-pages test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
//! assert_eq!(category_names(&manifest), vec!["Farms", "Space Stations"]);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

use crate::generate::{GenerateReport, PageReport};
use crate::types::{Manifest, Preset};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/repo/` to a temp directory and return it.
///
/// The fixture repository holds two categories (`Farms`, `Space Stations`),
/// the excluded `docs/` and `images/` folders, and a single thumbnail for
/// `Farms/Steve_BigFarm.json`.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/repo");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a preset by filename. Panics if not found.
pub fn find_preset<'a>(presets: &'a [Preset], filename: &str) -> &'a Preset {
    presets
        .iter()
        .find(|p| p.filename == filename)
        .unwrap_or_else(|| {
            let names = preset_filenames(presets);
            panic!("preset '{filename}' not found. Available: {names:?}")
        })
}

/// Find a written page by category. Panics if not found.
pub fn find_page_report<'a>(report: &'a GenerateReport, category: &str) -> &'a PageReport {
    report
        .pages
        .iter()
        .find(|p| p.category == category)
        .unwrap_or_else(|| {
            let names: Vec<&str> = report.pages.iter().map(|p| p.category.as_str()).collect();
            panic!("page for '{category}' not found. Available: {names:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn preset_filenames(presets: &[Preset]) -> Vec<&str> {
    presets.iter().map(|p| p.filename.as_str()).collect()
}

pub fn category_names(manifest: &Manifest) -> Vec<&str> {
    manifest.categories.iter().map(|c| c.name.as_str()).collect()
}

/// Every `.md` file in a directory, keyed by filename.
pub fn read_pages(dir: &Path) -> BTreeMap<String, String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "md"))
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, std::fs::read_to_string(&p).unwrap())
        })
        .collect()
}
