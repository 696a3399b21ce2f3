//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper writing them to stdout. Logs go to stderr through
//! `tracing`, so these are the only lines on stdout apart from `scan` JSON.
//!
//! ## Check
//!
//! ```text
//! Categories
//! 001 Farms (2 presets)
//!     001 Greenhouse by Anna
//!         Source: Farms/Anna_v2_Greenhouse.json
//!     002 BigFarm by Steve
//!         Source: Farms/Steve_BigFarm.json
//! 002 Space Stations (1 preset)
//!     001 Ring by Anna
//!         Source: Space Stations/Anna_Orbital_Ring.json
//! ```
//!
//! ## Generate
//!
//! ```text
//! Index → docs/index.md
//! 001 Farms → docs/Farms.md (2 presets, 1 missing thumbnail)
//! 002 Space Stations → docs/Space Stations.md (1 preset)
//!
//! Generated 2 category pages, 3 presets
//! ```

use crate::generate::GenerateReport;
use crate::types::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Show a written file relative to the root when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

// ============================================================================
// Check
// ============================================================================

/// Format the discovered categories and presets.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];

    if manifest.categories.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    for (i, category) in manifest.categories.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category.name,
            plural(category.presets.len(), "preset")
        ));
        for (j, preset) in category.presets.iter().enumerate() {
            lines.push(format!(
                "    {} {} by {}",
                format_index(j + 1),
                preset.name,
                preset.author
            ));
            lines.push(format!("        Source: {}/{}", category.name, preset.filename));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the pages written by a generate run.
pub fn format_generate_output(report: &GenerateReport, root: &Path) -> Vec<String> {
    let mut lines = vec![format!("Index → {}", display_path(&report.index, root))];

    for (i, page) in report.pages.iter().enumerate() {
        let mut detail = plural(page.presets, "preset");
        if page.missing_thumbnails > 0 {
            detail.push_str(&format!(
                ", {}",
                plural(page.missing_thumbnails, "missing thumbnail")
            ));
        }
        lines.push(format!(
            "{} {} → {} ({})",
            format_index(i + 1),
            page.category,
            display_path(&page.path, root),
            detail
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "category page"),
        plural(report.preset_count(), "preset")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, root: &Path) {
    for line in format_generate_output(report, root) {
        println!("{}", line);
    }
}
