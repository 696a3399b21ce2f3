//! Filename parsing for the `<author>_..._<name>.<ext>` preset convention.
//!
//! Contributors name their files with the author first and the preset name
//! last, separated by underscores. Anything in between (build numbers,
//! versions, tags) is ignored:
//!
//! - `Steve_BigFarm.json` → author "Steve", name "BigFarm"
//! - `Anna_v2_Orbital-Ring.json` → author "Anna", name "Orbital-Ring"
//! - `Solo.json` → author "Solo", name "Solo"

/// Author and display name extracted from a preset filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPreset {
    /// Text before the first underscore.
    pub author: String,
    /// Text after the last underscore, cut at its first `.`.
    pub name: String,
}

/// Parse a preset filename following the `author_..._name.ext` convention.
///
/// The name is cut at the first dot of the last segment, so
/// `Steve_Big.Farm.json` yields "Big". A filename without underscores
/// uses its stem for both fields.
pub fn parse_preset_filename(filename: &str) -> ParsedPreset {
    match (filename.split_once('_'), filename.rsplit_once('_')) {
        (Some((author, _)), Some((_, last))) => ParsedPreset {
            author: author.to_string(),
            name: cut_at_dot(last).to_string(),
        },
        _ => {
            let stem = cut_at_dot(filename).to_string();
            ParsedPreset {
                author: stem.clone(),
                name: stem,
            }
        }
    }
}

/// Filename minus its last extension: `Steve_BigFarm.json` → `Steve_BigFarm`.
///
/// Dotfiles and extensionless names are returned unchanged.
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(pos) => &filename[..pos],
    }
}

fn cut_at_dot(segment: &str) -> &str {
    segment.split('.').next().unwrap_or(segment)
}
