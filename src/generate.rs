//! Markdown page generation.
//!
//! Final stage of the page build. Writes an index linking every category and
//! one page per category listing its presets.
//!
//! ## Generated Pages
//!
//! - **Index** (`index.md`): site title, a `Categories` heading, one heading
//!   link per category pointing at `<pages_url>/<category>`.
//! - **Category** (`<category>.md`): back link to the index and an HTML table
//!   with a thumbnail and a Name / Author / Download cell per preset.
//!
//! Markdown tables cannot hold images next to multi-line descriptions, so the
//! preset list is raw HTML embedded in the Markdown. It is rendered with
//! [maud](https://maud.lambda.xyz/), which escapes every interpolated name.
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── index.md
//! ├── Farms.md
//! └── Space Stations.md
//! ```
//!
//! Pages are overwritten on every run. Categories and presets are sorted, so
//! unchanged inputs with unchanged probe results give byte-identical files.

use crate::config::SiteConfig;
use crate::probe::{ProbeOutcome, ThumbnailProbe};
use crate::scan::{self, ScanError};
use crate::types::Preset;
use crate::urls::join_url;
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_FILE: &str = "index.md";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// What a full run wrote, for CLI reporting.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub index: PathBuf,
    pub pages: Vec<PageReport>,
}

impl GenerateReport {
    pub fn preset_count(&self) -> usize {
        self.pages.iter().map(|p| p.presets).sum()
    }
}

/// One written category page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub category: String,
    pub path: PathBuf,
    pub presets: usize,
    /// Rows that fell back to the placeholder thumbnail.
    pub missing_thumbnails: usize,
}

/// A preset with its thumbnail decision made.
#[derive(Debug, Clone)]
pub struct ResolvedPreset<'a> {
    pub preset: &'a Preset,
    /// Real thumbnail URL, or the placeholder when the probe failed.
    pub thumbnail: &'a str,
    pub outcome: ProbeOutcome,
}

/// Probe each preset's thumbnail and pick the URL to show.
pub fn resolve_thumbnails<'a>(
    category: &str,
    presets: &'a [Preset],
    probe: &dyn ThumbnailProbe,
    fallback: &'a str,
) -> Vec<ResolvedPreset<'a>> {
    presets
        .iter()
        .map(|preset| {
            let outcome = probe.probe(preset);
            match &outcome {
                ProbeOutcome::Found => {}
                ProbeOutcome::Missing(_) => tracing::debug!(
                    category,
                    preset = %preset.filename,
                    url = %preset.thumbnail_url,
                    %outcome,
                    "thumbnail missing, using placeholder"
                ),
                ProbeOutcome::TimedOut | ProbeOutcome::Unreachable(_) => tracing::warn!(
                    category,
                    preset = %preset.filename,
                    url = %preset.thumbnail_url,
                    %outcome,
                    "thumbnail probe failed, using placeholder"
                ),
            }
            let thumbnail = if outcome.is_found() {
                preset.thumbnail_url.as_str()
            } else {
                fallback
            };
            ResolvedPreset {
                preset,
                thumbnail,
                outcome,
            }
        })
        .collect()
}

/// Writes the index and category pages for one repository.
pub struct Generator<'a> {
    root: &'a Path,
    config: &'a SiteConfig,
    output_dir: PathBuf,
    probe: &'a dyn ThumbnailProbe,
}

impl<'a> Generator<'a> {
    pub fn new(
        root: &'a Path,
        config: &'a SiteConfig,
        output_dir: PathBuf,
        probe: &'a dyn ThumbnailProbe,
    ) -> Self {
        Self {
            root,
            config,
            output_dir,
            probe,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the index, then one page per category. Any error aborts the run.
    pub fn generate(&self) -> Result<GenerateReport, GenerateError> {
        let categories: Vec<String> = scan::list_categories(self.root, self.config)
            .into_iter()
            .filter(|c| !scan::same_dir(&self.root.join(c), &self.output_dir))
            .collect();
        let index = self.generate_index(&categories)?;

        let mut pages = Vec::with_capacity(categories.len());
        for category in &categories {
            pages.push(self.generate_category_page(category)?);
        }

        Ok(GenerateReport { index, pages })
    }

    /// Write `index.md` linking every category.
    pub fn generate_index(&self, categories: &[String]) -> Result<PathBuf, GenerateError> {
        let content = render_index(categories, self.config);
        let path = self.write_page(INDEX_FILE, &content)?;
        tracing::info!(path = %path.display(), categories = categories.len(), "wrote index");
        Ok(path)
    }

    /// List, probe and write `<category>.md`.
    pub fn generate_category_page(&self, category: &str) -> Result<PageReport, GenerateError> {
        let presets = scan::list_presets(self.root, category, self.config)?;
        let rows = resolve_thumbnails(
            category,
            &presets,
            self.probe,
            &self.config.assets.missing_thumbnail,
        );
        let missing_thumbnails = rows.iter().filter(|r| !r.outcome.is_found()).count();

        let content = render_category_page(category, &rows, self.config);
        let path = self.write_page(&format!("{category}.md"), &content)?;
        tracing::info!(
            path = %path.display(),
            presets = presets.len(),
            missing_thumbnails,
            "wrote category page"
        );

        Ok(PageReport {
            category: category.to_string(),
            path,
            presets: presets.len(),
            missing_thumbnails,
        })
    }

    fn write_page(&self, filename: &str, content: &str) -> Result<PathBuf, GenerateError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }
}

// ============================================================================
// Page rendering
// ============================================================================

/// Heading shared by every page. The trailing double space is a Markdown hard break.
fn page_header(title: &str) -> String {
    format!("# {title}  \n\n")
}

/// Escape brackets so a category name cannot close a Markdown link early.
fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Render the index page.
pub fn render_index(categories: &[String], config: &SiteConfig) -> String {
    let mut content = page_header(&config.site.title);
    content.push_str("## Categories  \n\n");
    for category in categories {
        let url = join_url(&config.site.pages_url, [category.as_str()]);
        content.push_str(&format!(
            "# [{}]({})  \n\n___\n\n",
            escape_link_text(category),
            url
        ));
    }
    content
}

/// Render one category page from already-resolved rows.
pub fn render_category_page(
    category: &str,
    rows: &[ResolvedPreset<'_>],
    config: &SiteConfig,
) -> String {
    let mut content = page_header(&config.site.title);
    content.push_str(&format!(
        "## [< Back]({}/) :: {}\n\n___\n\n",
        config.site.pages_url,
        escape_link_text(category)
    ));
    content.push_str(&preset_table(rows).into_string());
    content.push('\n');
    content
}

/// Thumbnail on the left, name / author / download on the right.
fn preset_table(rows: &[ResolvedPreset<'_>]) -> Markup {
    html! {
        table cellpadding="10" {
            thead {
                tr {
                    th { "Image" }
                    th { "Description" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td width="50%" {
                            img src=(row.thumbnail);
                        }
                        td valign="top" width="50%" {
                            b { "Name:" } " " (row.preset.name) " " br; " "
                            b { "Author:" } " " (row.preset.author) " " br; " "
                            b { a href=(row.preset.download_url) { "Download" } }
                        }
                    }
                }
            }
        }
    }
}
