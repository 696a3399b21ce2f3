//! # Preset Pages
//!
//! Generates the catalogue pages of a preset repository. The repository
//! layout is the data source: top-level folders are categories, files inside
//! them are presets, and filenames carry the author and preset name.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      repo/        →  categories + presets   (filesystem → metadata)
//! 2. Probe     thumbnails   →  found / placeholder    (HTTP status or local file)
//! 3. Generate  metadata     →  docs/*.md              (index + one page per category)
//! ```
//!
//! Each run rewrites every page from scratch. There is no cache and no state
//! between runs: the pages are a function of the checkout, the config and
//! which thumbnails exist.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists categories and presets, builds download and thumbnail URLs |
//! | [`naming`] | `author_..._name.ext` filename convention parser |
//! | [`urls`] | Percent-encoded URL joining |
//! | [`probe`] | Thumbnail existence checks (HTTP, local checkout, none) |
//! | [`generate`] | Renders and writes `index.md` and the category pages |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | `Manifest`, `Category`, `Preset` shared between stages |
//! | [`output`] | CLI summaries of scan and generate results |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Markdown With Embedded HTML
//!
//! The pages are published through GitHub Pages, which renders Markdown. A
//! Markdown table cannot put an image beside a multi-line description, so the
//! preset list is an HTML table inside the Markdown file, built with Maud.
//!
//! ## Probing With a Timeout
//!
//! Thumbnails are checked one request at a time with a bounded timeout.
//! A slow or dead host costs at most `timeout_secs` per preset and only
//! swaps in the placeholder image; it never fails the run.

pub mod config;
pub mod generate;
pub mod logging;
pub mod naming;
pub mod output;
pub mod probe;
pub mod scan;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
