//! Thumbnail existence checks.
//!
//! Every preset expects a thumbnail at `images/<category>/<stem>.jpg` on the
//! raw-content host, but contributors often forget to upload one. Before a
//! page links an image it asks a [`ThumbnailProbe`] whether the file is
//! there; anything other than [`ProbeOutcome::Found`] swaps in the
//! placeholder thumbnail.
//!
//! | Mode | Probe | Check |
//! |------|-------|-------|
//! | `remote` | [`HttpProbe`] | `GET` on the thumbnail URL, status must be 200 |
//! | `local` | [`LocalProbe`] | thumbnail file exists under the repository root |
//! | `none` | [`AssumePresent`] | no check, every thumbnail is used |
//!
//! Remote requests run one at a time with a fixed timeout and are never
//! retried. A probe never fails the run: transport errors become
//! [`ProbeOutcome::Unreachable`].

use crate::types::Preset;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result of checking one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found,
    /// Server answered with a non-200 status, or the local file is absent.
    Missing(Option<u16>),
    TimedOut,
    /// Connection, DNS, TLS or other transport failure.
    Unreachable(String),
}

impl ProbeOutcome {
    /// Only a found thumbnail is linked; every other outcome uses the placeholder.
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Found => write!(f, "found"),
            ProbeOutcome::Missing(Some(status)) => write!(f, "missing (HTTP {status})"),
            ProbeOutcome::Missing(None) => write!(f, "missing"),
            ProbeOutcome::TimedOut => write!(f, "timed out"),
            ProbeOutcome::Unreachable(reason) => write!(f, "unreachable: {reason}"),
        }
    }
}

/// Decides whether a preset's thumbnail exists.
pub trait ThumbnailProbe {
    fn probe(&self, preset: &Preset) -> ProbeOutcome;
}

/// How thumbnails are checked, selected with `--probe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProbeMode {
    /// HTTP GET against the raw-content host
    #[default]
    Remote,
    /// Look for the thumbnail file in the local checkout
    Local,
    /// Skip the check and link every thumbnail
    None,
}

/// Build the probe for a mode.
pub fn for_mode(
    mode: ProbeMode,
    root: &Path,
    timeout: Duration,
) -> Result<Box<dyn ThumbnailProbe>, ProbeError> {
    let probe: Box<dyn ThumbnailProbe> = match mode {
        ProbeMode::Remote => Box::new(HttpProbe::new(timeout)?),
        ProbeMode::Local => Box::new(LocalProbe::new(root)),
        ProbeMode::None => Box::new(AssumePresent),
    };
    Ok(probe)
}

/// Blocking HTTP probe with a per-request timeout.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("preset-pages/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Use a preconfigured client (proxy settings, custom TLS, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Check a single URL. The response body is never read.
    pub fn check_url(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send() {
            Ok(response) if response.status() == StatusCode::OK => ProbeOutcome::Found,
            Ok(response) => ProbeOutcome::Missing(Some(response.status().as_u16())),
            Err(e) if e.is_timeout() => ProbeOutcome::TimedOut,
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        }
    }
}

impl ThumbnailProbe for HttpProbe {
    fn probe(&self, preset: &Preset) -> ProbeOutcome {
        self.check_url(&preset.thumbnail_url)
    }
}

/// Checks the thumbnail in a local checkout of the repository.
pub struct LocalProbe {
    root: PathBuf,
}

impl LocalProbe {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl ThumbnailProbe for LocalProbe {
    fn probe(&self, preset: &Preset) -> ProbeOutcome {
        if self.root.join(&preset.thumbnail_path).is_file() {
            ProbeOutcome::Found
        } else {
            ProbeOutcome::Missing(None)
        }
    }
}

/// Treats every thumbnail as present.
pub struct AssumePresent;

impl ThumbnailProbe for AssumePresent {
    fn probe(&self, _preset: &Preset) -> ProbeOutcome {
        ProbeOutcome::Found
    }
}
