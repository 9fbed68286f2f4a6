//! Page stylesheet.
//!
//! Exactly one source is used, chosen by configuration at startup: the
//! stylesheet compiled into the binary, or a file on disk. A configured
//! file that cannot be read is a startup error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Stylesheet compiled into the binary.
pub const EMBEDDED_CSS: &str = crate::server::assets::CSS;

/// Where the stylesheet comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StylesheetSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl StylesheetSource {
    /// Parse the `PORTFOLIO_STYLESHEET` form: `embedded` or a file path.
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "" | "embedded" => Self::Embedded,
            path => Self::File(PathBuf::from(path)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Embedded => "embedded".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read stylesheet {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loaded CSS, cheap to clone into handlers.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    css: Arc<str>,
}

impl Stylesheet {
    pub fn embedded() -> Self {
        Self {
            css: Arc::from(EMBEDDED_CSS),
        }
    }

    pub fn load(source: &StylesheetSource) -> Result<Self, StyleError> {
        match source {
            StylesheetSource::Embedded => Ok(Self::embedded()),
            StylesheetSource::File(path) => Self::from_file(path),
        }
    }

    fn from_file(path: &Path) -> Result<Self, StyleError> {
        let css = std::fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded stylesheet from {} ({} bytes)", path.display(), css.len());
        Ok(Self {
            css: Arc::from(css),
        })
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}
