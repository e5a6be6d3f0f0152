//! Error types for resource-loading collaborators.
//!
//! Load failures never surface to the viewer's user: hosts log them and the
//! affected viewport simply stays empty. Registry lookups, by contrast, are
//! index-safe by construction and have no error type at all.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a mesh from a model resource.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse model {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("unsupported model format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Failure to load a font family for label measurement.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font data: {path}")]
    InvalidFont { path: PathBuf },
}
