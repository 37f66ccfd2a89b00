//! Library error type.
//!
//! Rule violations are data (`models::Violation`), not errors. `AssetError`
//! covers the conditions that abort a run: unexpected I/O, encode failures,
//! and invalid configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("invalid rule for '{category}': {reason}")]
    InvalidRule { category: String, reason: String },

    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;
