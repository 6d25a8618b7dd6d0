//! Error types for backstageify.
//!
//! Library crates use [`BackstageifyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all backstageify operations.
#[derive(Debug, thiserror::Error)]
pub enum BackstageifyError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching the index or a manifest.
    #[error("network error: {0}")]
    Network(String),

    /// JSON/YAML decode error on upstream content.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// YAML serialization error while rendering the catalog stream.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// A manifest is missing an expected field (e.g. `metadata.template`).
    #[error("manifest error: {message}")]
    Manifest { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BackstageifyError>;

impl BackstageifyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create an encode error from any displayable message.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    /// Create a manifest-shape error from any displayable message.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
