//! Error types for discovery operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a discovery run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file whose logical name reduced to nothing.
    #[error("Invalid file: {path}")]
    InvalidFile { path: PathBuf },

    /// An ignore pattern that is not a valid regular expression.
    #[error("Invalid ignore pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DiscoveryError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The offending path, if the error has one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::InvalidFile { path } => Some(path),
            Self::InvalidPattern { .. } | Self::InvalidConfig { .. } => None,
        }
    }
}
