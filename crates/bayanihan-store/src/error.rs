//! Store error types.

use std::path::PathBuf;

/// Errors raised while writing the JSON documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File system failure on a specific document.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Document being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
