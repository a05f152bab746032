//! Error types for document access.

use std::path::PathBuf;

/// Error reading or writing the target markdown document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document could not be read as UTF-8 text.
    #[error("failed to read document {}: {source}", path.display())]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Document could not be written.
    #[error("failed to write document {}: {source}", path.display())]
    Write {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
