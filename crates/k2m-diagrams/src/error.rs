//! Error types for link encoding.

use std::path::PathBuf;

/// Error while turning a diagram source into a Kroki link.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Diagram source could not be read as UTF-8 text.
    #[error("failed to read diagram source {}: {source}", path.display())]
    Read {
        /// Path of the diagram source.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Compressing the diagram source failed.
    #[error("failed to compress diagram source: {0}")]
    Compress(#[source] std::io::Error),
}
