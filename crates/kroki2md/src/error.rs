//! CLI error types.

use k2m_config::ConfigError;
use k2m_diagrams::EncodeError;
use k2m_markdown::DocumentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Encode(#[from] EncodeError),

    #[error("{0}")]
    Document(#[from] DocumentError),
}
