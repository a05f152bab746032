//! Line-oriented markdown document.

use std::path::Path;

use crate::error::DocumentError;

/// Markdown document as an ordered list of lines.
///
/// Each line keeps its terminator (`\n` or `\r\n`); only the last line may
/// lack one. Joining the lines reproduces the original text exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines, keeping terminators.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    /// Build a document from already split lines.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&text);
        tracing::debug!(path = %path.display(), lines = document.len(), "Read document");
        Ok(document)
    }

    /// Overwrite `path` with the full document.
    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_text()).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), lines = self.len(), "Wrote document");
        Ok(())
    }

    /// Lines with their terminators.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join all lines back into text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}
