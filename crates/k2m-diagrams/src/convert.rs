//! Batch conversion of diagram files into a link mapping.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::encode::{KrokiLink, encode_file};
use crate::error::EncodeError;
use crate::extension::{ExtensionMap, split_file_name};
use crate::language::{DiagramFormat, DiagramLanguage};

/// Ordered mapping from diagram base file name to its Kroki link.
///
/// Iteration follows insertion order. Inserting an existing name replaces
/// its link and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMapping {
    links: IndexMap<String, KrokiLink>,
}

impl LinkMapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link, returning the link previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, link: KrokiLink) -> Option<KrokiLink> {
        self.links.insert(name.into(), link)
    }

    /// Link stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KrokiLink> {
        self.links.get(name)
    }

    /// Iterate `(name, link)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KrokiLink)> {
        self.links.iter().map(|(name, link)| (name.as_str(), link))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkMapping {
    type Item = (&'a String, &'a KrokiLink);
    type IntoIter = indexmap::map::Iter<'a, String, KrokiLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Why a file was left out of the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file extension does not map to a diagram language.
    UnsupportedExtension,
    /// Kroki cannot render the language in the requested format.
    UnsupportedFormat {
        language: DiagramLanguage,
        format: DiagramFormat,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension => f.write_str("it is not a supported diagram file"),
            Self::UnsupportedFormat { language, format } => {
                write!(f, "{language} diagrams cannot be rendered as {format}")
            }
        }
    }
}

/// Result of handling one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File was encoded and added to the mapping under `name`.
    Processed {
        path: PathBuf,
        name: String,
        language: DiagramLanguage,
    },
    /// File was skipped with a warning.
    Skipped { path: PathBuf, reason: SkipReason },
}

impl FileOutcome {
    /// Input path this outcome refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Processed { path, .. } | Self::Skipped { path, .. } => path,
        }
    }

    /// Whether the file was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Links produced by a [`Converter`] run, with per-file outcomes.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    mapping: LinkMapping,
    outcomes: Vec<FileOutcome>,
}

impl Conversion {
    /// Base file name to link mapping.
    #[must_use]
    pub fn mapping(&self) -> &LinkMapping {
        &self.mapping
    }

    /// Consume the conversion, keeping only the mapping.
    #[must_use]
    pub fn into_mapping(self) -> LinkMapping {
        self.mapping
    }

    /// Per-file outcomes in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of skipped files.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Whether any file was skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::is_skipped)
    }
}

/// Encodes diagram files into Kroki links.
///
/// # Example
///
/// ```ignore
/// let converter = Converter::new("https://kroki.io", DiagramFormat::Svg, ExtensionMap::default());
/// let conversion = converter.convert(&["flow.mmd", "notes.txt"])?;
///
/// assert!(conversion.mapping().get("flow.mmd").is_some());
/// assert!(conversion.has_warnings());
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    base_url: String,
    format: DiagramFormat,
    extensions: ExtensionMap,
}

impl Converter {
    /// Create a converter for the given Kroki base URL and output format.
    #[must_use]
    pub fn new(base_url: impl Into<String>, format: DiagramFormat, extensions: ExtensionMap) -> Self {
        Self {
            base_url: base_url.into(),
            format,
            extensions,
        }
    }

    /// Convert input files in order.
    ///
    /// Unsupported files are skipped; the first read failure aborts the batch.
    pub fn convert<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Conversion, EncodeError> {
        self.convert_with(inputs, |_| {})
    }

    /// Convert input files in order, reporting each outcome as it happens.
    pub fn convert_with<P, F>(&self, inputs: &[P], mut on_outcome: F) -> Result<Conversion, EncodeError>
    where
        P: AsRef<Path>,
        F: FnMut(&FileOutcome),
    {
        let mut conversion = Conversion::default();

        for input in inputs {
            let path = input.as_ref();
            let outcome = self.convert_one(path, &mut conversion.mapping)?;
            on_outcome(&outcome);
            conversion.outcomes.push(outcome);
        }

        tracing::info!(
            links = conversion.mapping.len(),
            skipped = conversion.warning_count(),
            "Conversion finished"
        );

        Ok(conversion)
    }

    fn convert_one(&self, path: &Path, mapping: &mut LinkMapping) -> Result<FileOutcome, EncodeError> {
        let (name, extension) = split_file_name(path);

        let Some(language) = extension.as_deref().and_then(|ext| self.extensions.get(ext)) else {
            tracing::debug!(path = %path.display(), "Skipping file with unsupported extension");
            return Ok(FileOutcome::Skipped {
                path: path.to_path_buf(),
                reason: SkipReason::UnsupportedExtension,
            });
        };

        if !language.supports(self.format) {
            tracing::debug!(
                path = %path.display(),
                %language,
                format = %self.format,
                "Skipping file with unsupported format"
            );
            return Ok(FileOutcome::Skipped {
                path: path.to_path_buf(),
                reason: SkipReason::UnsupportedFormat {
                    language,
                    format: self.format,
                },
            });
        }

        let link = encode_file(path, &self.base_url, language, self.format)?;
        tracing::debug!(path = %path.display(), %language, "Encoded diagram");

        if mapping.insert(name.clone(), link).is_some() {
            tracing::debug!(name = %name, "Replaced link for duplicate file name");
        }

        Ok(FileOutcome::Processed {
            path: path.to_path_buf(),
            name,
            language,
        })
    }
}
