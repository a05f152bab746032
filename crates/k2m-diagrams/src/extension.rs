//! File extension to diagram language resolution.

use std::collections::HashMap;
use std::path::Path;

use crate::language::DiagramLanguage;

/// Built-in extension table.
const DEFAULT_EXTENSIONS: &[(&str, DiagramLanguage)] = &[
    ("mmd", DiagramLanguage::Mermaid),
    ("mermaid", DiagramLanguage::Mermaid),
    ("puml", DiagramLanguage::PlantUml),
    ("plantuml", DiagramLanguage::PlantUml),
    ("pu", DiagramLanguage::PlantUml),
    ("iuml", DiagramLanguage::PlantUml),
    ("c4puml", DiagramLanguage::C4PlantUml),
    ("dot", DiagramLanguage::GraphViz),
    ("gv", DiagramLanguage::GraphViz),
    ("ditaa", DiagramLanguage::Ditaa),
    ("blockdiag", DiagramLanguage::BlockDiag),
    ("seqdiag", DiagramLanguage::SeqDiag),
    ("actdiag", DiagramLanguage::ActDiag),
    ("nwdiag", DiagramLanguage::NwDiag),
    ("packetdiag", DiagramLanguage::PacketDiag),
    ("rackdiag", DiagramLanguage::RackDiag),
    ("erd", DiagramLanguage::Erd),
    ("nomnoml", DiagramLanguage::Nomnoml),
    ("bob", DiagramLanguage::Svgbob),
    ("vega", DiagramLanguage::Vega),
    ("vl", DiagramLanguage::VegaLite),
    ("vegalite", DiagramLanguage::VegaLite),
    ("wavedrom", DiagramLanguage::WaveDrom),
];

/// Split a path into its base name and extension.
///
/// The extension is the text after the last `.` of the base name, so a
/// dotfile such as `.mmd` has the extension `mmd`. Base names without a `.`
/// have no extension.
#[must_use]
pub fn split_file_name(path: &Path) -> (String, Option<String>) {
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned();
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_owned());
    (name, extension)
}

/// Mapping from file extension (without the leading dot) to diagram language.
///
/// Lookups are case-sensitive.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
    entries: HashMap<String, DiagramLanguage>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        let entries = DEFAULT_EXTENSIONS
            .iter()
            .map(|(ext, lang)| ((*ext).to_owned(), *lang))
            .collect();
        Self { entries }
    }
}

impl ExtensionMap {
    /// Add or replace the language for an extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>, language: DiagramLanguage) -> Self {
        self.insert(extension, language);
        self
    }

    /// Add or replace the language for an extension.
    pub fn insert(&mut self, extension: impl Into<String>, language: DiagramLanguage) {
        self.entries.insert(extension.into(), language);
    }

    /// Language registered for an extension.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<DiagramLanguage> {
        self.entries.get(extension).copied()
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no extension is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
