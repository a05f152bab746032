//! Kroki link encoding.
//!
//! Kroki accepts diagram source in the request path: the UTF-8 text is
//! compressed with zlib and encoded with the URL-safe base64 alphabet.
//! See <https://docs.kroki.io/kroki/setup/encode-diagram/>.

use std::fmt;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::error::EncodeError;
use crate::language::{DiagramFormat, DiagramLanguage};

/// Encode diagram source into a Kroki path payload.
///
/// Compresses the UTF-8 bytes with zlib at the best compression level and
/// encodes the result as URL-safe base64 with `=` padding. The output is
/// deterministic for a given input.
pub fn encode_source(source: &str) -> Result<String, EncodeError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(source.as_bytes())
        .map_err(EncodeError::Compress)?;
    let compressed = encoder.finish().map_err(EncodeError::Compress)?;
    Ok(URL_SAFE.encode(compressed))
}

/// Link to a diagram rendered by Kroki.
///
/// Has the form `<base_url>/<language>/<format>/<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrokiLink {
    url: String,
    language: DiagramLanguage,
    format: DiagramFormat,
    payload: String,
}

impl KrokiLink {
    /// Build a link for diagram source.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(
        base_url: &str,
        language: DiagramLanguage,
        format: DiagramFormat,
        source: &str,
    ) -> Result<Self, EncodeError> {
        let payload = encode_source(source)?;
        let url = format!(
            "{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            language.kroki_endpoint(),
            format.as_str(),
            payload
        );
        Ok(Self {
            url,
            language,
            format,
            payload,
        })
    }

    /// Full link URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Diagram language of the link.
    #[must_use]
    pub fn language(&self) -> DiagramLanguage {
        self.language
    }

    /// Output format of the link.
    #[must_use]
    pub fn format(&self) -> DiagramFormat {
        self.format
    }

    /// Encoded source payload (last path segment).
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for KrokiLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Read a diagram source file and build its Kroki link.
///
/// The whole file is read as UTF-8 text; missing, unreadable, or non-UTF-8
/// files produce [`EncodeError::Read`].
pub fn encode_file(
    path: &Path,
    base_url: &str,
    language: DiagramLanguage,
    format: DiagramFormat,
) -> Result<KrokiLink, EncodeError> {
    let source = std::fs::read_to_string(path).map_err(|source| EncodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    KrokiLink::new(base_url, language, format, &source)
}
