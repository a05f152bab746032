//! Kroki link encoding for kroki2md.
//!
//! This crate turns diagram source files into Kroki service links:
//! - [`DiagramLanguage`] and [`DiagramFormat`] describe what Kroki can render
//! - [`ExtensionMap`] resolves file extensions to diagram languages
//! - [`KrokiLink`] holds a link built from zlib-compressed, URL-safe base64 source
//! - [`Converter`] encodes a batch of files into an ordered [`LinkMapping`]
//!
//! # Example
//!
//! ```ignore
//! use k2m_diagrams::{Converter, DiagramFormat, ExtensionMap};
//!
//! let converter = Converter::new("https://kroki.io", DiagramFormat::Svg, ExtensionMap::default());
//! let conversion = converter.convert(&["docs/flow.mmd"])?;
//!
//! for (name, link) in conversion.mapping() {
//!     println!("{name}: {link}");
//! }
//! ```

mod consts;
mod convert;
mod encode;
mod error;
mod extension;
mod language;

pub use consts::DEFAULT_KROKI_URL;
pub use convert::{Conversion, Converter, FileOutcome, LinkMapping, SkipReason};
pub use encode::{KrokiLink, encode_file, encode_source};
pub use error::EncodeError;
pub use extension::{ExtensionMap, split_file_name};
pub use language::{DiagramFormat, DiagramLanguage};
