//! Markdown placeholder substitution for kroki2md.
//!
//! A markdown document references diagrams with image placeholders such as
//! `![flow.mmd]`. [`substitute`] rewrites every line holding a placeholder
//! for a known diagram into a full image reference:
//!
//! ```text
//! ![flow.mmd]            ->  ![flow.mmd](https://kroki.io/mermaid/svg/eNpL...)
//! ```
//!
//! [`Document`] keeps line terminators intact so untouched lines are written
//! back byte for byte.

mod document;
mod error;
mod substitute;

pub use document::Document;
pub use error::DocumentError;
pub use substitute::{Replacement, Substitution, image_line, placeholder, substitute};
