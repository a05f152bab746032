//! Image placeholder substitution.

use k2m_diagrams::LinkMapping;

use crate::document::Document;

/// Placeholder text matched in document lines: `![<name>]`.
#[must_use]
pub fn placeholder(name: &str) -> String {
    format!("![{name}]")
}

/// Replacement line for a diagram: `![<name>](<link>)` plus newline.
#[must_use]
pub fn image_line(name: &str, link: &str) -> String {
    format!("![{name}]({link})\n")
}

/// A single rewritten line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// One-based line number.
    pub line_number: usize,
    /// Mapping name whose placeholder matched.
    pub name: String,
    /// Original line, terminator included.
    pub before: String,
    /// Rewritten line.
    pub after: String,
}

/// Outcome of [`substitute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Rewritten document, same line count as the input.
    pub document: Document,
    /// Rewritten lines in document order.
    pub replacements: Vec<Replacement>,
}

impl Substitution {
    /// Whether any line was rewritten.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.replacements.is_empty()
    }
}

/// Replace diagram placeholders in a document.
///
/// For every line, mapping entries are tried in mapping order and the first
/// entry whose placeholder occurs anywhere in the line replaces the whole
/// line with [`image_line`]. A line holding several placeholders is rewritten
/// by the entry that comes first in the mapping, regardless of where each
/// placeholder sits in the line. Lines without a match are kept verbatim.
#[must_use]
pub fn substitute(document: &Document, mapping: &LinkMapping) -> Substitution {
    let placeholders: Vec<_> = mapping
        .iter()
        .map(|(name, link)| (name, placeholder(name), link))
        .collect();

    let mut replacements = Vec::new();
    let lines = document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let matched = placeholders
                .iter()
                .find(|(_, needle, _)| line.contains(needle.as_str()));

            let Some((name, _, link)) = matched else {
                return line.clone();
            };

            let after = image_line(name, link.as_str());
            tracing::debug!(line = index + 1, name = %name, "Replacing placeholder");
            replacements.push(Replacement {
                line_number: index + 1,
                name: (*name).to_owned(),
                before: line.clone(),
                after: after.clone(),
            });
            after
        })
        .collect();

    Substitution {
        document: Document::from_lines(lines),
        replacements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k2m_diagrams::{DiagramFormat, DiagramLanguage, KrokiLink};
    use pretty_assertions::assert_eq;

    fn link(source: &str) -> KrokiLink {
        KrokiLink::new(
            "https://kroki.io",
            DiagramLanguage::Mermaid,
            DiagramFormat::Svg,
            source,
        )
        .unwrap()
    }

    fn mapping(entries: &[(&str, &str)]) -> LinkMapping {
        let mut mapping = LinkMapping::new();
        for (name, source) in entries {
            mapping.insert(*name, link(source));
        }
        mapping
    }

    #[test]
    fn test_placeholder_and_image_line() {
        assert_eq!(placeholder("a.mmd"), "![a.mmd]");
        assert_eq!(image_line("a.mmd", "https://x/y"), "![a.mmd](https://x/y)\n");
    }

    #[test]
    fn test_no_match_is_identical() {
        let text = "# Title\r\n\nSome text with ![other.png](x.png)\n![b.mmd]\nno newline";
        let doc = Document::parse(text);

        let result = substitute(&doc, &mapping(&[("a.mmd", "graph TD; A;")]));

        assert_eq!(result.document.to_text(), text);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_empty_mapping_is_identical() {
        let text = "![a.mmd]\n";
        let result = substitute(&Document::parse(text), &LinkMapping::new());
        assert_eq!(result.document.to_text(), text);
    }

    #[test]
    fn test_replaces_whole_line() {
        let map = mapping(&[("diagram.mmd", "graph TD; A-->B;")]);
        let expected_link = map.get("diagram.mmd").unwrap().to_string();
        let doc = Document::parse("intro\nSee ![diagram.mmd] below, please\noutro\n");

        let result = substitute(&doc, &map);

        assert_eq!(
            result.document.lines(),
            [
                "intro\n".to_owned(),
                format!("![diagram.mmd]({expected_link})\n"),
                "outro\n".to_owned(),
            ]
        );
        assert_eq!(
            result.replacements,
            vec![Replacement {
                line_number: 2,
                name: "diagram.mmd".to_owned(),
                before: "See ![diagram.mmd] below, please\n".to_owned(),
                after: format!("![diagram.mmd]({expected_link})\n"),
            }]
        );
    }

    #[test]
    fn test_existing_link_is_refreshed() {
        let map = mapping(&[("a.mmd", "graph TD; new;")]);
        let expected_link = map.get("a.mmd").unwrap().to_string();
        let doc = Document::parse("![a.mmd](https://kroki.io/mermaid/svg/old)\n");

        let result = substitute(&doc, &map);

        assert_eq!(result.document.to_text(), format!("![a.mmd]({expected_link})\n"));
    }

    #[test]
    fn test_last_line_without_newline_gains_one() {
        let map = mapping(&[("a.mmd", "graph TD; A;")]);
        let expected_link = map.get("a.mmd").unwrap().to_string();

        let result = substitute(&Document::parse("text\n![a.mmd]"), &map);

        assert_eq!(
            result.document.to_text(),
            format!("text\n![a.mmd]({expected_link})\n")
        );
    }

    #[test]
    fn test_line_count_preserved() {
        let map = mapping(&[("a.mmd", "A"), ("b.mmd", "B")]);
        let doc = Document::parse("![a.mmd]\nx\n![b.mmd]\n\n![a.mmd]\n");

        let result = substitute(&doc, &map);

        assert_eq!(result.document.len(), doc.len());
        let numbers: Vec<_> = result.replacements.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, [1, 3, 5]);
    }

    #[test]
    fn test_mapping_order_decides_between_placeholders() {
        // `b.mmd` comes first in the mapping, so it wins even though
        // `a.mmd` appears first in the line.
        let map = mapping(&[("b.mmd", "B"), ("a.mmd", "A")]);
        let b_link = map.get("b.mmd").unwrap().to_string();
        let doc = Document::parse("![a.mmd] and ![b.mmd]\n");

        let result = substitute(&doc, &map);

        assert_eq!(result.document.to_text(), format!("![b.mmd]({b_link})\n"));
        assert_eq!(result.replacements.len(), 1);
        assert_eq!(result.replacements[0].name, "b.mmd");
    }

    #[test]
    fn test_brackets_are_required() {
        let map = mapping(&[("a.mmd", "A")]);
        let doc = Document::parse("a.mmd\n[a.mmd]\n!a.mmd]\n");

        let result = substitute(&doc, &map);

        assert!(!result.has_changes());
    }

    #[test]
    fn test_name_is_matched_exactly() {
        let map = mapping(&[("a.mmd", "A")]);
        let doc = Document::parse("![xa.mmd]\n![a.mmd.bak]\n");

        let result = substitute(&doc, &map);

        assert!(!result.has_changes());
    }
}
