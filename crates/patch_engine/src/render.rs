//! Paragraph rendering
//!
//! Flattens a paragraph subtree into its visible text plus a
//! character-offset-to-run map. The rendered text is the character-exact
//! concatenation of every run's text content in document order, however
//! deeply a run is nested (hyperlinks, revision wrappers, smart tags).
//! Formatting-only containers contribute nothing. The run spans partition
//! the text with no gaps or overlaps.

use serde::{Deserialize, Serialize};
use wml_tree::{tags, Element, NodePath};

/// The text interval a single run occupies within its paragraph
///
/// Offsets are character counts into [`RenderedParagraph::text`]. An empty
/// run yields an empty span (`start == end`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSpan {
    /// Path from the tree root to the run element
    pub path: NodePath,
    /// First character offset covered by the run
    pub start: usize,
    /// One past the last character offset covered by the run
    pub end: usize,
}

/// A paragraph flattened to its visible text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedParagraph {
    /// Path from the tree root to the paragraph element
    pub path: NodePath,
    /// Concatenation of all run texts under the paragraph, in document order
    pub text: String,
    /// The runs partitioning `text`, in document order
    pub runs: Vec<RunSpan>,
}

impl RenderedParagraph {
    /// Check whether the rendered text contains `token` as a literal substring
    pub fn contains(&self, token: &str) -> bool {
        self.text.contains(token)
    }
}

/// Render one paragraph node located at `path`
///
/// Never fails: a malformed or empty paragraph renders as an empty string
/// with no run spans.
pub fn render_paragraph(paragraph: &Element, path: &NodePath) -> RenderedParagraph {
    let mut text = String::new();
    let mut runs = Vec::new();
    let mut offset = 0usize;
    collect_runs(paragraph, path, &mut text, &mut runs, &mut offset);
    RenderedParagraph {
        path: path.clone(),
        text,
        runs,
    }
}

fn collect_runs(
    element: &Element,
    path: &NodePath,
    text: &mut String,
    runs: &mut Vec<RunSpan>,
    offset: &mut usize,
) {
    for (index, child) in element.children.iter().enumerate() {
        let Some(child_element) = child.as_element() else {
            continue;
        };
        let child_path = path.child(index);
        if child_element.name == tags::RUN {
            let run = run_text(child_element);
            let length = run.chars().count();
            runs.push(RunSpan {
                path: child_path,
                start: *offset,
                end: *offset + length,
            });
            text.push_str(&run);
            *offset += length;
        } else {
            collect_runs(child_element, &child_path, text, runs, offset);
        }
    }
}

/// The visible text of a single run: its text elements' content, in order
pub fn run_text(run: &Element) -> String {
    let mut out = String::new();
    collect_run_text(run, &mut out);
    out
}

fn collect_run_text(element: &Element, out: &mut String) {
    for child in element.child_elements() {
        if child.name == tags::TEXT {
            out.push_str(&child.text());
        } else {
            collect_run_text(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Element {
        Element::new(tags::RUN)
            .with_child(Element::new(tags::RUN_PROPERTIES).with_child(Element::new("w:b")))
            .with_child(Element::new(tags::TEXT).with_text(text))
    }

    #[test]
    fn test_render_concatenates_runs_in_order() {
        let para = Element::new(tags::PARAGRAPH)
            .with_child(run("Hello, "))
            .with_child(run("world"));
        let rendered = render_paragraph(&para, &NodePath::from_indices(vec![0]));

        assert_eq!(rendered.text, "Hello, world");
        assert_eq!(rendered.runs.len(), 2);
        assert_eq!((rendered.runs[0].start, rendered.runs[0].end), (0, 7));
        assert_eq!((rendered.runs[1].start, rendered.runs[1].end), (7, 12));
        assert_eq!(rendered.runs[1].path, NodePath::from_indices(vec![0, 1]));
    }

    #[test]
    fn test_render_reaches_nested_runs() {
        // A run wrapped in a revision-markup container still renders
        let para = Element::new(tags::PARAGRAPH)
            .with_child(run("before "))
            .with_child(Element::new("w:ins").with_child(run("inserted")));
        let rendered = render_paragraph(&para, &NodePath::root());

        assert_eq!(rendered.text, "before inserted");
        assert_eq!(rendered.runs[1].path, NodePath::from_indices(vec![1, 0]));
    }

    #[test]
    fn test_render_spans_partition_text() {
        let para = Element::new(tags::PARAGRAPH)
            .with_child(run("ti"))
            .with_child(run("tle"))
            .with_child(run(" X"));
        let rendered = render_paragraph(&para, &NodePath::root());

        assert_eq!(rendered.text, "title X");
        let mut expected_start = 0;
        for span in &rendered.runs {
            assert_eq!(span.start, expected_start);
            expected_start = span.end;
        }
        assert_eq!(expected_start, rendered.text.chars().count());
    }

    #[test]
    fn test_render_empty_and_malformed_paragraphs() {
        let empty = Element::new(tags::PARAGRAPH);
        assert_eq!(render_paragraph(&empty, &NodePath::root()).text, "");

        // Property-only paragraph: formatting containers carry no text
        let props_only = Element::new(tags::PARAGRAPH)
            .with_child(Element::new(tags::PARAGRAPH_PROPERTIES).with_child(Element::new("w:jc")));
        let rendered = render_paragraph(&props_only, &NodePath::root());
        assert_eq!(rendered.text, "");
        assert!(rendered.runs.is_empty());
    }

    #[test]
    fn test_render_offsets_are_characters_not_bytes() {
        let para = Element::new(tags::PARAGRAPH)
            .with_child(run("Ángel "))
            .with_child(run("Ñandú"));
        let rendered = render_paragraph(&para, &NodePath::root());

        assert_eq!(rendered.text, "Ángel Ñandú");
        assert_eq!((rendered.runs[0].start, rendered.runs[0].end), (0, 6));
        assert_eq!((rendered.runs[1].start, rendered.runs[1].end), (6, 11));
    }
}
