//! Tree traversal and placeholder location
//!
//! `traverse` renders every paragraph in breadth-first order. Consumers
//! depend on first-match-first semantics when the same token appears in
//! several paragraphs, so the discovery order is part of the contract even
//! where it differs from document order.

use crate::render::{render_paragraph, RenderedParagraph};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wml_tree::{tags, Element, NodePath};

/// Render every paragraph under `root`, breadth-first, top-down
pub fn traverse(root: &Element) -> Vec<RenderedParagraph> {
    let mut rendered = Vec::new();
    let mut queue: VecDeque<(NodePath, &Element)> = VecDeque::new();
    enqueue_children(root, &NodePath::root(), &mut queue);

    while let Some((path, element)) = queue.pop_front() {
        if element.name == tags::PARAGRAPH {
            rendered.push(render_paragraph(element, &path));
        }
        enqueue_children(element, &path, &mut queue);
    }

    rendered
}

fn enqueue_children<'a>(
    element: &'a Element,
    path: &NodePath,
    queue: &mut VecDeque<(NodePath, &'a Element)>,
) {
    for (index, child) in element.children.iter().enumerate() {
        if let Some(child_element) = child.as_element() {
            queue.push_back((path.child(index), child_element));
        }
    }
}

/// Find every paragraph whose rendered text contains `token`
///
/// Literal substring match, no normalization. Result order is discovery
/// order.
pub fn locate_text(root: &Element, token: &str) -> Vec<RenderedParagraph> {
    traverse(root)
        .into_iter()
        .filter(|paragraph| paragraph.contains(token))
        .collect()
}

/// A style-reference node found in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReference {
    /// Path from the tree root to the reference node
    pub path: NodePath,
    /// The referenced style id (the node's value attribute)
    pub value: String,
}

/// Collect every node named `reference_tag` that carries a style-value
/// attribute, in pre-order
pub fn locate_style_references(root: &Element, reference_tag: &str) -> Vec<StyleReference> {
    let mut references = Vec::new();
    collect_references(root, &NodePath::root(), reference_tag, &mut references);
    references
}

fn collect_references(
    element: &Element,
    path: &NodePath,
    reference_tag: &str,
    out: &mut Vec<StyleReference>,
) {
    for (index, child) in element.children.iter().enumerate() {
        let Some(child_element) = child.as_element() else {
            continue;
        };
        let child_path = path.child(index);
        if child_element.name == reference_tag {
            if let Some(value) = child_element.attribute(tags::VAL) {
                out.push(StyleReference {
                    path: child_path.clone(),
                    value: value.to_string(),
                });
            }
        }
        collect_references(child_element, &child_path, reference_tag, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Element {
        Element::new(tags::PARAGRAPH)
            .with_child(Element::new(tags::RUN).with_child(Element::new(tags::TEXT).with_text(text)))
    }

    fn body() -> Element {
        Element::new(tags::BODY)
            .with_child(para("first"))
            .with_child(
                Element::new("w:tbl").with_child(
                    Element::new("w:tr")
                        .with_child(Element::new("w:tc").with_child(para("nested cell"))),
                ),
            )
            .with_child(para("last"))
    }

    #[test]
    fn test_traverse_is_breadth_first() {
        let rendered = traverse(&body());
        // Both top-level paragraphs are discovered before the one nested in
        // the table, even though the table precedes the last paragraph.
        let texts: Vec<&str> = rendered.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "last", "nested cell"]);
    }

    #[test]
    fn test_locate_text_is_literal_substring() {
        let root = body();
        assert_eq!(locate_text(&root, "cell").len(), 1);
        assert_eq!(locate_text(&root, "CELL").len(), 0);
        assert_eq!(locate_text(&root, "st").len(), 3);
        assert!(locate_text(&root, "absent").is_empty());
    }

    #[test]
    fn test_locate_text_paths_resolve() {
        let root = body();
        for paragraph in locate_text(&root, "st") {
            let element = paragraph.path.resolve(&root).unwrap();
            assert_eq!(element.name, tags::PARAGRAPH);
        }
    }

    #[test]
    fn test_locate_style_references_pre_order() {
        let root = Element::new(tags::BODY)
            .with_child(
                para("a").with_child(
                    Element::new(tags::PARAGRAPH_PROPERTIES)
                        .with_child(Element::new(tags::PARAGRAPH_STYLE).with_attribute(tags::VAL, "Heading1")),
                ),
            )
            .with_child(
                para("b").with_child(
                    Element::new(tags::PARAGRAPH_PROPERTIES)
                        .with_child(Element::new(tags::PARAGRAPH_STYLE).with_attribute(tags::VAL, "Normal")),
                ),
            );

        let references = locate_style_references(&root, tags::PARAGRAPH_STYLE);
        let values: Vec<&str> = references.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["Heading1", "Normal"]);

        // A reference node without the value attribute is ignored
        let bare = Element::new(tags::BODY)
            .with_child(Element::new(tags::PARAGRAPH_STYLE));
        assert!(locate_style_references(&bare, tags::PARAGRAPH_STYLE).is_empty());
    }
}
