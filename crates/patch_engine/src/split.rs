//! Run splitting and in-paragraph token rewriting
//!
//! A placeholder can straddle several runs. The replacer first rewrites the
//! token to a single-character sentinel (collapsing it into one run), then
//! splits that run at the sentinel into left/right fragments so replacement
//! content can be spliced between them.

use crate::error::{PatchError, PatchResult};
use crate::render::{run_text, RenderedParagraph};
use wml_tree::{tags, Element, XmlNode};

/// The two fragments of a run split at a token boundary
#[derive(Debug, Clone)]
pub struct SplitRun {
    /// The run carrying the text before the token
    pub left: Element,
    /// The run carrying the text after the token
    pub right: Element,
}

/// Index of the first direct child run whose text contains `token`
pub fn find_run_with_token(paragraph: &Element, token: &str) -> Option<usize> {
    paragraph.children.iter().position(|child| {
        child
            .as_element()
            .is_some_and(|element| element.name == tags::RUN && run_text(element).contains(token))
    })
}

/// Split a run at `token` into left and right fragments
///
/// The token must occur in one of the run's own text elements; the caller
/// guarantees uniqueness by rewriting the placeholder to a sentinel first.
/// Children preceding the split text element (the run-property block among
/// them) stay on `left`; children following it move to `right`. An empty
/// text fragment is kept rather than omitted, so a token at either edge of
/// the run still yields a fragment that carries text content.
pub fn split_run(run: &Element, token: &str) -> PatchResult<SplitRun> {
    let split_index = run
        .children
        .iter()
        .position(|child| {
            child
                .as_element()
                .is_some_and(|element| element.name == tags::TEXT && element.text().contains(token))
        })
        .ok_or(PatchError::TokenNotInRun)?;

    let text_element = match &run.children[split_index] {
        XmlNode::Element(element) => element,
        XmlNode::Text(_) => return Err(PatchError::TokenNotInRun),
    };
    let text = text_element.text();
    let at = text.find(token).ok_or(PatchError::TokenNotInRun)?;
    let before = &text[..at];
    let after = &text[at + token.len()..];

    let mut left = Element::new(run.name.clone());
    left.attributes = run.attributes.clone();
    let mut right = left.clone();

    for child in &run.children[..split_index] {
        left.children.push(child.clone());
    }
    left.children
        .push(XmlNode::Element(split_text_element(text_element, before)));

    right
        .children
        .push(XmlNode::Element(split_text_element(text_element, after)));
    for child in &run.children[split_index + 1..] {
        right.children.push(child.clone());
    }

    Ok(SplitRun { left, right })
}

/// A copy of a text element with new content and whitespace preserved
fn split_text_element(original: &Element, content: &str) -> Element {
    let mut element = Element::new(original.name.clone());
    element.attributes = original.attributes.clone();
    element.set_attribute(tags::XML_SPACE, "preserve");
    element.push_text(content);
    element
}

/// Rewrite one occurrence of `token` in a rendered paragraph to `replacement`
///
/// Works through the run spans covering the token: the covered characters
/// are deleted from each affected run, and the replacement is inserted at
/// the position where the token began. Runs outside the token's interval
/// are untouched.
pub fn replace_token_in_paragraph(
    tree: &mut Element,
    rendered: &RenderedParagraph,
    token: &str,
    replacement: &str,
) -> PatchResult<()> {
    let byte_start = match rendered.text.find(token) {
        Some(index) => index,
        None => return Err(PatchError::TokenNotInRun),
    };
    let char_start = rendered.text[..byte_start].chars().count();
    let char_end = char_start + token.chars().count();

    for span in &rendered.runs {
        let overlaps = span.start < char_end && span.end > char_start;
        let holds_insertion = span.start <= char_start && char_start < span.end;
        if !overlaps && !holds_insertion {
            continue;
        }

        let local_start = char_start.saturating_sub(span.start);
        let local_end = char_end.saturating_sub(span.start).min(span.end - span.start);
        let insert = holds_insertion.then_some(replacement);

        let run = span
            .path
            .resolve_mut(tree)
            .ok_or_else(|| PatchError::StalePath(span.path.to_string()))?;
        edit_run_text(run, local_start, local_end, insert);
    }

    Ok(())
}

/// Delete the character range `[local_start, local_end)` from a run's text,
/// optionally inserting `insert` where the range began
fn edit_run_text(run: &mut Element, local_start: usize, local_end: usize, insert: Option<&str>) {
    let mut text_elements = Vec::new();
    collect_text_elements_mut(run, &mut text_elements);

    let mut offset = 0usize;
    let mut pending_insert = insert;
    for element in text_elements {
        let current = element.text();
        let length = current.chars().count();
        let element_start = offset;
        let element_end = offset + length;
        offset = element_end;

        let overlaps = local_start < element_end && local_end > element_start;
        let insert_here = pending_insert.is_some()
            && local_start >= element_start
            && local_start <= element_end;
        if !overlaps && !insert_here {
            continue;
        }

        let prefix_len = local_start.saturating_sub(element_start).min(length);
        let suffix_from = local_end.saturating_sub(element_start).min(length);
        let mut new_text: String = current.chars().take(prefix_len).collect();
        if insert_here {
            new_text.push_str(pending_insert.take().unwrap_or(""));
        }
        new_text.extend(current.chars().skip(suffix_from));

        set_text_content(element, new_text);
    }
}

fn collect_text_elements_mut<'a>(element: &'a mut Element, out: &mut Vec<&'a mut Element>) {
    for child in element.children.iter_mut() {
        if let XmlNode::Element(child_element) = child {
            if child_element.name == tags::TEXT {
                out.push(child_element);
            } else {
                collect_text_elements_mut(child_element, out);
            }
        }
    }
}

fn set_text_content(element: &mut Element, text: String) {
    let needs_preserve = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
    element.children.clear();
    if needs_preserve {
        element.set_attribute(tags::XML_SPACE, "preserve");
    }
    element.push_text(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_paragraph;
    use wml_tree::NodePath;

    fn styled_run(text: &str) -> Element {
        Element::new(tags::RUN)
            .with_child(Element::new(tags::RUN_PROPERTIES).with_child(Element::new("w:i")))
            .with_child(Element::new(tags::TEXT).with_text(text))
    }

    #[test]
    fn test_split_run_in_the_middle() {
        let run = styled_run("before\u{e000}after");
        let split = split_run(&run, "\u{e000}").unwrap();

        assert_eq!(run_text(&split.left), "before");
        assert_eq!(run_text(&split.right), "after");
        // Properties stay on the left fragment; the right starts at the text
        assert!(split.left.find_child(tags::RUN_PROPERTIES).is_some());
        assert!(split.right.find_child(tags::RUN_PROPERTIES).is_none());
    }

    #[test]
    fn test_split_run_at_the_edges() {
        let at_start = split_run(&styled_run("\u{e000}tail"), "\u{e000}").unwrap();
        assert_eq!(run_text(&at_start.left), "");
        assert_eq!(run_text(&at_start.right), "tail");
        // The empty fragment still carries a text element
        assert!(at_start.left.find_child(tags::TEXT).is_some());

        let at_end = split_run(&styled_run("head\u{e000}"), "\u{e000}").unwrap();
        assert_eq!(run_text(&at_end.left), "head");
        assert_eq!(run_text(&at_end.right), "");
        assert!(at_end.right.find_child(tags::TEXT).is_some());
    }

    #[test]
    fn test_split_run_preserves_whitespace() {
        let run = styled_run("one \u{e000} two");
        let split = split_run(&run, "\u{e000}").unwrap();
        let left_text = split.left.find_child(tags::TEXT).unwrap();
        assert_eq!(left_text.attribute(tags::XML_SPACE), Some("preserve"));
        assert_eq!(run_text(&split.left), "one ");
        assert_eq!(run_text(&split.right), " two");
    }

    #[test]
    fn test_split_run_requires_token() {
        assert!(matches!(
            split_run(&styled_run("plain"), "\u{e000}"),
            Err(PatchError::TokenNotInRun)
        ));
    }

    #[test]
    fn test_replace_token_spanning_runs() {
        let mut para = Element::new(tags::PARAGRAPH)
            .with_child(styled_run("ti"))
            .with_child(styled_run("tle"))
            .with_child(styled_run(" X"));
        let rendered = render_paragraph(&para, &NodePath::root());

        replace_token_in_paragraph(&mut para, &rendered, "title", "\u{e000}").unwrap();

        let after = render_paragraph(&para, &NodePath::root());
        assert_eq!(after.text, "\u{e000} X");
        // The sentinel landed in the run where the token began
        assert_eq!(run_text(para.children[0].as_element().unwrap()), "\u{e000}");
        assert_eq!(run_text(para.children[1].as_element().unwrap()), "");
        // The trailing run is untouched
        assert_eq!(
            para.children[2].as_element().unwrap(),
            &styled_run(" X")
        );
    }

    #[test]
    fn test_replace_token_within_one_run() {
        let mut para = Element::new(tags::PARAGRAPH).with_child(styled_run("Dear {{name}},"));
        let rendered = render_paragraph(&para, &NodePath::root());

        replace_token_in_paragraph(&mut para, &rendered, "{{name}}", "\u{e000}").unwrap();

        assert_eq!(render_paragraph(&para, &NodePath::root()).text, "Dear \u{e000},");
    }
}
