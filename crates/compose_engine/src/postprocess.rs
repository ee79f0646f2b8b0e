//! Identifier renumbering sweeps
//!
//! After an append, the merged body can hold identifier ranges from both
//! documents. Each sweep walks the whole body in pre-order and reassigns
//! one identifier family sequentially from 1, so ids are unique however the
//! two documents overlapped. Counters are call-scoped values threaded
//! through the walk; nothing is ambient.

use wml_tree::{tags, Element};

/// A fresh sequential id allocator
#[derive(Debug)]
pub(crate) struct Counter {
    next: u64,
    start: u64,
}

impl Counter {
    pub(crate) fn starting_at(start: u64) -> Self {
        Self { next: start, start }
    }

    /// Take the next id
    pub(crate) fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// How many ids have been handed out
    pub(crate) fn assigned(&self) -> usize {
        (self.next - self.start) as usize
    }
}

/// Reassign every bookmark-start id sequentially from 1, in pre-order
///
/// Returns how many bookmarks were renumbered.
pub fn renumber_bookmarks(body: &mut Element) -> usize {
    let mut counter = Counter::starting_at(1);
    renumber_attribute(body, tags::BOOKMARK_START, tags::ID, &mut counter);
    counter.assigned()
}

/// Reassign every drawing-object-properties id sequentially from 1
///
/// Independent counter from the bookmark sweep.
pub fn renumber_drawing_ids(body: &mut Element) -> usize {
    let mut counter = Counter::starting_at(1);
    renumber_attribute(body, tags::DRAWING_PROPERTIES, tags::DOCPR_ID, &mut counter);
    counter.assigned()
}

fn renumber_attribute(element: &mut Element, tag: &str, attribute: &str, counter: &mut Counter) {
    if element.name == tag && element.has_attribute(attribute) {
        element.set_attribute(attribute, counter.advance().to_string());
    }
    for child in element.child_elements_mut() {
        renumber_attribute(child, tag, attribute, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wml_tree::parse_document;

    #[test]
    fn test_bookmarks_renumbered_in_traversal_order() {
        let mut body = parse_document(
            r#"<w:body>
                <w:p><w:bookmarkStart w:id="7" w:name="a"/><w:bookmarkEnd w:id="7"/></w:p>
                <w:p><w:bookmarkStart w:id="2" w:name="b"/></w:p>
                <w:p><w:bookmarkStart w:id="2" w:name="c"/></w:p>
            </w:body>"#,
        )
        .unwrap();

        assert_eq!(renumber_bookmarks(&mut body), 3);

        let ids: Vec<String> = collect_ids(&body, tags::BOOKMARK_START, tags::ID);
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sweeps_use_independent_counters() {
        let mut body = parse_document(
            r#"<w:body>
                <w:p><w:bookmarkStart w:id="9" w:name="a"/></w:p>
                <w:p><w:r><w:drawing><wp:inline><wp:docPr id="9" name="img"/></wp:inline></w:drawing></w:r></w:p>
                <w:p><w:r><w:drawing><wp:inline><wp:docPr id="3" name="img2"/></wp:inline></w:drawing></w:r></w:p>
            </w:body>"#,
        )
        .unwrap();

        assert_eq!(renumber_bookmarks(&mut body), 1);
        assert_eq!(renumber_drawing_ids(&mut body), 2);

        assert_eq!(collect_ids(&body, tags::BOOKMARK_START, tags::ID), vec!["1"]);
        assert_eq!(
            collect_ids(&body, tags::DRAWING_PROPERTIES, tags::DOCPR_ID),
            vec!["1", "2"]
        );
    }

    #[test]
    fn test_nodes_without_the_id_attribute_are_skipped() {
        let mut body =
            parse_document(r#"<w:body><w:p><w:bookmarkStart w:name="orphan"/></w:p></w:body>"#)
                .unwrap();
        assert_eq!(renumber_bookmarks(&mut body), 0);
    }

    fn collect_ids(element: &Element, tag: &str, attribute: &str) -> Vec<String> {
        let mut ids = Vec::new();
        collect(element, tag, attribute, &mut ids);
        ids
    }

    fn collect(element: &Element, tag: &str, attribute: &str, out: &mut Vec<String>) {
        if element.name == tag {
            if let Some(id) = element.attribute(attribute) {
                out.push(id.to_string());
            }
        }
        for child in element.child_elements() {
            collect(child, tag, attribute, out);
        }
    }
}
