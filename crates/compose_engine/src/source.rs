//! Source documents and body-element copy semantics
//!
//! A source body holds two kinds of element. Content with a known typed
//! structure is deep-copied before the composer mutates it, so the source
//! document stays untouched. Imported fragments are opaque and can be
//! large, so they are shared by reference instead; mutation goes through
//! `Arc::make_mut`, which clones only while the fragment is still aliased —
//! copy-on-write for fragments shared across a batch of merges.

use patch_engine::{extract_styles, StyleInfo};
use std::sync::Arc;
use wml_tree::{tags, Element, XmlNode};

/// One top-level body element of a source document
#[derive(Debug, Clone)]
pub enum BodyElement {
    /// Typed content; deep-copied before mutation
    Native(Element),
    /// Opaque imported fragment; shared by reference, copy-on-write
    Imported(Arc<Element>),
}

impl BodyElement {
    /// The element's tag name
    pub fn name(&self) -> &str {
        &self.element().name
    }

    /// A view of the element, whichever variant holds it
    pub fn element(&self) -> &Element {
        match self {
            BodyElement::Native(element) => element,
            BodyElement::Imported(shared) => shared,
        }
    }

    /// Obtain a tree the composer may mutate
    ///
    /// Native content is cloned outright. Imported fragments hand out their
    /// shared handle; a later `Arc::make_mut` clones only if the fragment is
    /// still referenced elsewhere.
    pub(crate) fn working_copy(&self) -> Arc<Element> {
        match self {
            BodyElement::Native(element) => Arc::new(element.clone()),
            BodyElement::Imported(shared) => Arc::clone(shared),
        }
    }
}

/// A source document ready for composition: its body elements plus its
/// style definitions
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    body: Vec<BodyElement>,
    styles: Element,
}

impl SourceDocument {
    /// An empty source with the given style definitions
    pub fn new(styles: Element) -> Self {
        Self {
            body: Vec::new(),
            styles,
        }
    }

    /// Build a source from a parsed document tree and its style definitions
    ///
    /// Consumes the tree: the body's element children become imported
    /// fragments without copying. A tree with no body yields an empty
    /// source, logged, never an error.
    pub fn from_parts(mut document: Element, styles: Element) -> Self {
        let mut source = Self::new(styles);

        let body = if document.name == tags::BODY {
            Some(&mut document)
        } else {
            document.find_descendant_mut(tags::BODY)
        };
        match body {
            Some(body) => {
                for child in body.children.drain(..) {
                    if let XmlNode::Element(element) = child {
                        source.body.push(BodyElement::Imported(Arc::new(element)));
                    }
                }
            }
            None => {
                tracing::warn!("source document has no body element; nothing to merge");
            }
        }

        source
    }

    /// Append typed content to the body
    pub fn push_native(&mut self, element: Element) {
        self.body.push(BodyElement::Native(element));
    }

    /// Append a shared imported fragment to the body
    pub fn push_imported(&mut self, fragment: Arc<Element>) {
        self.body.push(BodyElement::Imported(fragment));
    }

    /// The body elements, in document order
    pub fn body(&self) -> &[BodyElement] {
        &self.body
    }

    /// The style-definitions tree
    pub fn styles(&self) -> &Element {
        &self.styles
    }

    /// Extract the identity of every style this document defines
    pub fn style_infos(&self) -> Vec<StyleInfo> {
        extract_styles(&self.styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wml_tree::parse_document;

    const DOCUMENT_XML: &str = r#"<w:document><w:body>
        <w:p><w:r><w:t>one</w:t></w:r></w:p>
        <w:tbl/>
        <w:sectPr/>
    </w:body></w:document>"#;

    #[test]
    fn test_from_parts_extracts_body_elements() {
        let document = parse_document(DOCUMENT_XML).unwrap();
        let source = SourceDocument::from_parts(document, Element::new(tags::STYLES));

        // Section properties are kept here; the composer filters them
        let names: Vec<&str> = source.body().iter().map(BodyElement::name).collect();
        assert_eq!(names, vec!["w:p", "w:tbl", "w:sectPr"]);
    }

    #[test]
    fn test_from_parts_without_body_is_empty() {
        let source =
            SourceDocument::from_parts(Element::new("w:fragment"), Element::new(tags::STYLES));
        assert!(source.body().is_empty());
    }

    #[test]
    fn test_working_copy_semantics() {
        let element = Element::new(tags::PARAGRAPH);

        // Native: an independent deep copy
        let native = BodyElement::Native(element.clone());
        let mut copy = native.working_copy();
        Arc::make_mut(&mut copy).set_attribute("w:rsidR", "0");
        assert!(native.element().attributes.is_empty());

        // Imported: shared until written to, then cloned
        let shared = Arc::new(element);
        let imported = BodyElement::Imported(Arc::clone(&shared));
        let mut copy = imported.working_copy();
        assert_eq!(Arc::strong_count(&shared), 3);
        Arc::make_mut(&mut copy).set_attribute("w:rsidR", "0");
        assert!(shared.attributes.is_empty());
        assert_eq!(copy.attribute("w:rsidR"), Some("0"));
    }
}
