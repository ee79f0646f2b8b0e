//! The document composer
//!
//! Appends a source body to the master body, element by element, in original
//! order. Before an element lands it gets a working copy, its style
//! references are reconciled against the master style set, and any style
//! definition the master lacks is registered from the source's definitions.
//! After the append, two renumbering sweeps restore identifier uniqueness
//! across the whole merged body.

use crate::error::{ComposeError, ComposeResult};
use crate::postprocess::{renumber_bookmarks, renumber_drawing_ids};
use crate::source::SourceDocument;
use patch_engine::{collect_style_references, extract_styles, StyleMapper};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use wml_tree::{tags, Element, XmlNode};

/// Summary of one append call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    /// Body elements appended to the master
    pub appended: usize,
    /// Section-properties elements filtered out
    pub skipped_section_properties: usize,
    /// Style definitions copied from the source into the master set
    pub styles_added: usize,
    /// Style references rewritten to master ids
    pub style_references_rewritten: usize,
    /// Referenced style ids that could not be found in the source's own
    /// style set; those references are left pointing at a nonexistent id
    pub missing_styles: Vec<String>,
    /// Bookmark ids reassigned by the post-merge sweep
    pub bookmarks_renumbered: usize,
    /// Drawing-object ids reassigned by the post-merge sweep
    pub drawing_ids_renumbered: usize,
}

impl AppendOutcome {
    /// One-line description of what the append did
    pub fn summary(&self) -> String {
        format!(
            "Appended {} elements ({} skipped, {} styles added, {} references rewritten, {} missing styles)",
            self.appended,
            self.skipped_section_properties,
            self.styles_added,
            self.style_references_rewritten,
            self.missing_styles.len()
        )
    }
}

/// Merges source document bodies into one master document
///
/// Owns the master's document tree and style definitions for the duration
/// of the composition; `into_parts` hands them back for serialization. One
/// composer must not be shared across concurrent merges; all mapping and
/// counter state is scoped to a single `append` call.
#[derive(Debug)]
pub struct Composer {
    document: Element,
    styles: Element,
    num_id_map: HashMap<String, String>,
    abstract_num_id_map: HashMap<String, String>,
}

impl Composer {
    /// Create a composer around the master's document and style trees
    pub fn new(document: Element, styles: Element) -> Self {
        Self {
            document,
            styles,
            num_id_map: HashMap::new(),
            abstract_num_id_map: HashMap::new(),
        }
    }

    /// The master document tree in its current state
    pub fn document(&self) -> &Element {
        &self.document
    }

    /// The master style-definitions tree in its current state
    pub fn styles(&self) -> &Element {
        &self.styles
    }

    /// Give back the (document, styles) pair for serialization
    pub fn into_parts(self) -> (Element, Element) {
        (self.document, self.styles)
    }

    /// Append a source document's body to the master body
    ///
    /// Elements are processed in original order. Section properties never
    /// merge. A malformed element or an unresolvable style is logged and
    /// recovered locally; it does not stop the remaining elements.
    pub fn append(&mut self, source: &SourceDocument) -> ComposeResult<AppendOutcome> {
        self.reset_reference_mappings();

        let mut mapper = StyleMapper::new();
        let master_styles = extract_styles(&self.styles);
        mapper.build(&source.style_infos(), &master_styles);

        let mut master_style_ids: Vec<String> =
            master_styles.into_iter().map(|style| style.id).collect();

        let mut outcome = AppendOutcome::default();
        for body_element in source.body() {
            if body_element.name() == tags::SECTION_PROPERTIES {
                tracing::debug!("skipping section-properties element");
                outcome.skipped_section_properties += 1;
                continue;
            }

            let mut working = body_element.working_copy();
            self.reconcile_styles(source, &mut working, &mapper, &mut master_style_ids, &mut outcome);

            let body = body_mut(&mut self.document).ok_or(ComposeError::MissingBody)?;
            body.children
                .push(XmlNode::Element(Arc::unwrap_or_clone(working)));
            outcome.appended += 1;
        }

        let body = body_mut(&mut self.document).ok_or(ComposeError::MissingBody)?;
        outcome.bookmarks_renumbered = renumber_bookmarks(body);
        outcome.drawing_ids_renumbered = renumber_drawing_ids(body);

        tracing::debug!(summary = %outcome.summary(), "append complete");
        Ok(outcome)
    }

    /// Reset cross-document reference mappings from any previous append
    fn reset_reference_mappings(&mut self) {
        // TODO: populate these once numbering definitions merge; allocate
        // fresh numbering ids in the master rather than matching by name,
        // which numbering definitions do not have.
        self.num_id_map.clear();
        self.abstract_num_id_map.clear();
    }

    /// Resolve, register, and rewrite every style id an element references
    fn reconcile_styles(
        &mut self,
        source: &SourceDocument,
        working: &mut Arc<Element>,
        mapper: &StyleMapper,
        master_style_ids: &mut Vec<String>,
        outcome: &mut AppendOutcome,
    ) {
        let used = collect_style_references(std::slice::from_ref(working.as_ref()));

        for style_id in used {
            let mapped = mapper.resolve(&style_id);

            if !master_style_ids.iter().any(|id| *id == mapped) {
                match style_definition(source.styles(), &style_id) {
                    Some(definition) => {
                        self.styles.children.push(XmlNode::Element(definition));
                        master_style_ids.push(style_id.clone());
                        outcome.styles_added += 1;
                    }
                    None => {
                        tracing::warn!(
                            style_id = %style_id,
                            "style referenced by source content is missing from its style set"
                        );
                        if !outcome.missing_styles.contains(&style_id) {
                            outcome.missing_styles.push(style_id.clone());
                        }
                    }
                }
            }

            if mapped != style_id {
                let element = Arc::make_mut(working);
                outcome.style_references_rewritten +=
                    rewrite_style_references(element, &style_id, &mapped);
            }
        }
    }
}

/// Locate the body element of a document tree
fn body_mut(document: &mut Element) -> Option<&mut Element> {
    if document.name == tags::BODY {
        return Some(document);
    }
    document.find_descendant_mut(tags::BODY)
}

/// Find a style definition by id and clone it
fn style_definition(styles: &Element, style_id: &str) -> Option<Element> {
    let root = if styles.name == tags::STYLES {
        styles
    } else {
        styles.find_descendant(tags::STYLES)?
    };
    root.child_elements()
        .find(|definition| {
            definition.name == tags::STYLE && definition.attribute(tags::STYLE_ID) == Some(style_id)
        })
        .cloned()
}

/// Rewrite every reference to `old_id` anywhere inside the element
///
/// Covers paragraph-, run-, and table-style references at any nesting depth,
/// not just the element's own property block. Returns the rewrite count.
fn rewrite_style_references(element: &mut Element, old_id: &str, new_id: &str) -> usize {
    let mut rewritten = 0;
    if patch_engine::STYLE_REFERENCE_TAGS.contains(&element.name.as_str())
        && element.attribute(tags::VAL) == Some(old_id)
    {
        element.set_attribute(tags::VAL, new_id);
        rewritten += 1;
    }
    for child in element.child_elements_mut() {
        rewritten += rewrite_style_references(child, old_id, new_id);
    }
    rewritten
}
