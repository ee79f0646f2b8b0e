//! Style identity extraction
//!
//! Reads the id/name/kind triple of every style definition out of a
//! style-definitions tree. Identity is all the patch and compose engines
//! need; definition semantics (fonts, spacing) stay with the definitions
//! themselves and travel as opaque subtrees.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wml_tree::{tags, Element};

/// The kind of content a style applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleKind {
    /// Parse the type attribute of a style definition; unknown values fall
    /// back to paragraph, as document producers do
    pub fn from_type_attr(value: &str) -> Self {
        match value {
            "character" => StyleKind::Character,
            "table" => StyleKind::Table,
            "numbering" => StyleKind::Numbering,
            _ => StyleKind::Paragraph,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Character => "character",
            StyleKind::Table => "table",
            StyleKind::Numbering => "numbering",
        }
    }
}

/// Identity of one style definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleInfo {
    /// Document-local identifier, unique within one document's style set
    pub id: String,
    /// Human-displayed label; the cross-document stable key
    pub name: String,
    pub kind: StyleKind,
}

impl StyleInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// The element names that reference a style by id
pub const STYLE_REFERENCE_TAGS: [&str; 3] =
    [tags::PARAGRAPH_STYLE, tags::RUN_STYLE, tags::TABLE_STYLE];

/// Extract the identity of every style defined in a style-definitions tree
///
/// Accepts either the definitions root itself or a tree containing it.
/// Malformed definitions are skipped, never fatal: a definition without an
/// id is dropped, a missing name falls back to the id, and a tree with no
/// definitions root yields an empty set.
pub fn extract_styles(styles_root: &Element) -> Vec<StyleInfo> {
    let root = if styles_root.name == tags::STYLES {
        styles_root
    } else {
        match styles_root.find_descendant(tags::STYLES) {
            Some(found) => found,
            None => {
                tracing::warn!("no style definitions root found; treating style set as empty");
                return Vec::new();
            }
        }
    };

    let mut styles = Vec::new();
    for definition in root.child_elements().filter(|e| e.name == tags::STYLE) {
        let Some(id) = definition.attribute(tags::STYLE_ID) else {
            tracing::warn!("style definition without an id attribute; skipping");
            continue;
        };
        let kind = definition
            .attribute(tags::TYPE)
            .map(StyleKind::from_type_attr)
            .unwrap_or(StyleKind::Paragraph);
        let name = definition
            .find_child(tags::STYLE_NAME)
            .and_then(|name| name.attribute(tags::VAL))
            .unwrap_or(id)
            .to_string();
        styles.push(StyleInfo::new(id, name, kind));
    }
    styles
}

/// Collect the distinct style ids referenced by serialized content, in
/// first-appearance order
pub fn collect_style_references(elements: &[Element]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for element in elements {
        collect_references(element, &mut seen, &mut ids);
    }
    ids
}

fn collect_references(element: &Element, seen: &mut HashSet<String>, ids: &mut Vec<String>) {
    if STYLE_REFERENCE_TAGS.contains(&element.name.as_str()) {
        if let Some(value) = element.attribute(tags::VAL) {
            if seen.insert(value.to_string()) {
                ids.push(value.to_string());
            }
        }
    }
    for child in element.child_elements() {
        collect_references(child, seen, ids);
    }
}

/// Display names the word-processor family assigns to its built-in style ids
///
/// Serialized patch content references built-in styles by id without
/// carrying their definitions; this supplies the display names those ids
/// resolve to, so they can be matched against a localized master style set.
pub fn builtin_style_infos(ids: &[String]) -> Vec<StyleInfo> {
    ids.iter()
        .map(|id| {
            let name = match id.as_str() {
                "Title" => "Title",
                "Subtitle" => "Subtitle",
                "Normal" => "Normal",
                "Heading1" => "Heading 1",
                "Heading2" => "Heading 2",
                "Heading3" => "Heading 3",
                "Heading4" => "Heading 4",
                "Heading5" => "Heading 5",
                "Heading6" => "Heading 6",
                other => other,
            };
            StyleInfo::new(id.clone(), name, StyleKind::Paragraph)
        })
        .collect()
}
