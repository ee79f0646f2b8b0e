//! Patch application
//!
//! One pass per patch definition, each pass independent. A pass locates
//! every paragraph containing the token, then either replaces the whole
//! paragraph (document-kind) or splices replacement content into the token's
//! position inside it (paragraph-kind). Matches are processed one at a time
//! against the current tree state: indices shift after every splice, so the
//! locator is re-queried before each mutation instead of caching paths.

use crate::error::{PatchError, PatchResult};
use crate::interceptor::StyleInterceptor;
use crate::split::{find_run_with_token, replace_token_in_paragraph, split_run};
use crate::style_mapper::StyleMapper;
use crate::traverse::locate_text;
use serde::{Deserialize, Serialize};
use wml_tree::{tags, Element, XmlNode};

/// Sentinel substituted for a placeholder before splitting
///
/// A private-use codepoint, vanishingly unlikely in document text. Behavior
/// when a document literally contains it is undefined.
pub const SPLIT_SENTINEL: &str = "\u{e000}";

/// How a patch replaces its placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchKind {
    /// Replace the entire paragraph containing the token
    Document,
    /// Replace only the token span, inline
    Paragraph,
}

impl Default for PatchKind {
    fn default() -> Self {
        PatchKind::Paragraph
    }
}

/// A replacement: the kind of substitution plus the serialized content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub kind: PatchKind,
    /// Replacement nodes, already serialized to the generic tree
    pub content: Vec<Element>,
}

impl Patch {
    /// A whole-paragraph replacement
    pub fn document(content: Vec<Element>) -> Self {
        Self {
            kind: PatchKind::Document,
            content,
        }
    }

    /// An inline token replacement
    pub fn paragraph(content: Vec<Element>) -> Self {
        Self {
            kind: PatchKind::Paragraph,
            content,
        }
    }
}

/// Options shared by every patch in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOptions {
    /// Carry the original run's property block onto replacement content and
    /// the right-hand fragment
    pub keep_original_styles: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            keep_original_styles: true,
        }
    }
}

/// Token → patch mapping, insertion-ordered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    entries: Vec<(String, Patch)>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patch for a token, replacing any earlier entry
    pub fn insert(&mut self, token: impl Into<String>, patch: Patch) {
        let token = token.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == token) {
            Some(slot) => slot.1 = patch,
            None => self.entries.push((token, patch)),
        }
    }

    pub fn get(&self, token: &str) -> Option<&Patch> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == token)
            .map(|(_, patch)| patch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Patch)> {
        self.entries.iter().map(|(token, patch)| (token.as_str(), patch))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of applying one patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    pub token: String,
    /// Whether the token occurred anywhere in the tree
    pub found: bool,
    /// How many occurrences were replaced
    pub replacements: usize,
}

/// Apply one patch to the tree
///
/// A token with no occurrence leaves the tree untouched and reports
/// `found: false`; that is an outcome, not an error. When a mapper is given,
/// replacement content passes through the style interceptor before splicing.
pub fn apply_patch(
    tree: &mut Element,
    token: &str,
    patch: &Patch,
    options: &PatchOptions,
    mapper: Option<&StyleMapper>,
) -> PatchResult<PatchReport> {
    let initial = locate_text(tree, token);
    if initial.is_empty() {
        return Ok(PatchReport {
            token: token.to_string(),
            found: false,
            replacements: 0,
        });
    }

    // Re-query per occurrence: earlier splices shift sibling indices, so a
    // cached path would dangle. Bounded by the initial count in case the
    // replacement content itself contains the token.
    let mut replacements = 0;
    for _ in 0..initial.len() {
        let Some(hit) = locate_text(tree, token).into_iter().next() else {
            break;
        };
        let content = prepare_content(patch, mapper);

        match patch.kind {
            PatchKind::Document => {
                let parent_path = hit
                    .path
                    .parent()
                    .ok_or_else(|| PatchError::StalePath(hit.path.to_string()))?;
                let Some(index) = hit.path.last() else {
                    return Err(PatchError::StalePath(hit.path.to_string()));
                };
                let parent = parent_path
                    .resolve_mut(tree)
                    .ok_or_else(|| PatchError::StalePath(parent_path.to_string()))?;
                parent
                    .children
                    .splice(index..index + 1, content.into_iter().map(XmlNode::Element));
            }
            PatchKind::Paragraph => {
                replace_token_in_paragraph(tree, &hit, token, SPLIT_SENTINEL)?;

                let paragraph = hit
                    .path
                    .resolve_mut(tree)
                    .ok_or_else(|| PatchError::StalePath(hit.path.to_string()))?;
                let run_index = find_run_with_token(paragraph, SPLIT_SENTINEL)
                    .ok_or(PatchError::SplitRunMissing)?;
                let original_run = match &paragraph.children[run_index] {
                    XmlNode::Element(run) => run.clone(),
                    XmlNode::Text(_) => return Err(PatchError::SplitRunMissing),
                };

                let split = split_run(&original_run, SPLIT_SENTINEL)?;
                let mut replacement_runs = content;
                let mut right = split.right;

                if options.keep_original_styles {
                    let properties: Vec<Element> = original_run
                        .child_elements()
                        .filter(|child| child.name == tags::RUN_PROPERTIES)
                        .cloned()
                        .collect();
                    if !properties.is_empty() {
                        for node in &mut replacement_runs {
                            prepend_properties(node, &properties);
                        }
                        prepend_properties(&mut right, &properties);
                    }
                }

                let mut spliced: Vec<XmlNode> = Vec::with_capacity(replacement_runs.len() + 2);
                spliced.push(XmlNode::Element(split.left));
                spliced.extend(replacement_runs.into_iter().map(XmlNode::Element));
                spliced.push(XmlNode::Element(right));
                paragraph.children.splice(run_index..run_index + 1, spliced);
            }
        }
        replacements += 1;
    }

    Ok(PatchReport {
        token: token.to_string(),
        found: true,
        replacements,
    })
}

/// Apply every patch in the set, independently
///
/// Not-found tokens are reported in their entry's slot; they never abort the
/// remaining patches.
pub fn apply_patches(
    tree: &mut Element,
    patches: &PatchSet,
    options: &PatchOptions,
    mapper: Option<&StyleMapper>,
) -> PatchResult<Vec<PatchReport>> {
    let mut reports = Vec::with_capacity(patches.len());
    for (token, patch) in patches.iter() {
        let report = apply_patch(tree, token, patch, options, mapper)?;
        if !report.found {
            tracing::warn!(token, "patch token not found in document");
        }
        reports.push(report);
    }
    Ok(reports)
}

fn prepare_content(patch: &Patch, mapper: Option<&StyleMapper>) -> Vec<Element> {
    let mut content = patch.content.clone();
    if let Some(mapper) = mapper {
        let interceptor = StyleInterceptor::new(mapper);
        for element in &mut content {
            interceptor.transform(element);
        }
    }
    content
}

fn prepend_properties(node: &mut Element, properties: &[Element]) {
    for property in properties.iter().rev() {
        node.children.insert(0, XmlNode::Element(property.clone()));
    }
}
