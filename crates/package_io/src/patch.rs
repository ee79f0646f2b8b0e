//! Placeholder patching over a whole package
//!
//! Placeholders appear in document text as `{{key}}`. The patch set is
//! keyed by the bare name; the wrapping happens here. Before any patch is
//! applied, the style references carried by the patch content are matched
//! against the master's style set by display name, so content authored
//! against one locale's built-in style ids lands correctly in another's.

use crate::error::{PackageError, PackageResult};
use crate::package::DocxPackage;
use patch_engine::{
    apply_patch, builtin_style_infos, collect_style_references, traverse, PatchOptions, PatchReport,
    PatchSet, StyleMapper,
};
use serde::{Deserialize, Serialize};

/// A patched package plus what happened to each patch
#[derive(Debug, Clone)]
pub struct PatchedDocument {
    /// The rebuilt archive
    pub bytes: Vec<u8>,
    /// One report per patch, in patch-set order
    pub reports: Vec<PatchReport>,
}

impl PatchedDocument {
    /// Whether every patch found its placeholder
    pub fn found_all(&self) -> bool {
        self.reports.iter().all(|report| report.found)
    }
}

/// Patch every `{{key}}` placeholder in a package
///
/// Patches apply independently; a key with no occurrence is reported and
/// skipped. Untouched parts are carried through verbatim.
pub fn patch_document(
    bytes: &[u8],
    patches: &PatchSet,
    options: &PatchOptions,
) -> PackageResult<PatchedDocument> {
    let mut package = DocxPackage::from_bytes(bytes)?;
    if !package.is_wordprocessing_package() {
        return Err(PackageError::InvalidPackage(
            "missing content-types or main document part".to_string(),
        ));
    }

    let mut tree = package.document_tree()?;
    let mapper = content_style_mapper(patches, &package);

    let mut reports = Vec::with_capacity(patches.len());
    for (token, patch) in patches.iter() {
        let search = format!("{{{{{}}}}}", token);
        let report = apply_patch(&mut tree, &search, patch, options, Some(&mapper))?;
        if !report.found {
            tracing::warn!(token, "placeholder not found in document");
        }
        reports.push(report);
    }

    package.store_document_tree(&tree);
    Ok(PatchedDocument {
        bytes: package.to_bytes()?,
        reports,
    })
}

/// Map the style ids referenced by patch content onto the master style set
///
/// Patch content references built-in styles by id without carrying their
/// definitions, so the source side of the mapping is synthesized from the
/// built-in id → display-name table.
fn content_style_mapper(patches: &PatchSet, package: &DocxPackage) -> StyleMapper {
    let mut referenced = Vec::new();
    for (_, patch) in patches.iter() {
        for id in collect_style_references(&patch.content) {
            if !referenced.contains(&id) {
                referenced.push(id);
            }
        }
    }
    let content_styles = builtin_style_infos(&referenced);
    StyleMapper::from_style_sets(&content_styles, &package.style_infos())
}

/// Summary of the placeholders a package contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderScan {
    /// Distinct placeholder names, in first-appearance order
    pub names: Vec<String>,
}

/// Find every `{{name}}` placeholder in a package's rendered text
pub fn detect_placeholders(bytes: &[u8]) -> PackageResult<PlaceholderScan> {
    let package = DocxPackage::from_bytes(bytes)?;
    let tree = package.document_tree()?;

    let mut names = Vec::new();
    if let Ok(pattern) = regex_lite::Regex::new(r"\{\{([^{}]+)\}\}") {
        for paragraph in traverse(&tree) {
            for capture in pattern.captures_iter(&paragraph.text) {
                if let Some(name) = capture.get(1) {
                    let name = name.as_str().to_string();
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
    }
    Ok(PlaceholderScan { names })
}
