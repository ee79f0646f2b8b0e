//! Merging whole packages
//!
//! The master package supplies the destination document and style trees;
//! each source package contributes its body. After every source is
//! appended, the merged document and style parts are stored back and the
//! master archive is rebuilt around them.

use crate::error::{PackageError, PackageResult};
use crate::package::DocxPackage;
use compose_engine::{AppendOutcome, Composer, SourceDocument};

/// A merged package plus one outcome per appended source
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// The rebuilt master archive
    pub bytes: Vec<u8>,
    /// Append outcomes, in source order
    pub outcomes: Vec<AppendOutcome>,
}

/// Append each source package's body to the master package
pub fn merge_packages(master_bytes: &[u8], sources: &[&[u8]]) -> PackageResult<MergedDocument> {
    let mut master = DocxPackage::from_bytes(master_bytes)?;
    if !master.is_wordprocessing_package() {
        return Err(PackageError::InvalidPackage(
            "master is missing content-types or main document part".to_string(),
        ));
    }

    let mut composer = Composer::new(master.document_tree()?, master.styles_tree()?);

    let mut outcomes = Vec::with_capacity(sources.len());
    for (index, bytes) in sources.iter().enumerate() {
        let package = DocxPackage::from_bytes(bytes)?;
        let source = SourceDocument::from_parts(package.document_tree()?, package.styles_tree()?);
        let outcome = composer.append(&source)?;
        tracing::debug!(source = index, summary = %outcome.summary(), "source appended");
        outcomes.push(outcome);
    }

    let (document, styles) = composer.into_parts();
    master.store_document_tree(&document);
    master.store_styles_tree(&styles);

    Ok(MergedDocument {
        bytes: master.to_bytes()?,
        outcomes,
    })
}
