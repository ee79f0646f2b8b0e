//! Error types for package operations

use thiserror::Error;

/// Errors that can occur while reading, patching, or repacking a package
#[derive(Debug, Error)]
pub enum PackageError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(#[from] wml_tree::XmlError),

    /// Patch application error
    #[error("patch error: {0}")]
    Patch(#[from] patch_engine::PatchError),

    /// Composition error
    #[error("compose error: {0}")]
    Compose(#[from] compose_engine::ComposeError),

    /// A required part is absent from the archive
    #[error("missing required part: {0}")]
    MissingPart(String),

    /// The archive is not a wordprocessing package
    #[error("invalid package: {0}")]
    InvalidPackage(String),
}

/// Result type for package operations
pub type PackageResult<T> = std::result::Result<T, PackageError>;
