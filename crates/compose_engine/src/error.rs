//! Error types for composition

use thiserror::Error;

/// Errors raised while merging documents
///
/// Almost everything at this layer recovers locally: malformed elements are
/// logged and skipped, missing style definitions are surfaced as warnings in
/// the outcome. Only structural absence of the master body is fatal.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The master document tree has no body element to append into
    #[error("master document has no body element")]
    MissingBody,
}

/// Result type for composition
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;
