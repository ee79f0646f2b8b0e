//! Error types for patch operations

use thiserror::Error;

/// Errors raised while applying a patch
///
/// A token with no occurrence in the tree is not an error; it is reported as
/// a not-found outcome so other patches in the batch proceed.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The run rewritten to contain the split sentinel could not be found
    #[error("no run containing the split token was found in the paragraph")]
    SplitRunMissing,

    /// `split_run` was invoked on a run whose text does not contain the token
    #[error("token not present in run text")]
    TokenNotInRun,

    /// A located path no longer resolves against the current tree
    #[error("stale node path: {0}")]
    StalePath(String),
}

/// Result type for patch operations
pub type PatchResult<T> = std::result::Result<T, PatchError>;
