//! Package I/O - Zipped-package access and the library entry points
//!
//! Reads a wordprocessing package (a zipped XML container) into memory,
//! exposes its document and style-definitions parts as generic trees, and
//! writes the package back with every untouched part copied verbatim. On
//! top of that sit the two entry points most callers want: patching
//! placeholders in a package and merging packages together.

mod error;
mod merge;
mod package;
mod patch;

pub use error::*;
pub use merge::*;
pub use package::*;
pub use patch::*;
