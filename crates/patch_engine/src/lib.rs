//! Patch Engine - Templated substitution over generic document trees
//!
//! Finds placeholder tokens in rendered paragraph text, even when a token is
//! split across several formatting runs, and replaces them with new content
//! while preserving the surrounding formatting. Also provides the style
//! mapping machinery shared with document composition: per-document style
//! extraction, a bidirectional id/name mapper, and a post-serialization
//! interceptor that rewrites style references in place.

mod error;
mod interceptor;
mod render;
mod replace;
mod split;
mod style_info;
mod style_mapper;
mod traverse;

pub use error::*;
pub use interceptor::*;
pub use render::*;
pub use replace::*;
pub use split::*;
pub use style_info::*;
pub use style_mapper::*;
pub use traverse::*;
