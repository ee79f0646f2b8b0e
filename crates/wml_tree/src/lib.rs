//! WML Tree - Generic element tree for WordprocessingML content
//!
//! This crate provides the shared tree representation that both typed
//! document content and raw imported XML fragments serialize to and from:
//! a name, an ordered attribute list, and an ordered child list. It also
//! provides index paths for locating nodes and XML round-tripping via
//! quick-xml.

mod element;
mod error;
mod parse;
mod path;
pub mod tags;
mod write;

pub use element::*;
pub use error::*;
pub use parse::*;
pub use path::*;
pub use write::*;
