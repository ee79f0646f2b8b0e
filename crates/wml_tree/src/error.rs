//! Error types for tree parsing and writing

use thiserror::Error;

/// Errors raised while converting between XML text and the generic tree
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed XML input
    #[error("XML parse error: {0}")]
    Parse(String),

    /// Input contained no root element
    #[error("document has no root element")]
    NoRoot,

    /// A closing tag appeared without a matching open element
    #[error("unexpected closing tag: {0}")]
    UnexpectedClose(String),

    /// An element was left open at end of input
    #[error("unclosed element: {0}")]
    Unclosed(String),
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Parse(err.to_string())
    }
}

/// Result type for tree parsing and writing
pub type XmlResult<T> = std::result::Result<T, XmlError>;
