//! WordprocessingML element and attribute names

/// Document root
pub const DOCUMENT: &str = "w:document";
/// Document body
pub const BODY: &str = "w:body";
/// Paragraph
pub const PARAGRAPH: &str = "w:p";
/// Text run
pub const RUN: &str = "w:r";
/// Run text content
pub const TEXT: &str = "w:t";
/// Run property block
pub const RUN_PROPERTIES: &str = "w:rPr";
/// Paragraph property block
pub const PARAGRAPH_PROPERTIES: &str = "w:pPr";
/// Section properties (page size, margins)
pub const SECTION_PROPERTIES: &str = "w:sectPr";

/// Paragraph style reference
pub const PARAGRAPH_STYLE: &str = "w:pStyle";
/// Run (character) style reference
pub const RUN_STYLE: &str = "w:rStyle";
/// Table style reference
pub const TABLE_STYLE: &str = "w:tblStyle";

/// Style definitions root
pub const STYLES: &str = "w:styles";
/// A single style definition
pub const STYLE: &str = "w:style";
/// Style display name
pub const STYLE_NAME: &str = "w:name";

/// Bookmark anchor start
pub const BOOKMARK_START: &str = "w:bookmarkStart";
/// Bookmark anchor end
pub const BOOKMARK_END: &str = "w:bookmarkEnd";
/// Drawing object properties
pub const DRAWING_PROPERTIES: &str = "wp:docPr";

/// Generic value attribute
pub const VAL: &str = "w:val";
/// Style definition identifier attribute
pub const STYLE_ID: &str = "w:styleId";
/// Style definition type attribute
pub const TYPE: &str = "w:type";
/// Bookmark identifier attribute
pub const ID: &str = "w:id";
/// Drawing object identifier attribute (unprefixed on `wp:docPr`)
pub const DOCPR_ID: &str = "id";
/// Whitespace-preservation attribute on text elements
pub const XML_SPACE: &str = "xml:space";
