//! XML text to generic tree
//!
//! Event-based parse that keeps text content character-exact: nothing is
//! trimmed, entities are unescaped once. Comments, processing instructions,
//! and the XML declaration are dropped.

use crate::element::{Element, XmlNode};
use crate::error::{XmlError, XmlResult};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse an XML document into its root element
///
/// The first top-level element becomes the root; any content after it is
/// ignored. Text outside the root is dropped.
pub fn parse_document(content: &str) -> XmlResult<Element> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let element = stack.pop().ok_or(XmlError::UnexpectedClose(name))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| XmlError::Parse(err.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(XmlError::Parse(err.to_string())),
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::NoRoot)
}

/// Close out a finished element: attach to its parent, or make it the root
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    }
}

fn element_from_start(e: &BytesStart) -> XmlResult<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlError::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = match unescape(&raw) {
            Ok(unescaped) => unescaped.into_owned(),
            Err(_) => raw,
        };
        element.attributes.push((key, value));
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements_and_attributes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#;

        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "w:document");
        assert!(root.attribute("xmlns:w").is_some());
        let para = root.find_descendant("w:p").unwrap();
        assert_eq!(para.text(), "Hello");
    }

    #[test]
    fn test_parse_preserves_whitespace_exactly() {
        let xml = r#"<w:r><w:t xml:space="preserve">  spaced  </w:t></w:r>"#;
        let root = parse_document(xml).unwrap();
        let text = root.find_child("w:t").unwrap();
        assert_eq!(text.text(), "  spaced  ");
        assert_eq!(text.attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_parse_unescapes_entities_once() {
        let xml = r#"<w:t a="x &amp; y">a &lt; b &amp;&amp; c</w:t>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.text(), "a < b && c");
        assert_eq!(root.attribute("a"), Some("x & y"));
    }

    #[test]
    fn test_parse_empty_element_syntax() {
        let root = parse_document(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr></w:p>"#).unwrap();
        let style = root.find_descendant("w:pStyle").unwrap();
        assert_eq!(style.attribute("w:val"), Some("Heading1"));
        assert!(style.children.is_empty());
    }

    #[test]
    fn test_parse_attribute_order_preserved() {
        let root = parse_document(r#"<w:style w:type="paragraph" w:styleId="Normal" w:default="1"/>"#).unwrap();
        let names: Vec<&str> = root.attributes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["w:type", "w:styleId", "w:default"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_document(""), Err(XmlError::NoRoot)));
        assert!(parse_document("<w:p><w:r></w:p>").is_err());
    }
}
