//! Generic tree to XML text

use crate::element::{Element, XmlNode};

/// Serialize a tree to a standalone XML document string
pub fn write_document(root: &Element) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write_element(&mut xml, root);
    xml
}

/// Serialize a tree to an XML fragment, no declaration
pub fn write_fragment(root: &Element) -> String {
    let mut xml = String::new();
    write_element(&mut xml, root);
    xml
}

fn write_element(xml: &mut String, element: &Element) {
    xml.push('<');
    xml.push_str(&element.name);

    for (name, value) in &element.attributes {
        xml.push(' ');
        xml.push_str(name);
        xml.push_str("=\"");
        xml.push_str(&escape_attribute(value));
        xml.push('"');
    }

    if element.children.is_empty() {
        xml.push_str("/>");
        return;
    }

    xml.push('>');
    for child in &element.children {
        match child {
            XmlNode::Element(nested) => write_element(xml, nested),
            XmlNode::Text(text) => xml.push_str(&escape_text(text)),
        }
    }
    xml.push_str("</");
    xml.push_str(&element.name);
    xml.push('>');
}

/// Escape XML text content
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape an attribute value (double-quoted)
fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
