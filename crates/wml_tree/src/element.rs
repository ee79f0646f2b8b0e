//! Generic element node
//!
//! The lowest common denominator for document content: every node is either
//! an element (name + ordered attributes + ordered children) or a text
//! payload. Typed content is serialized into this shape before patching or
//! composition, and imported XML fragments are parsed straight into it.

use serde::{Deserialize, Serialize};

/// A node in the generic tree: a nested element or a text payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    /// A nested element
    Element(Element),
    /// Raw character data
    Text(String),
}

impl XmlNode {
    /// Get the node as an element, if it is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    /// Get the node as a mutable element, if it is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    /// Get the node as text, if it is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlNode::Element(_) => None,
            XmlNode::Text(text) => Some(text),
        }
    }

    /// Check whether the node is an element with the given name
    pub fn is_element_named(&self, name: &str) -> bool {
        matches!(self, XmlNode::Element(element) if element.name == name)
    }
}

impl From<Element> for XmlNode {
    fn from(element: Element) -> Self {
        XmlNode::Element(element)
    }
}

/// The generic element node
///
/// Attribute and child order are document order and are preserved through
/// every transform. Deep copy is `clone()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Qualified tag name, prefix included (e.g. `w:p`)
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Children in document order
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder: add a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place or appending
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(attr_name, _)| *attr_name == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Check whether an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Append a child element
    pub fn push_child(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append a text child
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Iterate over child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Iterate mutably over child elements, skipping text nodes
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Find the first direct child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.name == name)
    }

    /// Find the first direct child element with the given name, mutably
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|element| element.name == name)
    }

    /// Find the first descendant with the given name, pre-order, self excluded
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Find the first descendant with the given name, pre-order, mutably
    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut Element> {
        for child in self.child_elements_mut() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenate every descendant text payload, in document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}
