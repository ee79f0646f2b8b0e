//! Index paths into the generic tree
//!
//! A path is the sequence of child indices leading from a tree root to a
//! target node. Paths are transient locators: any structural mutation above
//! the target invalidates them, so they are recomputed per search rather
//! than cached across mutations.

use crate::element::{Element, XmlNode};
use serde::{Deserialize, Serialize};

/// Ordered child indices from a tree root to a target node
///
/// The empty path designates the root itself. Indices count all children,
/// text nodes included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path to the root element itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit indices
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Extend the path down into the child at `index`
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The path to the parent node, or `None` for the root path
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// The final child index, or `None` for the root path
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// The raw index sequence
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the path from `root`, returning the element it designates
    ///
    /// Returns `None` if any index is out of bounds or lands on a text node.
    pub fn resolve<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        let mut current = root;
        for &index in &self.0 {
            current = match current.children.get(index)? {
                XmlNode::Element(element) => element,
                XmlNode::Text(_) => return None,
            };
        }
        Some(current)
    }

    /// Walk the path from `root`, returning the element mutably
    pub fn resolve_mut<'a>(&self, root: &'a mut Element) -> Option<&'a mut Element> {
        let mut current = root;
        for &index in &self.0 {
            current = match current.children.get_mut(index)? {
                XmlNode::Element(element) => element,
                XmlNode::Text(_) => return None,
            };
        }
        Some(current)
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
