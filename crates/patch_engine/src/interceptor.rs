//! Post-serialization style rewriting
//!
//! Runs over content that has just been serialized to the generic tree,
//! immediately before it is spliced into a destination document. Every
//! style-reference node found anywhere in the subtree gets its value
//! translated through the mapper. The walk is tag-agnostic: references can
//! sit arbitrarily deep under producer-specific wrappers, so every element
//! child is visited regardless of name.

use crate::style_info::STYLE_REFERENCE_TAGS;
use crate::style_mapper::StyleMapper;
use wml_tree::{tags, Element};

/// Rewrites style-reference values in place through a [`StyleMapper`]
#[derive(Debug)]
pub struct StyleInterceptor<'a> {
    mapper: &'a StyleMapper,
}

impl<'a> StyleInterceptor<'a> {
    pub fn new(mapper: &'a StyleMapper) -> Self {
        Self { mapper }
    }

    /// Walk the subtree, rewriting every mapped style reference
    ///
    /// Structural no-throw transform; returns how many references changed.
    pub fn transform(&self, element: &mut Element) -> usize {
        let mut rewritten = 0;
        self.walk(element, &mut rewritten);
        rewritten
    }

    fn walk(&self, element: &mut Element, rewritten: &mut usize) {
        if STYLE_REFERENCE_TAGS.contains(&element.name.as_str()) {
            let mapped = element
                .attribute(tags::VAL)
                .map(|value| (value.to_string(), self.mapper.resolve(value)));
            if let Some((original, mapped)) = mapped {
                if mapped != original {
                    tracing::debug!(from = %original, to = %mapped, "rewriting style reference");
                    element.set_attribute(tags::VAL, mapped);
                    *rewritten += 1;
                }
            }
        }
        for child in element.child_elements_mut() {
            self.walk(child, rewritten);
        }
    }
}
