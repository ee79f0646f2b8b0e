//! Bidirectional style id translation
//!
//! Two documents name the same semantic style with different ids (most
//! often across locales: `Heading1` vs `Ttulo1`). The display name is the
//! stable key, so translation goes source id → name → master id, with the
//! name comparison case-insensitive to tolerate producers that case display
//! names differently.

use crate::style_info::StyleInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Translates style ids from a source style set into a master style set
#[derive(Debug, Default)]
pub struct StyleMapper {
    id_to_name: HashMap<String, String>,
    name_to_id: HashMap<String, String>,
}

impl StyleMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapper in one step
    pub fn from_style_sets(source: &[StyleInfo], master: &[StyleInfo]) -> Self {
        let mut mapper = Self::new();
        mapper.build(source, master);
        mapper
    }

    /// Rebuild both maps from a (source, master) style-set pair
    ///
    /// Clears prior state first: rebuilding from the same inputs is
    /// deterministic and idempotent, never accumulative.
    pub fn build(&mut self, source: &[StyleInfo], master: &[StyleInfo]) {
        self.id_to_name.clear();
        self.name_to_id.clear();

        for style in source {
            self.id_to_name.insert(style.id.clone(), style.name.clone());
        }
        for style in master {
            self.name_to_id.insert(style.name.to_lowercase(), style.id.clone());
        }
    }

    /// Translate a source style id into the master's id for the same name
    ///
    /// Unknown ids pass through unchanged, as does a known id whose name has
    /// no equivalent in the master set. Unmapped styles are never corrupted.
    pub fn resolve(&self, style_id: &str) -> String {
        let Some(name) = self.id_to_name.get(style_id) else {
            return style_id.to_string();
        };
        self.name_to_id
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| style_id.to_string())
    }

    /// Whether a live equivalent for this source id exists in the master set
    ///
    /// Distinct from `resolve`, which always yields an id via the identity
    /// fallback.
    pub fn has_mapping(&self, style_id: &str) -> bool {
        self.id_to_name
            .get(style_id)
            .is_some_and(|name| self.name_to_id.contains_key(&name.to_lowercase()))
    }

    /// Counts describing the current mapping
    pub fn stats(&self) -> MappingStats {
        let matched = self
            .id_to_name
            .keys()
            .filter(|id| self.has_mapping(id))
            .count();
        MappingStats {
            source_styles: self.id_to_name.len(),
            master_styles: self.name_to_id.len(),
            matched,
        }
    }
}

/// Summary counts for a built style mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStats {
    /// Styles in the source set
    pub source_styles: usize,
    /// Styles in the master set
    pub master_styles: usize,
    /// Source styles with a live equivalent in the master set
    pub matched: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_info::StyleKind;
    use proptest::prelude::*;

    fn style(id: &str, name: &str) -> StyleInfo {
        StyleInfo::new(id, name, StyleKind::Paragraph)
    }

    fn sample_mapper() -> StyleMapper {
        StyleMapper::from_style_sets(
            &[style("Ttulo1", "heading 1"), style("Normal", "Normal")],
            &[style("Heading1", "Heading 1"), style("Normal", "Normal")],
        )
    }

    #[test]
    fn test_identity_fallback_for_unknown_ids() {
        let mapper = sample_mapper();
        assert_eq!(mapper.resolve("NeverSeen"), "NeverSeen");
        assert!(!mapper.has_mapping("NeverSeen"));
    }

    #[test]
    fn test_round_trip_resolution_is_case_insensitive() {
        let mapper = StyleMapper::from_style_sets(&[style("A", "X")], &[style("B", "x")]);
        assert_eq!(mapper.resolve("A"), "B");
        assert!(mapper.has_mapping("A"));
    }

    #[test]
    fn test_known_id_without_master_equivalent_passes_through() {
        let mapper = StyleMapper::from_style_sets(&[style("Quote", "Quote")], &[style("Normal", "Normal")]);
        assert_eq!(mapper.resolve("Quote"), "Quote");
        assert!(!mapper.has_mapping("Quote"));
    }

    #[test]
    fn test_build_is_idempotent_and_clears_prior_state() {
        let source = [style("Ttulo1", "heading 1")];
        let master = [style("Heading1", "Heading 1")];

        let mut mapper = StyleMapper::new();
        mapper.build(&source, &master);
        let first = (mapper.resolve("Ttulo1"), mapper.stats());
        mapper.build(&source, &master);
        let second = (mapper.resolve("Ttulo1"), mapper.stats());
        assert_eq!(first, second);

        // A rebuild with different inputs forgets the old mapping entirely
        mapper.build(&[style("Other", "Other")], &[]);
        assert_eq!(mapper.resolve("Ttulo1"), "Ttulo1");
        assert_eq!(mapper.stats().source_styles, 1);
    }

    #[test]
    fn test_stats() {
        let stats = sample_mapper().stats();
        assert_eq!(
            stats,
            MappingStats {
                source_styles: 2,
                master_styles: 2,
                matched: 2
            }
        );
    }

    proptest! {
        // Any id outside the source set resolves to itself, whatever the
        // master set contains.
        #[test]
        fn prop_identity_fallback(id in "[A-Za-z][A-Za-z0-9]{0,11}") {
            let mapper = StyleMapper::from_style_sets(
                &[],
                &[style("Heading1", "Heading 1"), style("Normal", "Normal")],
            );
            prop_assert_eq!(mapper.resolve(&id), id);
        }
    }
}
