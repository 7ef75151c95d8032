//! The extraction result shape shared by the per-chunk and merged stages

use crate::entity::Entity;
use crate::relation::{Relation, ResolvedTriple};
use serde::{Deserialize, Serialize};

/// Entities and relations extracted from one chunk, or the merged result
/// for a whole document.
///
/// `triples` is only populated by the merger; per-chunk results carry an
/// empty triple list because endpoint resolution is deferred to the global
/// merge (an endpoint may be named by a later chunk).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    /// Extracted entities. Deduplicated by name only after merging.
    #[serde(default)]
    pub entities: Vec<Entity>,

    /// Extracted relation tuples, endpoints by name.
    #[serde(default)]
    pub relations: Vec<Relation>,

    /// Relations with both endpoints bound to entity records.
    #[serde(default)]
    pub triples: Vec<ResolvedTriple>,
}

impl ExtractedData {
    /// True when nothing was extracted. Used to recognize the empty
    /// placeholder substituted for a failed chunk.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty() && self.triples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ExtractedData::default().is_empty());
    }

    #[test]
    fn test_non_empty() {
        let data = ExtractedData {
            entities: vec![Entity::named("A")],
            ..Default::default()
        };
        assert!(!data.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let data = ExtractedData {
            entities: vec![Entity::named("A")],
            relations: vec![Relation::new("A", "knows", "B")],
            triples: Vec::new(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["relations"][0][1], "knows");
        assert_eq!(json["entities"][0]["name"], "A");
    }
}
