//! Relation and triple types
//!
//! A `Relation` is a subject–predicate–object statement whose endpoints are
//! still plain names; a `ResolvedTriple` is the same statement after the
//! merge stage bound both endpoints to concrete `Entity` records.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject–predicate–object tuple, endpoints by name.
///
/// On the wire this is the 3-element array `[subject, predicate, object]`
/// the model emits; arrays of any other length are rejected during
/// deserialization, which is how malformed tuples get dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Relation {
    /// Name of the subject entity.
    pub subject: String,
    /// The predicate connecting subject to object.
    pub predicate: String,
    /// Name of the object entity.
    pub object: String,
}

impl Relation {
    /// Create a relation from its three parts.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl From<Relation> for Vec<String> {
    fn from(r: Relation) -> Self {
        vec![r.subject, r.predicate, r.object]
    }
}

impl TryFrom<Vec<String>> for Relation {
    type Error = String;

    fn try_from(mut parts: Vec<String>) -> Result<Self, Self::Error> {
        if parts.len() != 3 {
            return Err(format!(
                "relation tuple must have exactly 3 elements, got {}",
                parts.len()
            ));
        }
        let object = parts.pop().expect("length checked");
        let predicate = parts.pop().expect("length checked");
        let subject = parts.pop().expect("length checked");
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}-> {}", self.subject, self.predicate, self.object)
    }
}

/// A relation with both endpoints bound to entity records.
///
/// Produced only by the merger; by construction both endpoints carry a
/// non-blank name, so a triple can always be written to the graph store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTriple {
    /// Subject entity.
    pub subject: Entity,
    /// Predicate connecting the endpoints.
    pub predicate: String,
    /// Object entity.
    pub object: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_wire_shape_is_array() {
        let relation = Relation::new("Tom", "EAT", "apple");
        let json = serde_json::to_string(&relation).unwrap();
        assert_eq!(json, r#"["Tom","EAT","apple"]"#);
    }

    #[test]
    fn test_relation_roundtrip() {
        let relation = Relation::new("Alice", "works_at", "Acme");
        let json = serde_json::to_string(&relation).unwrap();
        let parsed: Relation = serde_json::from_str(&json).unwrap();
        assert_eq!(relation, parsed);
    }

    #[test]
    fn test_short_tuple_rejected() {
        let result: Result<Relation, _> = serde_json::from_str(r#"["Alice","knows"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_long_tuple_rejected() {
        let result: Result<Relation, _> = serde_json::from_str(r#"["a","b","c","d"]"#);
        assert!(result.is_err());
    }
}
