//! Entity module - the node candidates the pipeline extracts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar property value on an entity.
///
/// The model is asked for flat, concise properties; anything that is not a
/// bool, integer, float or string is rejected at the parsing boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// The label used when the model does not supply one, and for placeholder
/// entities synthesized during merge when no fallback is configured.
pub const DEFAULT_LABEL: &str = "Entity";

/// A named node candidate for the knowledge graph.
///
/// Two entities are the *same* entity iff their `name` is equal
/// (case-sensitive, exact match); that is the dedup key used throughout
/// the pipeline and the match key for graph upserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identity key and display name. Non-blank by construction: the
    /// parsing layer drops records without a usable name.
    pub name: String,

    /// Primary label, a class-like tag such as "Person" or "Database".
    #[serde(default = "default_label")]
    pub label: String,

    /// Additional flat properties. Keys are property names; values are
    /// scalars compatible with the graph store.
    #[serde(default)]
    pub properties: BTreeMap<String, Scalar>,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

impl Entity {
    /// Create an entity with an explicit label and no properties.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Create an entity with the default label.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_LABEL)
    }

    /// Builder-style property attachment, mostly for tests and examples.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.name, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_defaults_label_on_deserialize() {
        let entity: Entity = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(entity.name, "Alice");
        assert_eq!(entity.label, DEFAULT_LABEL);
        assert!(entity.properties.is_empty());
    }

    #[test]
    fn test_scalar_untagged_deserialize() {
        let entity: Entity = serde_json::from_str(
            r#"{"name": "Alice", "label": "Person", "properties": {"age": 20, "job": "developer", "score": 1.5, "active": true}}"#,
        )
        .unwrap();
        assert_eq!(entity.properties["age"], Scalar::Int(20));
        assert_eq!(entity.properties["job"], Scalar::Text("developer".into()));
        assert_eq!(entity.properties["score"], Scalar::Float(1.5));
        assert_eq!(entity.properties["active"], Scalar::Bool(true));
    }

    #[test]
    fn test_entity_serialize_roundtrip() {
        let entity = Entity::new("Neo4j", "Database").with_property("since", 2007i64);
        let json = serde_json::to_string(&entity).unwrap();
        let parsed: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, parsed);
    }
}
