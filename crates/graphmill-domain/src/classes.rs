//! Entity class definitions shown to the model
//!
//! The entity prompt constrains extraction to a configured list of classes;
//! these types are serialized verbatim into that prompt.

use serde::{Deserialize, Serialize};

/// One expected property of an entity class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property name, e.g. "age".
    pub name: String,
    /// Loose type hint, e.g. "int" or "string".
    #[serde(rename = "type")]
    pub type_name: String,
}

/// An entity class the model is allowed to instantiate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Label of the class, used as the entity label.
    pub class_label: String,
    /// Properties an instance is expected (but not required) to carry.
    #[serde(default)]
    pub expected_properties: Vec<PropertySpec>,
}

impl Default for ClassDefinition {
    /// The catch-all class used when no classes are configured.
    fn default() -> Self {
        Self {
            class_label: crate::entity::DEFAULT_LABEL.to_string(),
            expected_properties: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_keyword_rename() {
        let spec = PropertySpec {
            name: "age".to_string(),
            type_name: "int".to_string(),
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"name":"age","type":"int"}"#);
    }

    #[test]
    fn test_default_class_is_entity() {
        let class = ClassDefinition::default();
        assert_eq!(class.class_label, "Entity");
        assert!(class.expected_properties.is_empty());
    }
}
