//! Completion normalization and payload parsing.
//!
//! Models rarely return bare JSON. The normalizer recovers a JSON
//! document from the common failure shapes: prose around a fenced
//! code block, or a payload embedded in surrounding chatter. Typed
//! parsing is lenient at the item level: one bad record is dropped,
//! the rest of the payload survives.

use std::collections::BTreeMap;

use graphmill_domain::{Entity, Relation, Scalar, DEFAULT_LABEL};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::PipelineError;

fn parses_as_json(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok()
}

/// Reduces a raw completion to a parseable JSON document.
///
/// Tries the text as-is first, then the inside of a fenced code block,
/// then the widest `{...}` span. Already-valid JSON passes through
/// unchanged, so the function is idempotent.
pub fn normalize(raw: &str) -> Result<String, PipelineError> {
    if parses_as_json(raw) {
        return Ok(raw.to_string());
    }

    let fence = Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)```").unwrap();
    let brace = Regex::new(r"(?s)\{.*\}").unwrap();

    let candidate = if let Some(caps) = fence.captures(raw) {
        caps.get(1).map(|m| m.as_str().trim().to_string())
    } else {
        brace.find(raw).map(|m| m.as_str().to_string())
    };

    match candidate {
        Some(c) if parses_as_json(&c) => Ok(c),
        _ => Err(PipelineError::MalformedResponse {
            raw: raw.to_string(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct EntitiesPayload {
    #[serde(default)]
    entities: Option<Vec<EntityRecord>>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
}

fn scalar_of(value: &serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Scalar::Int(i))
            } else {
                n.as_f64().map(Scalar::Float)
            }
        }
        serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
        _ => None,
    }
}

/// Parses a normalized entity-stage payload.
///
/// Records without a usable name are dropped; a missing label falls
/// back to the default. An absent `entities` key means an empty result,
/// not an error.
pub fn parse_entities(json: &str) -> Result<Vec<Entity>, PipelineError> {
    let payload: EntitiesPayload =
        serde_json::from_str(json).map_err(|_| PipelineError::MalformedResponse {
            raw: json.to_string(),
        })?;

    let mut entities = Vec::new();
    for record in payload.entities.unwrap_or_default() {
        let name = match record.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => {
                debug!("dropping entity record without a name");
                continue;
            }
        };
        let label = record
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());
        let mut properties = BTreeMap::new();
        for (key, value) in record.properties.unwrap_or_default() {
            match scalar_of(&value) {
                Some(scalar) => {
                    properties.insert(key, scalar);
                }
                None => debug!(property = %key, "dropping non-scalar property"),
            }
        }
        entities.push(Entity {
            name,
            label,
            properties,
        });
    }
    Ok(entities)
}

#[derive(Debug, Deserialize)]
struct RelationsPayload {
    #[serde(default)]
    relations: Option<Vec<serde_json::Value>>,
}

/// Parses a normalized relation-stage payload.
///
/// Only well-formed three-element string tuples survive; anything else
/// is dropped item by item. An absent `relations` key means an empty
/// result.
pub fn parse_relations(json: &str) -> Result<Vec<Relation>, PipelineError> {
    let payload: RelationsPayload =
        serde_json::from_str(json).map_err(|_| PipelineError::MalformedResponse {
            raw: json.to_string(),
        })?;

    let mut relations = Vec::new();
    for item in payload.relations.unwrap_or_default() {
        match serde_json::from_value::<Relation>(item) {
            Ok(relation) => relations.push(relation),
            Err(e) => debug!("dropping malformed relation tuple: {e}"),
        }
    }
    Ok(relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_passes_through() {
        let raw = r#"{"entities":[]}"#;
        assert_eq!(normalize(raw).unwrap(), raw);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = "Sure! ```json\n{\"relations\":[]}\n```";
        let once = normalize(raw).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn fenced_block_is_unwrapped() {
        let raw = "Here you go:\n```json\n{\"entities\":[]}\n```\nHope that helps!";
        assert_eq!(normalize(raw).unwrap(), r#"{"entities":[]}"#);
    }

    #[test]
    fn fence_without_language_tag_is_unwrapped() {
        let raw = "```\n{\"relations\":[]}\n```";
        assert_eq!(normalize(raw).unwrap(), r#"{"relations":[]}"#);
    }

    #[test]
    fn braces_in_prose_are_recovered() {
        let raw = "The result is {\"entities\":[]} as requested.";
        assert_eq!(normalize(raw).unwrap(), r#"{"entities":[]}"#);
    }

    #[test]
    fn hopeless_text_is_rejected_with_the_raw_preserved() {
        let raw = "I cannot help with that.";
        match normalize(raw) {
            Err(PipelineError::MalformedResponse { raw: kept }) => assert_eq!(kept, raw),
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[test]
    fn entities_parse_with_defaults_and_dropped_records() {
        let json = r#"{"entities":[
            {"name":"Alice","label":"Person","properties":{"age":20}},
            {"name":"","label":"Ghost"},
            {"label":"Orphan"},
            {"name":"Beacon"}
        ]}"#;
        let entities = parse_entities(json).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Alice");
        assert_eq!(entities[0].properties["age"], Scalar::Int(20));
        assert_eq!(entities[1].name, "Beacon");
        assert_eq!(entities[1].label, DEFAULT_LABEL);
    }

    #[test]
    fn nested_properties_are_dropped_not_fatal() {
        let json = r#"{"entities":[{"name":"A","label":"L","properties":{"ok":1,"bad":{"x":1}}}]}"#;
        let entities = parse_entities(json).unwrap();
        assert_eq!(entities[0].properties.len(), 1);
        assert!(entities[0].properties.contains_key("ok"));
    }

    #[test]
    fn missing_entities_key_is_an_empty_result() {
        assert!(parse_entities("{}").unwrap().is_empty());
    }

    #[test]
    fn relations_keep_only_well_formed_tuples() {
        let json = r#"{"relations":[
            ["Tom","EAT","apple"],
            ["too","short"],
            ["way","too","long","tuple"],
            [1,2,3],
            "not a tuple"
        ]}"#;
        let relations = parse_relations(json).unwrap();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].subject, "Tom");
        assert_eq!(relations[0].predicate, "EAT");
        assert_eq!(relations[0].object, "apple");
    }

    #[test]
    fn missing_relations_key_is_an_empty_result() {
        assert!(parse_relations("{}").unwrap().is_empty());
    }

    #[test]
    fn non_object_payload_is_malformed() {
        assert!(matches!(
            parse_entities("[1,2,3]"),
            Err(PipelineError::MalformedResponse { .. })
        ));
    }
}
