//! Prompt builders for the two extraction stages.
//!
//! Both stages share a preamble identifying the model as a pipeline
//! component and demand an unformatted JSON object back. The entity
//! stage carries the class definitions; the relation stage carries the
//! entity names recovered by the first stage.

use graphmill_domain::{ClassDefinition, Entity};

/// Placeholder used when no contextual topic has been configured.
pub const UNSET_CONTEXT: &str = "(context not set, extract all aspects)";

/// Placeholder used when a stage receives nothing to work on.
const EMPTY_DATA: &str = "(nothing to process, return a empty json body: '{}')";

fn context_or_default(context: Option<&str>) -> &str {
    match context {
        Some(c) if !c.trim().is_empty() => c,
        _ => UNSET_CONTEXT,
    }
}

fn data_or_default(chunk: &str) -> &str {
    if chunk.trim().is_empty() {
        EMPTY_DATA
    } else {
        chunk
    }
}

fn entity_example() -> String {
    let example = Entity::new("Alice", "Person")
        .with_property("age", 20i64)
        .with_property("job", "developer");
    serde_json::json!({ "entities": [example] }).to_string()
}

fn relation_example() -> String {
    serde_json::json!({
        "relations": [["Tom", "EAT", "apple"], ["Ada", "WROTE", "a program"]]
    })
    .to_string()
}

fn classes_json(classes: &[ClassDefinition]) -> String {
    if classes.is_empty() {
        serde_json::to_string(&[ClassDefinition::default()]).unwrap_or_else(|_| "[]".to_string())
    } else {
        serde_json::to_string(classes).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Builds the first-stage prompt asking for node entities.
pub fn entity_prompt(context: Option<&str>, classes: &[ClassDefinition], chunk: &str) -> String {
    format!(
        r#"# You are a component in a knowledge graph extraction pipeline.

Your task is to extract and define node entities from the given data. The output must be a valid JSON object.

Based on the provided text and context, extract relevant node entities.

# Strict Constraints:
1. name, label, and properties are all mandatory fields. Even if a property with a similar name or value exists inside properties, you must still include the top-level name field. Do not merge or omit it.
2. Output unformatted JSON to save tokens.
3. DO NOT translate any words in the raw data; keep them in their original language (when processing string values).
4. Ensure that all properties are brief and concise, strictly controlling the length of additional properties for knowledge graph nodes to avoid verbosity.
5. Ensure you **don't give nodes vague names** like "the paper" - provide the exact title instead, otherwise it will severely impact graph quality.
6. If an entity doesn't fit any of the provided classes, discard it. Some class properties can be null.

## **Critical Constraint: All extracted entities MUST be instances of the defined classes below.**

Class Definitions (Only extract entities belonging to these classes):
{classes}

Contextual Topic (Only extract entities relevant to this topic):
{context}

## Example Output:
{example}

## Data to Process:
{data}"#,
        classes = classes_json(classes),
        context = context_or_default(context),
        example = entity_example(),
        data = data_or_default(chunk),
    )
}

/// Builds the second-stage prompt asking for relation triples anchored
/// on the entity names found by the first stage.
pub fn relation_prompt(entity_names: &[String], context: Option<&str>, chunk: &str) -> String {
    let given = serde_json::to_string(entity_names).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"# You are a component in a knowledge graph extraction pipeline.

Your task is to extract and define a set of relations (triples) for a knowledge graph from the given data. The output must be a valid JSON object.

Based on the provided text and context, extract relevant triple relations and return them in JSON format.

# Strict Constraints:
1. All extracted triples **MUST** follow the [subject, predicate, object] format (e.g., a --b-> c).
2. **At least one** of the subject or object in each triple **MUST** be an entity from the provided list. If you find synonyms or references to the same entity, use the given entity name as a substitute.
3. The predicate (relation) should clearly express the connection between the subject and object. Keep it concise and straightforward, avoiding any descriptive or adjectival words.
4. Triples must be meaningful and contribute valuable information to the knowledge graph. Discard any meaningless relations.
5. Output unformatted JSON to save tokens.
6. DO NOT translate any words in the raw data; keep them in their original language (when processing string values).
7. Ensure you **don't give entities in the triples vague names** like "the paper" - always use the exact title instead, otherwise it will severely impact graph quality.
8. Before you start answering, consider combining some of the triples that you think are highly similar to avoid redundancy.

## Given Entities

At least one of the subject or object in each triple must come from this list:
{given}

## Contextual Topic

Only extract relations relevant to this topic:
{context}

## Example Output:
{example}

## Data to Process:
{data}"#,
        given = given,
        context = context_or_default(context),
        example = relation_example(),
        data = data_or_default(chunk),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphmill_domain::PropertySpec;

    #[test]
    fn entity_prompt_carries_chunk_and_classes() {
        let classes = vec![ClassDefinition {
            class_label: "Person".to_string(),
            expected_properties: vec![PropertySpec {
                name: "age".to_string(),
                type_name: "int".to_string(),
            }],
        }];
        let prompt = entity_prompt(Some("biographies"), &classes, "Alice met Bob.");
        assert!(prompt.contains("Alice met Bob."));
        assert!(prompt.contains("\"Person\""));
        assert!(prompt.contains("biographies"));
        assert!(prompt.contains("\"entities\""));
    }

    #[test]
    fn unset_context_gets_a_placeholder() {
        let prompt = entity_prompt(None, &[], "data");
        assert!(prompt.contains(UNSET_CONTEXT));
        let prompt = entity_prompt(Some("   "), &[], "data");
        assert!(prompt.contains(UNSET_CONTEXT));
    }

    #[test]
    fn empty_class_list_falls_back_to_the_default_class() {
        let prompt = entity_prompt(None, &[], "data");
        assert!(prompt.contains("\"Entity\""));
    }

    #[test]
    fn relation_prompt_lists_the_given_entity_names() {
        let names = vec!["Alice".to_string(), "Bob".to_string()];
        let prompt = relation_prompt(&names, None, "Alice met Bob.");
        assert!(prompt.contains(r#"["Alice","Bob"]"#));
        assert!(prompt.contains(r#"["Tom","EAT","apple"]"#));
        assert!(prompt.contains("Alice met Bob."));
    }

    #[test]
    fn blank_chunk_gets_a_placeholder() {
        let prompt = relation_prompt(&[], None, "  ");
        assert!(prompt.contains("(nothing to process"));
    }
}
