//! Merging per-chunk extraction results into one graph-ready set.

use std::collections::{HashMap, HashSet};

use graphmill_domain::{Entity, ExtractedData, Relation, ResolvedTriple};

/// Merges per-chunk results: entities deduplicated by name (first
/// occurrence wins), relations deduplicated as exact tuples, and every
/// surviving relation resolved into a triple. An endpoint that matches
/// no extracted entity gets a synthesized entity carrying
/// `fallback_label` and no properties.
pub fn merge(results: &[ExtractedData], fallback_label: &str) -> ExtractedData {
    let mut entities: Vec<Entity> = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    for result in results {
        for entity in &result.entities {
            if seen_names.insert(entity.name.clone()) {
                entities.push(entity.clone());
            }
        }
    }

    let mut relations: Vec<Relation> = Vec::new();
    let mut seen_tuples: HashSet<Relation> = HashSet::new();
    for result in results {
        for relation in &result.relations {
            if seen_tuples.insert(relation.clone()) {
                relations.push(relation.clone());
            }
        }
    }

    let by_name: HashMap<&str, &Entity> =
        entities.iter().map(|e| (e.name.as_str(), e)).collect();
    let resolve = |name: &str| -> Entity {
        by_name
            .get(name)
            .map(|e| (*e).clone())
            .unwrap_or_else(|| Entity::new(name, fallback_label))
    };

    let triples = relations
        .iter()
        .map(|r| ResolvedTriple {
            subject: resolve(&r.subject),
            predicate: r.predicate.clone(),
            object: resolve(&r.object),
        })
        .collect();

    ExtractedData {
        entities,
        relations,
        triples,
    }
}
