//! Idempotent Neo4j writer for extracted graphs.
//!
//! Nodes are keyed by `name` within their label and upserted with
//! `MERGE`, so re-running an extraction converges instead of
//! duplicating. Labels and relationship types cannot be parameterized
//! in Cypher; they are sanitized and interpolated with backtick
//! quoting, while every value travels as a bound parameter.

use graphmill_domain::{Entity, ExtractedData, Scalar};
use neo4rs::{query, ConfigBuilder, Graph, Query};
use tracing::{debug, error, info, warn};

use crate::error::GraphError;

/// Label given to nodes read back without any label of their own.
const UNKNOWN_LABEL: &str = "Unknown";

/// Makes a relationship type safe to interpolate: whitespace and
/// common punctuation (including fullwidth variants) become
/// underscores, backticks are dropped.
pub fn sanitize_relation_type(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '-' | ',' | '，' | '.' | '。' | '、' => '_',
            c => c,
        })
        .filter(|c| *c != '`')
        .collect()
}

fn quote_ident(raw: &str) -> String {
    format!("`{}`", raw.replace('`', ""))
}

/// The upsert statement for one `(subject)-[predicate]->(object)`
/// triple. Node properties are written via per-key `SET` clauses with
/// positional parameter names.
fn relation_cypher(subject: &Entity, predicate: &str, object: &Entity) -> String {
    let mut cypher = format!(
        "MERGE (a:{} {{name: $a_name}})\n",
        quote_ident(&subject.label)
    );
    for (i, key) in subject.properties.keys().enumerate() {
        cypher.push_str(&format!("SET a.{} = $a_p{}\n", quote_ident(key), i));
    }
    cypher.push_str(&format!(
        "MERGE (b:{} {{name: $b_name}})\n",
        quote_ident(&object.label)
    ));
    for (i, key) in object.properties.keys().enumerate() {
        cypher.push_str(&format!("SET b.{} = $b_p{}\n", quote_ident(key), i));
    }
    cypher.push_str(&format!(
        "MERGE (a)-[:{}]->(b)",
        quote_ident(&sanitize_relation_type(predicate))
    ));
    cypher
}

/// The detach-delete statement for one node, matched by label and
/// `name`.
fn remove_cypher(entity: &Entity) -> String {
    format!(
        "MATCH (n:{} {{name: $name}}) DETACH DELETE n",
        quote_ident(&entity.label)
    )
}

fn bind_scalar(q: Query, key: &str, value: &Scalar) -> Query {
    match value {
        Scalar::Bool(b) => q.param(key, *b),
        Scalar::Int(i) => q.param(key, *i),
        Scalar::Float(f) => q.param(key, *f),
        Scalar::Text(t) => q.param(key, t.as_str()),
    }
}

fn relation_query(subject: &Entity, predicate: &str, object: &Entity) -> Query {
    let mut q = query(&relation_cypher(subject, predicate, object))
        .param("a_name", subject.name.as_str())
        .param("b_name", object.name.as_str());
    for (i, value) in subject.properties.values().enumerate() {
        q = bind_scalar(q, &format!("a_p{i}"), value);
    }
    for (i, value) in object.properties.values().enumerate() {
        q = bind_scalar(q, &format!("b_p{i}"), value);
    }
    q
}

/// Writer over a live Neo4j connection.
pub struct GraphWriter {
    graph: Graph,
}

impl GraphWriter {
    /// Connects to the store and verifies the connection with a probe
    /// query.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, GraphError> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .build()?;
        let graph = Graph::connect(config).await?;
        graph.run(query("RETURN 1")).await?;
        info!(uri, "connected to neo4j");
        Ok(Self { graph })
    }

    /// Whether the store still answers a trivial query.
    pub async fn connected(&self) -> bool {
        self.graph.run(query("RETURN 1")).await.is_ok()
    }

    /// Upserts one triple. Returns `false` (after logging) instead of
    /// failing, so a bad tuple never aborts a batch.
    pub async fn write_relation(
        &self,
        subject: &Entity,
        predicate: &str,
        object: &Entity,
    ) -> bool {
        let q = relation_query(subject, predicate, object);
        match self.graph.run(q).await {
            Ok(()) => {
                debug!(
                    subject = %subject.name,
                    predicate,
                    object = %object.name,
                    "wrote relation"
                );
                true
            }
            Err(e) => {
                error!(
                    subject = %subject.name,
                    predicate,
                    object = %object.name,
                    "failed to write relation: {e}"
                );
                false
            }
        }
    }

    /// Writes every resolved triple of `data`, returning how many were
    /// stored.
    pub async fn write_data(&self, data: &ExtractedData) -> usize {
        let mut written = 0;
        for triple in &data.triples {
            if self
                .write_relation(&triple.subject, &triple.predicate, &triple.object)
                .await
            {
                written += 1;
            }
        }
        if written < data.triples.len() {
            warn!(
                written,
                total = data.triples.len(),
                "some triples were not stored"
            );
        }
        written
    }

    /// Reads back every named node as an [`Entity`].
    async fn scan(&self) -> Result<Vec<Entity>, GraphError> {
        let mut stream = self
            .graph
            .execute(query("MATCH (n) WHERE n.name IS NOT NULL RETURN n"))
            .await?;

        let mut entities = Vec::new();
        while let Some(row) = stream.next().await? {
            let node: neo4rs::Node = row.get("n")?;
            let name: String = node.get("name")?;
            let label = node
                .labels()
                .first()
                .map(|l| l.to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

            let mut entity = Entity::new(name, label);
            for key in node.keys() {
                if key == "name" {
                    continue;
                }
                let scalar = if let Ok(b) = node.get::<bool>(key) {
                    Scalar::Bool(b)
                } else if let Ok(i) = node.get::<i64>(key) {
                    Scalar::Int(i)
                } else if let Ok(f) = node.get::<f64>(key) {
                    Scalar::Float(f)
                } else if let Ok(s) = node.get::<String>(key) {
                    Scalar::Text(s)
                } else {
                    debug!(property = %key, "skipping non-scalar stored property");
                    continue;
                };
                entity.properties.insert(key.to_string(), scalar);
            }
            entities.push(entity);
        }
        Ok(entities)
    }

    /// Calls `f` for every named node in the store.
    pub async fn for_each<F>(&self, mut f: F) -> Result<(), GraphError>
    where
        F: FnMut(Entity),
    {
        for entity in self.scan().await? {
            f(entity);
        }
        Ok(())
    }

    /// Detach-deletes the node matching `entity`'s label and name.
    /// Returns `false` (after logging) on failure.
    pub async fn remove(&self, entity: &Entity) -> bool {
        let cypher = remove_cypher(entity);
        match self
            .graph
            .run(query(&cypher).param("name", entity.name.as_str()))
            .await
        {
            Ok(()) => {
                debug!(name = %entity.name, label = %entity.label, "removed node");
                true
            }
            Err(e) => {
                error!(name = %entity.name, label = %entity.label, "failed to remove node: {e}");
                false
            }
        }
    }

    /// Removes every named node (and its relationships) from the store.
    pub async fn remove_all(&self) -> Result<(), GraphError> {
        let entities = self.scan().await?;
        info!(nodes = entities.len(), "clearing graph store");
        for entity in &entities {
            self.remove(entity).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_and_punctuation_become_underscores() {
        assert_eq!(sanitize_relation_type("works for"), "works_for");
        assert_eq!(sanitize_relation_type("a-b,c.d"), "a_b_c_d");
        assert_eq!(sanitize_relation_type("提到，了。它"), "提到_了_它");
    }

    #[test]
    fn backticks_are_stripped_from_relation_types() {
        assert_eq!(sanitize_relation_type("a`]->(x) DETACH`b"), "a]->(x)_DETACHb");
    }

    #[test]
    fn identifiers_are_backtick_quoted() {
        assert_eq!(quote_ident("My Label"), "`My Label`");
        assert_eq!(quote_ident("evil`label"), "`evillabel`");
    }

    #[test]
    fn relation_cypher_merges_both_endpoints_and_the_edge() {
        let a = Entity::new("Alice", "Person").with_property("age", 20i64);
        let b = Entity::new("Neo4j", "Database");
        let cypher = relation_cypher(&a, "USES", &b);
        assert!(cypher.contains("MERGE (a:`Person` {name: $a_name})"));
        assert!(cypher.contains("SET a.`age` = $a_p0"));
        assert!(cypher.contains("MERGE (b:`Database` {name: $b_name})"));
        assert!(cypher.contains("MERGE (a)-[:`USES`]->(b)"));
    }

    #[test]
    fn relation_cypher_sanitizes_the_edge_type() {
        let a = Entity::new("a", "L");
        let b = Entity::new("b", "L");
        let cypher = relation_cypher(&a, "works for", &b);
        assert!(cypher.contains("[:`works_for`]"));
    }

    #[test]
    fn remove_cypher_detach_deletes_by_quoted_label_and_name() {
        let entity = Entity::new("Alice", "Person");
        assert_eq!(
            remove_cypher(&entity),
            "MATCH (n:`Person` {name: $name}) DETACH DELETE n"
        );

        let hostile = Entity::new("Alice", "evil`) DETACH DELETE m //");
        assert_eq!(
            remove_cypher(&hostile),
            "MATCH (n:`evil) DETACH DELETE m //` {name: $name}) DETACH DELETE n"
        );
    }
}
