//! Graph store error types.

use thiserror::Error;

/// Errors raised while talking to the Neo4j store.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Connection, query, or transaction failure.
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    /// A returned value could not be decoded into the expected type.
    #[error("neo4j decode error: {0}")]
    Decode(#[from] neo4rs::DeError),
}
