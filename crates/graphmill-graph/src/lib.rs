//! Neo4j persistence for extracted knowledge graphs.
//!
//! [`GraphWriter`] upserts resolved triples into a Neo4j store, keyed
//! by node name within each label, and offers the read-back and
//! cleanup operations the batch runner needs: a full node scan,
//! single-node detach-delete, and store-wide clearing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod writer;

pub use error::GraphError;
pub use writer::{sanitize_relation_type, GraphWriter};
