//! Graphmill Domain Layer
//!
//! This crate contains the core data model for the extraction pipeline.
//! It defines the shapes that flow between components (documents in,
//! entities/relations out) and the trait interfaces the infrastructure
//! layers implement.
//!
//! ## Key Concepts
//!
//! - **Entity**: a named graph-node candidate; `name` is the identity key
//! - **Relation**: a subject–predicate–object tuple before endpoint
//!   resolution
//! - **ResolvedTriple**: a relation whose endpoints have been bound to
//!   concrete entities (existing or synthesized)
//! - **ExtractedData**: the per-chunk or merged extraction result
//! - **GroupedDocument**: one input document as an ordered fragment list
//!
//! ## Architecture
//!
//! Infrastructure implementations (LLM clients, error sinks, the graph
//! writer) live in other crates; this crate only holds the types and the
//! trait seams between them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classes;
pub mod document;
pub mod entity;
pub mod extraction;
pub mod relation;
pub mod traits;

// Re-exports for convenience
pub use classes::{ClassDefinition, PropertySpec};
pub use document::{GroupedDocument, TextFragment};
pub use entity::{Entity, Scalar, DEFAULT_LABEL};
pub use extraction::ExtractedData;
pub use relation::{Relation, ResolvedTriple};
pub use traits::{CompletionBackend, ErrorSink};
