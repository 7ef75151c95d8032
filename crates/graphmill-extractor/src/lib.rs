//! Two-stage knowledge-graph extraction over a credential pool.
//!
//! The pipeline turns a grouped document into a merged set of typed
//! entities and relation triples:
//!
//! 1. [`chunking`] slices the document into byte-bounded chunks.
//! 2. [`pipeline`] runs each chunk through an entity prompt and then a
//!    relation prompt, bounded by the pool capacity.
//! 3. [`parser`] recovers JSON payloads from noisy completions.
//! 4. [`merge`] deduplicates across chunks and resolves relation
//!    endpoints into triples.
//!
//! Chunks that fail anywhere along the way are parked in an error
//! [`sink`] and excluded from the merge instead of failing the run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunking;
pub mod config;
pub mod error;
pub mod merge;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod sink;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use sink::{content_key, FileSink, MemorySink};
