//! Error types for the extraction pipeline.

use thiserror::Error;

/// Errors raised while chunking documents, talking to the completion
/// backend, or interpreting its responses.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configured chunk budget cannot produce any chunk.
    #[error("chunk budget must be at least 1 byte, got {0}")]
    InvalidChunkBudget(usize),

    /// The completion backend could not be reached or returned an error.
    #[error("completion backend unavailable: {0}")]
    Upstream(String),

    /// A completion could not be reduced to the expected JSON payload
    /// after every normalization fallback was tried.
    #[error("malformed completion (no parseable JSON payload)")]
    MalformedResponse {
        /// The raw completion text, preserved for the error sink.
        raw: String,
    },

    /// A pipeline configuration value is missing or out of range.
    #[error("invalid pipeline configuration: {0}")]
    Config(String),
}
