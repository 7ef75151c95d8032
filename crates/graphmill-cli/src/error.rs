//! Error types for the CLI application.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The cleaned input file does not exist
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// I/O error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Extraction pipeline error
    #[error("pipeline error: {0}")]
    Pipeline(#[from] graphmill_extractor::PipelineError),

    /// Completion backend error
    #[error("llm error: {0}")]
    Llm(#[from] graphmill_llm::LlmError),

    /// Graph store error
    #[error("graph error: {0}")]
    Graph(#[from] graphmill_graph::GraphError),
}
