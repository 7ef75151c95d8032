//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline core and
//! infrastructure. Implementations live in other crates.

use std::future::Future;

/// One model-completion capability, typically backed by a single API
/// credential.
///
/// Implemented by the infrastructure layer (graphmill-llm). The round-robin
/// credential pool wraps a list of these behind a single logical extractor.
pub trait CompletionBackend {
    /// Error type for completion calls.
    type Error: std::fmt::Display + Send;

    /// Issue one non-streaming completion request and return the raw
    /// model text. Timeouts and transport failures surface as errors;
    /// retrying is the caller's decision, never the backend's.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Side-channel storage for inputs that failed processing.
///
/// Keys are content hashes; collisions are tolerated because the sink is
/// diagnostic, not authoritative. Implemented by graphmill-extractor
/// (file-backed, and in-memory for tests).
pub trait ErrorSink {
    /// Error type for sink writes.
    type Error: std::fmt::Display;

    /// Persist `content` under `key` for later inspection.
    fn write(&self, key: &str, content: &str) -> Result<(), Self::Error>;
}
