//! Graphmill LLM Provider Layer
//!
//! Implementations of the `CompletionBackend` trait from
//! `graphmill-domain`, plus the credential pool that spreads requests over
//! multiple API keys.
//!
//! # Components
//!
//! - `OpenAiClient`: one credential against an OpenAI-compatible
//!   chat-completions endpoint
//! - `CredentialPool`: round-robin dispatch over N backends; its capacity
//!   is the pipeline's concurrency ceiling
//! - `MockBackend`: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use graphmill_llm::{CredentialPool, MockBackend};
//!
//! # async fn example() {
//! let pool = CredentialPool::new(vec![
//!     MockBackend::new("{}"),
//!     MockBackend::new("{}"),
//! ])
//! .unwrap();
//! assert_eq!(pool.capacity(), 2);
//! let text = pool.complete("test prompt").await.unwrap();
//! assert_eq!(text, "{}");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;
pub mod pool;

use graphmill_domain::traits::CompletionBackend;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiClient;
pub use pool::CredentialPool;

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error (includes timeouts)
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the endpoint
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the endpoint
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The model returned no usable text
    #[error("Model returned no content")]
    EmptyCompletion,

    /// Pool construction needs at least one credential
    #[error("Credential pool requires at least one credential")]
    NoCredentials,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock completion backend for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Rules match on prompt substrings so a test can react to chunk content
/// or to which extraction stage built the prompt.
///
/// # Examples
///
/// ```
/// use graphmill_llm::MockBackend;
/// use graphmill_domain::traits::CompletionBackend;
///
/// # async fn example() {
/// let mut backend = MockBackend::new("{}");
/// backend.add_response("entities", r#"{"entities":[]}"#);
/// backend.add_error("poison");
///
/// assert_eq!(backend.complete("list entities").await.unwrap(), r#"{"entities":[]}"#);
/// assert!(backend.complete("poison pill").await.is_err());
/// assert_eq!(backend.complete("anything else").await.unwrap(), "{}");
/// assert_eq!(backend.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Option<String>)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockBackend {
    /// Create a mock returning `response` for every prompt.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Respond with `response` to any prompt containing `needle`.
    /// Rules are checked in insertion order; the first match wins.
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((needle.into(), Some(response.into())));
    }

    /// Fail any prompt containing `needle`.
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.rules.lock().unwrap().push((needle.into(), None));
    }

    /// Number of times `complete` was called on this backend.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let rules = self.rules.lock().unwrap();
        for (needle, response) in rules.iter() {
            if prompt.contains(needle.as_str()) {
                return match response {
                    Some(text) => Ok(text.clone()),
                    None => Err(LlmError::Other(format!("mock failure for '{}'", needle))),
                };
            }
        }
        Ok(self.default_response.clone())
    }
}

impl CompletionBackend for MockBackend {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }
}
