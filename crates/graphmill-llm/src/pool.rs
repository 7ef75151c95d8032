//! Round-robin credential pool
//!
//! Wraps N completion backends behind one logical extractor capability.
//! Selection is a bare atomic cursor: round-robin, not least-loaded. Under
//! skewed request latencies one credential can transiently over-queue;
//! that is an accepted trade for statelessness and zero coordination.

use crate::{LlmError, OpenAiClient};
use graphmill_domain::traits::CompletionBackend;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A pool of completion backends used round-robin.
///
/// `capacity()` (the credential count) is the pipeline's concurrency
/// ceiling: one in-flight request per credential is the designed
/// steady-state.
#[derive(Debug)]
pub struct CredentialPool<C> {
    backends: Vec<C>,
    cursor: AtomicUsize,
}

impl<C: CompletionBackend> CredentialPool<C> {
    /// Create a pool from an ordered, non-empty backend list.
    pub fn new(backends: Vec<C>) -> Result<Self, LlmError> {
        if backends.is_empty() {
            return Err(LlmError::NoCredentials);
        }
        Ok(Self {
            backends,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of credentials in the pool.
    pub fn capacity(&self) -> usize {
        self.backends.len()
    }

    /// Issue one completion on the next credential in cyclic order.
    ///
    /// Safe under concurrent callers: the cursor is the only shared
    /// mutable state and advances atomically.
    pub async fn complete(&self, prompt: &str) -> Result<String, C::Error> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.backends.len();
        self.backends[index].complete(prompt).await
    }

    /// The backends, in credential order. Exposed for tests that assert
    /// per-credential behavior.
    pub fn backends(&self) -> &[C] {
        &self.backends
    }
}

impl CredentialPool<OpenAiClient> {
    /// Build a pool of `OpenAiClient`s, one per API key, all against the
    /// same endpoint and model.
    pub fn from_credentials(
        base_url: &str,
        model: &str,
        api_keys: &[String],
    ) -> Result<Self, LlmError> {
        let backends = api_keys
            .iter()
            .map(|key| OpenAiClient::new(base_url, model, key))
            .collect();
        Self::new(backends)
    }
}
