//! The two-stage extraction orchestrator.
//!
//! A document is chunked, every chunk makes an entity pass and then a
//! relation pass against the credential pool, and the per-chunk
//! results are merged. In-flight work is capped at the pool capacity;
//! excess chunks wait their turn. A chunk that fails at any point is
//! parked in the error sink and contributes an empty result, so one
//! bad completion never sinks the document.

use futures::future;
use graphmill_domain::{CompletionBackend, ErrorSink, ExtractedData, GroupedDocument};
use graphmill_llm::CredentialPool;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::{chunking, merge, parser, prompt, sink};

/// Drives chunking, both extraction stages, failure isolation, and
/// merging for one document at a time.
pub struct Pipeline<C, S> {
    pool: CredentialPool<C>,
    sink: S,
    config: PipelineConfig,
}

fn preview(chunk: &str) -> String {
    chunk.chars().take(6).collect()
}

impl<C, S> Pipeline<C, S>
where
    C: CompletionBackend + Send + Sync,
    S: ErrorSink + Send + Sync,
{
    /// Creates a pipeline after validating its configuration.
    pub fn new(
        pool: CredentialPool<C>,
        sink: S,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { pool, sink, config })
    }

    /// Extracts a merged entity/relation set from `doc`.
    ///
    /// Only chunking and configuration problems surface as errors;
    /// per-chunk failures are absorbed into the error sink.
    pub async fn process(&self, doc: &GroupedDocument) -> Result<ExtractedData, PipelineError> {
        let chunks = chunking::chunk(self.config.chunk_budget, doc)?;
        info!(
            document = %doc.output_name,
            chunks = chunks.len(),
            "starting extraction"
        );

        let limiter = Semaphore::new(self.pool.capacity());
        let work = chunks.iter().map(|chunk| self.process_guarded(&limiter, chunk));
        let results = future::join_all(work).await;

        let merged = merge::merge(&results, &self.config.fallback_label);
        info!(
            document = %doc.output_name,
            entities = merged.entities.len(),
            relations = merged.relations.len(),
            "extraction finished"
        );
        Ok(merged)
    }

    async fn process_guarded(&self, limiter: &Semaphore, chunk: &str) -> ExtractedData {
        let _permit = limiter
            .acquire()
            .await
            .expect("concurrency limiter is never closed");
        match self.process_chunk(chunk).await {
            Ok(data) => data,
            Err(err) => {
                let key = sink::content_key(chunk);
                warn!(key = %key, head = %preview(chunk), "chunk failed: {err}");
                if let Err(sink_err) = self.sink.write(&key, chunk) {
                    error!(key = %key, "could not park failed chunk: {sink_err}");
                }
                ExtractedData::default()
            }
        }
    }

    async fn process_chunk(&self, chunk: &str) -> Result<ExtractedData, PipelineError> {
        let context = self.config.context.as_deref();

        let entity_prompt = prompt::entity_prompt(context, &self.config.classes, chunk);
        let raw = self
            .pool
            .complete(&entity_prompt)
            .await
            .map_err(|e| PipelineError::Upstream(e.to_string()))?;
        let entities = parser::parse_entities(&parser::normalize(&raw)?)?;
        debug!(head = %preview(chunk), entities = entities.len(), "entity stage done");

        let names: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();
        let relation_prompt = prompt::relation_prompt(&names, context, chunk);
        let raw = self
            .pool
            .complete(&relation_prompt)
            .await
            .map_err(|e| PipelineError::Upstream(e.to_string()))?;
        let relations = parser::parse_relations(&parser::normalize(&raw)?)?;
        debug!(head = %preview(chunk), relations = relations.len(), "relation stage done");

        Ok(ExtractedData {
            entities,
            relations,
            triples: Vec::new(),
        })
    }
}
