//! The batch extraction run.

use std::fs;
use std::path::Path;
use std::time::Duration;

use graphmill_domain::{CompletionBackend, ErrorSink, GroupedDocument};
use graphmill_extractor::{FileSink, Pipeline, PipelineConfig};
use graphmill_graph::GraphWriter;
use graphmill_llm::CredentialPool;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::Result;
use crate::input;

/// Reads the cleaned input, extracts a graph per source document, and
/// writes each result as JSON (and into Neo4j when configured).
///
/// Documents are processed sequentially; a document that fails is
/// logged and skipped, never fatal for the batch.
pub async fn execute_run(config: &AppConfig) -> Result<()> {
    let pool = CredentialPool::from_credentials(
        &config.api.base_url,
        &config.api.model,
        &config.api.api_keys,
    )?;
    info!(credentials = pool.capacity(), model = %config.api.model, "pool ready");

    let sink = FileSink::new(&config.paths.error_dir);
    let pipeline = Pipeline::new(
        pool,
        sink,
        PipelineConfig {
            chunk_budget: config.chunk_size,
            context: config.context.clone(),
            classes: config.classes.clone(),
            fallback_label: config.fallback_label.clone(),
        },
    )?;

    let documents = input::read_documents(&config.paths.input)?;

    let writer = match &config.neo4j {
        Some(neo4j) => Some(GraphWriter::connect(&neo4j.uri, &neo4j.user, &neo4j.password).await?),
        None => None,
    };
    if config.clear_on_start {
        if let Some(writer) = &writer {
            writer.remove_all().await?;
        }
    }

    fs::create_dir_all(&config.paths.output_dir)?;

    run_batch(
        &pipeline,
        writer.as_ref(),
        &config.paths.output_dir,
        config.inter_document_delay_ms,
        &documents,
    )
    .await
}

/// Processes every document in order. Any per-document failure,
/// extraction or output, is logged and skipped.
async fn run_batch<C, S>(
    pipeline: &Pipeline<C, S>,
    writer: Option<&GraphWriter>,
    output_dir: &Path,
    delay_ms: u64,
    documents: &[GroupedDocument],
) -> Result<()>
where
    C: CompletionBackend + Send + Sync,
    S: ErrorSink + Send + Sync,
{
    let total = documents.len();
    for (i, doc) in documents.iter().enumerate() {
        info!(document = %doc.output_name, "processing document {}/{total}", i + 1);

        if let Err(e) = process_document(pipeline, writer, output_dir, doc).await {
            error!(document = %doc.output_name, "document failed, skipping: {e}");
        }

        if delay_ms > 0 && i + 1 < total {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    Ok(())
}

async fn process_document<C, S>(
    pipeline: &Pipeline<C, S>,
    writer: Option<&GraphWriter>,
    output_dir: &Path,
    doc: &GroupedDocument,
) -> Result<()>
where
    C: CompletionBackend + Send + Sync,
    S: ErrorSink + Send + Sync,
{
    let merged = pipeline.process(doc).await?;

    let out_path = output_dir.join(&doc.output_name);
    fs::write(&out_path, serde_json::to_string(&merged)?)?;
    info!(path = %out_path.display(), "wrote extraction result");

    if let Some(writer) = writer {
        let written = writer.write_data(&merged).await;
        info!(written, total = merged.triples.len(), "stored triples");
    }

    Ok(())
}
