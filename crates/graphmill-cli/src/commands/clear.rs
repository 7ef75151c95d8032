//! Clearing the graph store.

use graphmill_graph::GraphWriter;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;

/// Detach-deletes every named node in the configured graph store.
pub async fn execute_clear(config: &AppConfig) -> Result<()> {
    let neo4j = config.require_neo4j()?;
    let writer = GraphWriter::connect(&neo4j.uri, &neo4j.user, &neo4j.password).await?;
    writer.remove_all().await?;
    info!("graph store cleared");
    Ok(())
}
