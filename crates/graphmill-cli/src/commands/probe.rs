//! Graph store connectivity check.

use graphmill_graph::GraphWriter;

use crate::config::AppConfig;
use crate::error::Result;

/// Connects to the configured graph store and runs a trivial query.
/// An unreachable store surfaces as an error (and a non-zero exit).
pub async fn execute_probe(config: &AppConfig) -> Result<()> {
    let neo4j = config.require_neo4j()?;
    GraphWriter::connect(&neo4j.uri, &neo4j.user, &neo4j.password).await?;
    println!("graph store at {} is reachable", neo4j.uri);
    Ok(())
}
