//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Graphmill - extract knowledge graphs from cleaned documents.
#[derive(Debug, Parser)]
#[command(name = "graphmill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "graphmill.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract entities and relations from the cleaned input
    Run,

    /// Remove every node and relationship from the graph store
    Clear,

    /// Check that the graph store answers queries
    Probe,
}
