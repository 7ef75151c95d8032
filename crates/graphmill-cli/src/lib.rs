//! Graphmill CLI - batch knowledge-graph extraction from cleaned documents.

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{CliError, Result};
